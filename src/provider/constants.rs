// Buffer related constants
pub const DEFAULT_BUFFER_SIZE: usize = 8192;
pub const CONTENT_CHUNK_SIZE: u64 = 1024 * 1024;
