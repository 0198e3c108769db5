use std::path::PathBuf;

/// Advisory upload limits. Enforcement happens in the transport layer; the
/// core only threads them through so a transport can read them back.
#[derive(Debug, Clone)]
pub struct UploadConfiguration {
    /// Chunk size in bytes.
    pub chunk_size: u64,
    /// Maximum upload file size in bytes.
    pub max_file_size: u64,
}

impl Default for UploadConfiguration {
    fn default() -> Self {
        Self {
            chunk_size: 100 * 1024,
            max_file_size: (1u64 << 53) - 1,
        }
    }
}

/// Operation classes a configuration can permit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Download,
    Create,
    Delete,
    Rename,
    Copy,
    Move,
    Upload,
}

/// What to do with a command name outside the dispatch set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownCommandPolicy {
    /// Log and produce no response (the historical behavior).
    #[default]
    Ignore,
    /// Report the command back so the transport can answer explicitly.
    Error,
}

/// Capability flags and shared settings for a command processor. All flags
/// default to `false`: a fresh configuration permits nothing.
#[derive(Debug, Clone)]
pub struct FileSystemConfiguration {
    pub allow_copy: bool,
    pub allow_create: bool,
    pub allow_delete: bool,
    pub allow_download: bool,
    pub allow_move: bool,
    pub allow_rename: bool,
    pub allow_upload: bool,
    /// File suffixes listings are restricted to. Empty means no filtering;
    /// directories always pass.
    pub allowed_file_extensions: Vec<String>,
    /// Scratch directory for chunked uploads.
    pub temp_directory: PathBuf,
    pub upload: UploadConfiguration,
    pub unknown_command_policy: UnknownCommandPolicy,
}

impl FileSystemConfiguration {
    pub fn new(temp_directory: impl Into<PathBuf>) -> Self {
        Self {
            allow_copy: false,
            allow_create: false,
            allow_delete: false,
            allow_download: false,
            allow_move: false,
            allow_rename: false,
            allow_upload: false,
            allowed_file_extensions: Vec::new(),
            temp_directory: temp_directory.into(),
            upload: UploadConfiguration::default(),
            unknown_command_policy: UnknownCommandPolicy::default(),
        }
    }

    /// Grant every capability.
    pub fn allow_all(mut self) -> Self {
        self.allow_copy = true;
        self.allow_create = true;
        self.allow_delete = true;
        self.allow_download = true;
        self.allow_move = true;
        self.allow_rename = true;
        self.allow_upload = true;
        self
    }

    pub fn allows(&self, capability: Capability) -> bool {
        match capability {
            Capability::Download => self.allow_download,
            Capability::Create => self.allow_create,
            Capability::Delete => self.allow_delete,
            Capability::Rename => self.allow_rename,
            Capability::Copy => self.allow_copy,
            Capability::Move => self.allow_move,
            Capability::Upload => self.allow_upload,
        }
    }
}
