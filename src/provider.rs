use std::path::Path;

pub mod constants;
pub mod content;
pub mod editor;
pub mod loader;
pub mod path;
pub mod physical;
pub mod uploader;

pub use self::content::{ContentStream, FileContentProvider};
pub use self::editor::ItemEditor;
pub use self::loader::ItemLoader;
pub use self::physical::PhysicalFileSystemProvider;
pub use self::uploader::{FileUploader, UploadContent};

use crate::error::ProviderError;

pub type ProviderResult<T> = std::result::Result<T, ProviderError>;

/// Polymorphic surface over the four capability groups a backing store must
/// offer: item listing, item editing, content reading, and file upload.
/// Swapping the store means implementing these; the command layer never
/// touches physical paths.
pub trait FileSystemProvider: ItemLoader + ItemEditor + FileContentProvider + FileUploader {
    /// Physical root directory, exposed solely so the command layer can build
    /// absolute paths for archive downloads. Providers without a physical
    /// root return `None`, which disables multi-file downloads.
    fn root_directory_path(&self) -> Option<&Path> {
        None
    }
}
