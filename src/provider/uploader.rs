use std::path::PathBuf;

use snafu::ensure;
use tokio::fs;
use tokio::io::{AsyncReadExt, BufReader};

use super::constants::DEFAULT_BUFFER_SIZE;
use super::{ProviderResult, path, physical::PhysicalFileSystemProvider};
use crate::error::InvalidNameSnafu;
use crate::items::ItemInfo;

/// Content handed to an upload: an in-memory buffer, or a reference to an
/// already-materialized temporary file so large uploads are not buffered
/// twice.
#[derive(Debug)]
pub enum UploadContent {
    Buffer(Vec<u8>),
    TempFile(PathBuf),
}

/// File upload capability.
pub trait FileUploader {
    /// Write `content` to `destination_directory/file_name`, overwriting any
    /// existing file of that name.
    async fn upload_file(
        &self,
        file_name: &str,
        content: UploadContent,
        destination_directory: &ItemInfo,
    ) -> ProviderResult<()>;
}

impl FileUploader for PhysicalFileSystemProvider {
    async fn upload_file(
        &self,
        file_name: &str,
        content: UploadContent,
        destination_directory: &ItemInfo,
    ) -> ProviderResult<()> {
        let destination_dir = self.resolve(&destination_directory.path)?;
        let file_name = path::sanitize(file_name)?;
        ensure!(!file_name.is_empty(), InvalidNameSnafu { name: file_name });
        let destination = path::join(&destination_dir, &file_name);
        log::debug!("upload_file destination={destination:?}");

        match content {
            UploadContent::Buffer(bytes) => {
                self.operator().write(&destination, bytes).await?;
            }
            UploadContent::TempFile(source) => {
                let file = fs::File::open(&source).await?;
                let mut reader = BufReader::new(file);
                let mut writer = self.operator().writer(&destination).await?;
                let mut buffer = vec![0u8; DEFAULT_BUFFER_SIZE];
                loop {
                    let read = reader.read(&mut buffer).await?;
                    if read == 0 {
                        break;
                    }
                    writer.write(buffer[..read].to_vec()).await?;
                }
                writer.close().await?;
            }
        }
        Ok(())
    }
}
