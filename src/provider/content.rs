use futures::StreamExt;
use futures::stream::BoxStream;
use opendal::Buffer;

use super::constants::CONTENT_CHUNK_SIZE;
use super::{ProviderResult, physical::PhysicalFileSystemProvider};
use crate::error::{FileNotFoundSnafu, ProviderError};
use crate::items::ItemInfo;

/// Chunked byte stream over a file's content. Dropping the stream stops
/// further reads.
pub type ContentStream = BoxStream<'static, ProviderResult<Buffer>>;

/// Content reading capability.
pub trait FileContentProvider {
    /// Open `file` for sequential reading. Absence surfaces as the open
    /// error; the caller is responsible for fully consuming the stream.
    async fn get_file_content(&self, file: &ItemInfo) -> ProviderResult<ContentStream>;
}

impl FileContentProvider for PhysicalFileSystemProvider {
    async fn get_file_content(&self, file: &ItemInfo) -> ProviderResult<ContentStream> {
        let logical = self.resolve(&file.path)?;
        let meta = match self.operator().stat(&logical).await {
            Ok(meta) => meta,
            Err(error) if error.kind() == opendal::ErrorKind::NotFound => {
                return FileNotFoundSnafu { path: logical }.fail();
            }
            Err(error) => return Err(error.into()),
        };
        log::debug!("get_file_content path={logical:?} size={}", meta.content_length());

        let size = meta.content_length();
        let operator = self.operator().clone();
        let stream = futures::stream::try_unfold(0u64, move |offset| {
            let operator = operator.clone();
            let logical = logical.clone();
            async move {
                if offset >= size {
                    return Ok(None);
                }
                let length = CONTENT_CHUNK_SIZE.min(size - offset);
                let buffer = operator
                    .read_with(&logical)
                    .range(offset..offset + length)
                    .await
                    .map_err(ProviderError::from)?;
                if buffer.is_empty() {
                    return Ok(None);
                }
                let read = buffer.len() as u64;
                Ok(Some((buffer, offset + read)))
            }
        });
        Ok(stream.boxed())
    }
}
