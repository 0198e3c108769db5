use std::path::{Path, PathBuf};

use opendal::{EntryMode, Operator, services};

use super::{FileSystemProvider, ProviderResult, path};
use crate::error::Result;

/// Provider over a rooted directory tree on local disk. Logical paths are
/// resolved against the root by the operator; nothing here ever touches a
/// path outside it.
#[derive(Clone)]
pub struct PhysicalFileSystemProvider {
    operator: Operator,
    root: PathBuf,
}

impl PhysicalFileSystemProvider {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let builder = services::Fs::default().root(&root.to_string_lossy());
        let operator = Operator::new(builder)?.finish();
        Ok(Self { operator, root })
    }

    pub fn operator(&self) -> &Operator {
        &self.operator
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute filesystem path for a sanitized logical path.
    pub fn absolute_path(&self, logical: &str) -> PathBuf {
        self.root.join(logical)
    }

    pub(crate) fn resolve(&self, raw: &str) -> ProviderResult<String> {
        path::sanitize(raw)
    }

    /// Hybrid directory detection: stat first; if the store cannot stat the
    /// path, probe its prefix listing.
    pub(crate) async fn is_directory(&self, logical: &str) -> bool {
        if logical.is_empty() {
            return true;
        }
        match self.operator.stat(logical).await.ok().map(|meta| meta.mode()) {
            Some(EntryMode::DIR) => true,
            Some(_) => false,
            None => {
                let probe = path::dir_path(logical);
                self.operator
                    .list_with(&probe)
                    .limit(1)
                    .await
                    .map(|entries| !entries.is_empty())
                    .unwrap_or(false)
            }
        }
    }

    /// Existence check covering both files and directories. The root always
    /// exists.
    pub(crate) async fn exists(&self, logical: &str) -> ProviderResult<bool> {
        if logical.is_empty() {
            return Ok(true);
        }
        if self.operator.exists(logical).await? {
            return Ok(true);
        }
        Ok(self.is_directory(logical).await)
    }

    /// Idempotently create a directory (with any missing parents).
    pub(crate) async fn ensure_directory(&self, logical: &str) -> ProviderResult<()> {
        self.operator.create_dir(&path::dir_path(logical)).await?;
        Ok(())
    }
}

impl FileSystemProvider for PhysicalFileSystemProvider {
    fn root_directory_path(&self) -> Option<&Path> {
        Some(&self.root)
    }
}
