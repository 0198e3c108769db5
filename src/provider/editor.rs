use async_recursion::async_recursion;
use opendal::EntryMode;
use snafu::ensure;

use super::{ProviderResult, path, physical::PhysicalFileSystemProvider};
use crate::error::{
    DestinationInsideSourceSnafu, DirectoryExistsSnafu, FileExistsSnafu, InvalidNameSnafu,
    ProviderError, RootUnmodifiableSnafu, SamePathSnafu,
};
use crate::items::ItemInfo;

/// Item editing capability: create, delete, rename, copy, move.
pub trait ItemEditor {
    /// Create `name` under `parent`. Fails with `DirectoryExists` when the
    /// target is already present.
    async fn create_directory(&self, parent: &ItemInfo, name: &str) -> ProviderResult<()>;

    /// Delete a file or directory (recursively for directories).
    async fn delete_item(&self, item: &ItemInfo) -> ProviderResult<()>;

    /// Rename an item in place. A no-op rename is an error, not success.
    async fn rename_item(&self, item: &ItemInfo, new_name: &str) -> ProviderResult<()>;

    /// Copy an item into `destination_directory`. Copying into the item's own
    /// directory synthesizes a fresh " - Copy" name instead of failing.
    async fn copy_item(&self, item: &ItemInfo, destination_directory: &ItemInfo)
    -> ProviderResult<()>;

    /// Move an item into `destination_directory`. Unlike copy, a name
    /// conflict at the destination is an error.
    async fn move_item(&self, item: &ItemInfo, destination_directory: &ItemInfo)
    -> ProviderResult<()>;
}

fn missing_item(item: &ItemInfo, logical: &str) -> ProviderError {
    if item.is_directory {
        ProviderError::DirectoryNotFound { path: logical.to_string() }
    } else {
        ProviderError::FileNotFound { path: logical.to_string() }
    }
}

impl ItemEditor for PhysicalFileSystemProvider {
    async fn create_directory(&self, parent: &ItemInfo, name: &str) -> ProviderResult<()> {
        let parent_logical = self.resolve(&parent.path)?;
        let name = path::sanitize(name)?;
        ensure!(!name.is_empty(), InvalidNameSnafu { name });
        let target = path::join(&parent_logical, &name);
        log::debug!("create_directory path={target:?}");

        if self.exists(&target).await? {
            return DirectoryExistsSnafu { path: target }.fail();
        }
        self.ensure_directory(&target).await
    }

    async fn delete_item(&self, item: &ItemInfo) -> ProviderResult<()> {
        let logical = self.resolve(&item.path)?;
        ensure!(!logical.is_empty(), RootUnmodifiableSnafu);
        log::debug!("delete_item path={logical:?} is_directory={}", item.is_directory);

        if !self.exists(&logical).await? {
            return Err(missing_item(item, &logical));
        }
        if item.is_directory {
            self.operator().remove_all(&path::dir_path(&logical)).await?;
        } else {
            self.operator().remove_all(&logical).await?;
        }
        Ok(())
    }

    async fn rename_item(&self, item: &ItemInfo, new_name: &str) -> ProviderResult<()> {
        let logical = self.resolve(&item.path)?;
        ensure!(!logical.is_empty(), RootUnmodifiableSnafu);
        let new_name = path::sanitize(new_name)?;
        ensure!(!new_name.is_empty(), InvalidNameSnafu { name: new_name });

        if !self.exists(&logical).await? {
            return Err(missing_item(item, &logical));
        }
        let renamed = path::join(path::parent(&logical), &new_name);
        log::debug!("rename_item path={logical:?} new_path={renamed:?}");
        ensure!(logical != renamed, SamePathSnafu { path: logical });

        self.operator().rename(&logical, &renamed).await?;
        Ok(())
    }

    async fn copy_item(
        &self,
        item: &ItemInfo,
        destination_directory: &ItemInfo,
    ) -> ProviderResult<()> {
        let source = self.resolve(&item.path)?;
        ensure!(!source.is_empty(), RootUnmodifiableSnafu);
        let destination_dir = self.resolve(&destination_directory.path)?;

        if !self.exists(&source).await? {
            return Err(missing_item(item, &source));
        }
        self.ensure_directory(&destination_dir).await?;

        let base = path::basename(&source);
        let (stem, extension) = path::split_extension(base);
        let mut name = stem.to_string();
        let mut destination = path::join(&destination_dir, &format!("{name}{extension}"));
        if destination == source {
            loop {
                name.push_str(" - Copy");
                destination = path::join(&destination_dir, &format!("{name}{extension}"));
                if !self.exists(&destination).await? {
                    break;
                }
            }
        }
        ensure!(
            !destination.starts_with(&format!("{source}/")),
            DestinationInsideSourceSnafu { path: destination }
        );
        log::debug!("copy_item source={source:?} destination={destination:?}");

        if self.is_directory(&source).await {
            self.copy_directory(&source, &destination).await
        } else {
            self.operator().copy(&source, &destination).await?;
            Ok(())
        }
    }

    async fn move_item(
        &self,
        item: &ItemInfo,
        destination_directory: &ItemInfo,
    ) -> ProviderResult<()> {
        let source = self.resolve(&item.path)?;
        ensure!(!source.is_empty(), RootUnmodifiableSnafu);
        let destination_dir = self.resolve(&destination_directory.path)?;

        if !self.exists(&source).await? {
            return Err(missing_item(item, &source));
        }
        self.ensure_directory(&destination_dir).await?;

        let destination = path::join(&destination_dir, path::basename(&source));
        log::debug!("move_item source={source:?} destination={destination:?}");
        ensure!(source != destination, SamePathSnafu { path: source });
        ensure!(
            !destination.starts_with(&format!("{source}/")),
            DestinationInsideSourceSnafu { path: destination }
        );
        if self.exists(&destination).await? {
            return if item.is_directory {
                DirectoryExistsSnafu { path: destination }.fail()
            } else {
                FileExistsSnafu { path: destination }.fail()
            };
        }

        self.operator().rename(&source, &destination).await?;
        Ok(())
    }
}

impl PhysicalFileSystemProvider {
    /// Replay a directory subtree under `destination`, depth first.
    #[async_recursion]
    async fn copy_directory(&self, source: &str, destination: &str) -> ProviderResult<()> {
        self.ensure_directory(destination).await?;
        let entries = self.operator().list(&path::dir_path(source)).await?;
        for entry in entries {
            let entry_logical = path::logical_of_entry(entry.path());
            if entry_logical == source || entry_logical == destination {
                continue;
            }
            let target = path::join(destination, path::basename(entry_logical));
            if entry.metadata().mode() == EntryMode::DIR {
                self.copy_directory(entry_logical, &target).await?;
            } else {
                self.operator().copy(entry_logical, &target).await?;
            }
        }
        Ok(())
    }
}
