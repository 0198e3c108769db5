use futures::TryStreamExt;
use opendal::EntryMode;

use super::{ProviderResult, path, physical::PhysicalFileSystemProvider};
use crate::error::DirectoryNotFoundSnafu;
use crate::items::{DirectoryItem, FileItem, Item, ItemInfo};

/// Item listing capability.
pub trait ItemLoader {
    /// Enumerate the direct children of `directory`, directories first.
    /// Children that vanish or cannot be inspected mid-scan are skipped.
    async fn list_items(&self, directory: &ItemInfo) -> ProviderResult<Vec<Item>>;
}

impl ItemLoader for PhysicalFileSystemProvider {
    async fn list_items(&self, directory: &ItemInfo) -> ProviderResult<Vec<Item>> {
        let logical = self.resolve(&directory.path)?;
        if !self.is_directory(&logical).await {
            return DirectoryNotFoundSnafu { path: logical }.fail();
        }
        log::debug!("list_items path={logical:?}");

        let entries = self.operator().list(&path::dir_path(&logical)).await?;
        let mut items = Vec::with_capacity(entries.len());
        for entry in entries {
            let entry_logical = path::logical_of_entry(entry.path());
            if entry_logical == logical {
                continue;
            }
            let name = path::basename(entry_logical).to_string();
            let Ok(meta) = self.operator().stat(entry.path()).await else {
                continue;
            };
            let date_modified = meta
                .last_modified()
                .map(|modified| modified.to_rfc3339())
                .unwrap_or_default();
            if meta.mode() == EntryMode::DIR {
                match self.has_sub_directories(entry_logical).await {
                    Ok(has_sub_directories) => items.push(Item::Directory(DirectoryItem::new(
                        name,
                        date_modified,
                        has_sub_directories,
                    ))),
                    Err(_) => continue,
                }
            } else {
                items.push(Item::File(FileItem::new(
                    name,
                    date_modified,
                    meta.content_length(),
                )));
            }
        }
        items.sort_by_key(|item| !item.is_directory());
        Ok(items)
    }
}

impl PhysicalFileSystemProvider {
    /// True once the first directory-type child is seen; the enumeration
    /// stops there rather than scanning the whole subtree.
    async fn has_sub_directories(&self, logical: &str) -> ProviderResult<bool> {
        let mut lister = self.operator().lister_with(&path::dir_path(logical)).await?;
        while let Some(entry) = lister.try_next().await? {
            if path::logical_of_entry(entry.path()) == logical {
                continue;
            }
            if entry.metadata().mode() == EntryMode::DIR {
                return Ok(true);
            }
        }
        Ok(false)
    }
}
