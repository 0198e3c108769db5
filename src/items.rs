use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Logical identity of a file-system entry, independent of any transport
/// encoding. The `path` is provider-relative; physical resolution is the
/// provider's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemInfo {
    pub path: String,
    pub is_directory: bool,
    /// Opaque breadcrumb keys owned by the presentation layer. Never
    /// interpreted by a provider.
    pub path_keys: Vec<String>,
}

impl ItemInfo {
    pub fn new(path: impl Into<String>, is_directory: bool) -> Self {
        Self {
            path: path.into(),
            is_directory,
            path_keys: Vec::new(),
        }
    }

    pub fn directory(path: impl Into<String>) -> Self {
        Self::new(path, true)
    }

    pub fn file(path: impl Into<String>) -> Self {
        Self::new(path, false)
    }

    pub fn with_path_keys(mut self, path_keys: Vec<String>) -> Self {
        self.path_keys = path_keys;
        self
    }
}

/// A file entry in a listing result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileItem {
    pub is_directory: bool,
    pub name: String,
    pub date_modified: String,
    pub size: u64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub thumbnail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub custom_fields: Option<Value>,
}

impl FileItem {
    pub fn new(name: impl Into<String>, date_modified: impl Into<String>, size: u64) -> Self {
        Self {
            is_directory: false,
            name: name.into(),
            date_modified: date_modified.into(),
            size,
            key: None,
            thumbnail: None,
            custom_fields: None,
        }
    }
}

/// A directory entry in a listing result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryItem {
    pub is_directory: bool,
    pub name: String,
    pub date_modified: String,
    pub has_sub_directories: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub thumbnail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub custom_fields: Option<Value>,
}

impl DirectoryItem {
    pub fn new(
        name: impl Into<String>,
        date_modified: impl Into<String>,
        has_sub_directories: bool,
    ) -> Self {
        Self {
            is_directory: true,
            name: name.into(),
            date_modified: date_modified.into(),
            has_sub_directories,
            key: None,
            thumbnail: None,
            custom_fields: None,
        }
    }
}

/// Listing-result entry. A file never carries `hasSubDirectories` and a
/// directory never carries `size`; the variants keep those fields exclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Item {
    Directory(DirectoryItem),
    File(FileItem),
}

impl Item {
    pub fn name(&self) -> &str {
        match self {
            Item::Directory(directory) => &directory.name,
            Item::File(file) => &file.name,
        }
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, Item::Directory(_))
    }

    pub fn date_modified(&self) -> &str {
        match self {
            Item::Directory(directory) => &directory.date_modified,
            Item::File(file) => &file.date_modified,
        }
    }
}
