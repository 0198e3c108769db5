// Wire-level argument shapes for the command set. Field names follow the
// client protocol (camelCase).
use serde::Deserialize;

use crate::upload::ChunkMetadata;

/// One breadcrumb segment of a client-supplied path.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathSegment {
    pub name: String,
    #[serde(default)]
    pub key: String,
}

pub type PathInfo = Vec<PathSegment>;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetDirContentsArgs {
    #[serde(default)]
    pub path_info: PathInfo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadArgs {
    #[serde(default)]
    pub path_info_list: Vec<PathInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDirArgs {
    #[serde(default)]
    pub path_info: PathInfo,
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveArgs {
    #[serde(default)]
    pub path_info: PathInfo,
    #[serde(default)]
    pub is_directory: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameArgs {
    #[serde(default)]
    pub path_info: PathInfo,
    #[serde(default)]
    pub is_directory: bool,
    pub name: String,
}

/// Shared argument shape for `Copy` and `Move`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferArgs {
    #[serde(default)]
    pub source_path_info: PathInfo,
    #[serde(default)]
    pub destination_path_info: PathInfo,
    #[serde(default)]
    pub source_is_directory: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadChunkArgs {
    #[serde(default)]
    pub destination_path_info: PathInfo,
    pub chunk_metadata: ChunkMetadata,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbortUploadArgs {
    pub upload_id: String,
}
