use std::path::{MAIN_SEPARATOR_STR, Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub mod args;

use crate::config::{Capability, FileSystemConfiguration, UnknownCommandPolicy};
use crate::content_type::{ContentTypeResolver, ExtensionContentTypes};
use crate::error::{ErrorCode, ProviderError};
use crate::items::{Item, ItemInfo};
use crate::provider::{
    ContentStream, FileContentProvider, FileSystemProvider, FileUploader, ItemEditor, ItemLoader,
    UploadContent, path,
};
use crate::upload::{ChunkDisposition, UploadSessionTracker};
use self::args::{
    AbortUploadArgs, CreateDirArgs, DownloadArgs, GetDirContentsArgs, PathSegment, RemoveArgs,
    RenameArgs, TransferArgs, UploadChunkArgs,
};

/// The closed command set the processor dispatches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    GetDirContents,
    Download,
    CreateDir,
    Remove,
    Rename,
    Copy,
    Move,
    UploadChunk,
    AbortUpload,
}

impl CommandKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "GetDirContents" => Some(CommandKind::GetDirContents),
            "Download" => Some(CommandKind::Download),
            "CreateDir" => Some(CommandKind::CreateDir),
            "Remove" => Some(CommandKind::Remove),
            "Rename" => Some(CommandKind::Rename),
            "Copy" => Some(CommandKind::Copy),
            "Move" => Some(CommandKind::Move),
            "UploadChunk" => Some(CommandKind::UploadChunk),
            "AbortUpload" => Some(CommandKind::AbortUpload),
            _ => None,
        }
    }

    /// Capability each command requires, consulted once at dispatch.
    pub fn required_capability(self) -> Option<Capability> {
        match self {
            CommandKind::GetDirContents => None,
            CommandKind::Download => Some(Capability::Download),
            CommandKind::CreateDir => Some(Capability::Create),
            CommandKind::Remove => Some(Capability::Delete),
            CommandKind::Rename => Some(Capability::Rename),
            CommandKind::Copy => Some(Capability::Copy),
            CommandKind::Move => Some(Capability::Move),
            CommandKind::UploadChunk | CommandKind::AbortUpload => Some(Capability::Upload),
        }
    }
}

/// Uniform JSON result for non-download commands. `errorCode` carries the
/// provider's failure code; capability denials stay code-less.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error_code: Option<ErrorCode>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub result: Option<Vec<Item>>,
}

impl CommandResult {
    pub fn ok() -> Self {
        Self { success: true, error_code: None, result: None }
    }

    pub fn with_items(items: Vec<Item>) -> Self {
        Self { success: true, error_code: None, result: Some(items) }
    }

    pub fn failure(error_code: Option<ErrorCode>) -> Self {
        Self { success: false, error_code, result: None }
    }
}

/// One entry of a multi-file archive manifest: the absolute source path and
/// the name it gets inside the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub source: PathBuf,
    pub entry_name: String,
}

/// Payload handed to the transport for a `Download` command.
pub enum DownloadPayload {
    /// Single file, streamed with `content-disposition`/`content-type`
    /// headers built from these fields.
    File {
        file_name: String,
        content_type: String,
        content: ContentStream,
    },
    /// Several files; a collaborator streams the manifest into a zip.
    Archive {
        archive_name: String,
        entries: Vec<ArchiveEntry>,
    },
}

/// What one `execute` call produced.
pub enum CommandOutcome {
    Json(CommandResult),
    Download(DownloadPayload),
    /// Unrecognized command under the `Ignore` policy: no response at all.
    Ignored,
    /// Unrecognized command under the `Error` policy.
    Unknown { command: String },
}

enum TransferMode {
    Copy,
    Move,
}

/// Command dispatch and policy enforcement over a file-system provider.
/// Stateless per request; configuration and provider are fixed at
/// construction.
pub struct FileSystemCommandProcessor<P> {
    configuration: FileSystemConfiguration,
    provider: P,
    uploads: UploadSessionTracker,
    content_types: Arc<dyn ContentTypeResolver + Send + Sync>,
}

impl<P: FileSystemProvider> FileSystemCommandProcessor<P> {
    pub fn new(configuration: FileSystemConfiguration, provider: P) -> Self {
        let uploads = UploadSessionTracker::new(configuration.temp_directory.clone());
        Self {
            configuration,
            provider,
            uploads,
            content_types: Arc::new(ExtensionContentTypes),
        }
    }

    pub fn with_content_types(
        mut self,
        content_types: Arc<dyn ContentTypeResolver + Send + Sync>,
    ) -> Self {
        self.content_types = content_types;
        self
    }

    pub fn configuration(&self) -> &FileSystemConfiguration {
        &self.configuration
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Execute one command. Failures of any kind become `{success: false}`;
    /// nothing propagates across this boundary.
    pub async fn execute(
        &self,
        command: &str,
        arguments: Value,
        payload: Option<Vec<u8>>,
    ) -> CommandOutcome {
        let Some(kind) = CommandKind::from_name(command) else {
            return match self.configuration.unknown_command_policy {
                UnknownCommandPolicy::Ignore => {
                    log::warn!("ignoring unknown command {command:?}");
                    CommandOutcome::Ignored
                }
                UnknownCommandPolicy::Error => {
                    CommandOutcome::Unknown { command: command.to_string() }
                }
            };
        };
        if let Some(capability) = kind.required_capability() {
            if !self.configuration.allows(capability) {
                log::debug!("{command} denied: capability {capability:?} not granted");
                return CommandOutcome::Json(CommandResult::failure(None));
            }
        }
        match kind {
            CommandKind::GetDirContents => self.get_dir_contents(arguments).await,
            CommandKind::Download => self.download(arguments).await,
            CommandKind::CreateDir => self.create_dir(arguments).await,
            CommandKind::Remove => self.remove(arguments).await,
            CommandKind::Rename => self.rename(arguments).await,
            CommandKind::Copy => self.transfer(arguments, TransferMode::Copy).await,
            CommandKind::Move => self.transfer(arguments, TransferMode::Move).await,
            CommandKind::UploadChunk => {
                self.upload_chunk(arguments, payload.unwrap_or_default()).await
            }
            CommandKind::AbortUpload => self.abort_upload(arguments).await,
        }
    }

    fn parse_args<T: serde::de::DeserializeOwned>(arguments: Value) -> Result<T, CommandOutcome> {
        serde_json::from_value(arguments).map_err(|error| {
            log::warn!("malformed command arguments: {error}");
            CommandOutcome::Json(CommandResult::failure(Some(ErrorCode::Other)))
        })
    }

    /// Join segment names with the platform separator. Physical resolution
    /// stays in the provider; this is purely a logical join.
    fn join_path(path_info: &[PathSegment]) -> String {
        path_info
            .iter()
            .map(|segment| segment.name.as_str())
            .collect::<Vec<_>>()
            .join(MAIN_SEPARATOR_STR)
    }

    fn item_info(path_info: &[PathSegment], is_directory: bool) -> ItemInfo {
        ItemInfo::new(Self::join_path(path_info), is_directory)
            .with_path_keys(path_info.iter().map(|segment| segment.key.clone()).collect())
    }

    fn from_provider(result: Result<(), ProviderError>) -> CommandOutcome {
        match result {
            Ok(()) => CommandOutcome::Json(CommandResult::ok()),
            Err(error) => {
                log::debug!("command failed: {error}");
                CommandOutcome::Json(CommandResult::failure(Some(error.code())))
            }
        }
    }

    async fn get_dir_contents(&self, arguments: Value) -> CommandOutcome {
        let args: GetDirContentsArgs = match Self::parse_args(arguments) {
            Ok(args) => args,
            Err(outcome) => return outcome,
        };
        let directory = Self::item_info(&args.path_info, true);
        match self.provider.list_items(&directory).await {
            Ok(mut items) => {
                let extensions = &self.configuration.allowed_file_extensions;
                if !extensions.is_empty() {
                    items.retain(|item| {
                        item.is_directory()
                            || extensions.iter().any(|extension| item.name().ends_with(extension))
                    });
                }
                CommandOutcome::Json(CommandResult::with_items(items))
            }
            Err(error) => {
                log::debug!("GetDirContents failed: {error}");
                CommandOutcome::Json(CommandResult::failure(Some(error.code())))
            }
        }
    }

    async fn download(&self, arguments: Value) -> CommandOutcome {
        let args: DownloadArgs = match Self::parse_args(arguments) {
            Ok(args) => args,
            Err(outcome) => return outcome,
        };
        if args.path_info_list.is_empty() {
            return CommandOutcome::Json(CommandResult::failure(Some(ErrorCode::Other)));
        }
        if args.path_info_list.len() == 1 {
            let file = Self::item_info(&args.path_info_list[0], false);
            let file_name = Path::new(&file.path)
                .file_name()
                .map(|name| name.to_string_lossy().to_string())
                .unwrap_or_else(|| file.path.clone());
            match self.provider.get_file_content(&file).await {
                Ok(content) => CommandOutcome::Download(DownloadPayload::File {
                    content_type: self.content_types.content_type(&file_name),
                    file_name,
                    content,
                }),
                Err(error) => {
                    log::debug!("Download failed: {error}");
                    CommandOutcome::Json(CommandResult::failure(Some(error.code())))
                }
            }
        } else {
            let Some(root) = self.provider.root_directory_path() else {
                log::warn!("multi-file download requires a provider with a physical root");
                return CommandOutcome::Json(CommandResult::failure(Some(ErrorCode::Other)));
            };
            let mut entries = Vec::with_capacity(args.path_info_list.len());
            for path_info in &args.path_info_list {
                let logical = match path::sanitize(&Self::join_path(path_info)) {
                    Ok(logical) => logical,
                    Err(error) => {
                        log::debug!("Download failed: {error}");
                        return CommandOutcome::Json(CommandResult::failure(Some(error.code())));
                    }
                };
                entries.push(ArchiveEntry {
                    source: root.join(&logical),
                    entry_name: path::basename(&logical).to_string(),
                });
            }
            CommandOutcome::Download(DownloadPayload::Archive {
                archive_name: "files.zip".to_string(),
                entries,
            })
        }
    }

    async fn create_dir(&self, arguments: Value) -> CommandOutcome {
        let args: CreateDirArgs = match Self::parse_args(arguments) {
            Ok(args) => args,
            Err(outcome) => return outcome,
        };
        let parent = Self::item_info(&args.path_info, true);
        Self::from_provider(self.provider.create_directory(&parent, &args.name).await)
    }

    async fn remove(&self, arguments: Value) -> CommandOutcome {
        let args: RemoveArgs = match Self::parse_args(arguments) {
            Ok(args) => args,
            Err(outcome) => return outcome,
        };
        let item = Self::item_info(&args.path_info, args.is_directory);
        Self::from_provider(self.provider.delete_item(&item).await)
    }

    async fn rename(&self, arguments: Value) -> CommandOutcome {
        let args: RenameArgs = match Self::parse_args(arguments) {
            Ok(args) => args,
            Err(outcome) => return outcome,
        };
        let item = Self::item_info(&args.path_info, args.is_directory);
        Self::from_provider(self.provider.rename_item(&item, &args.name).await)
    }

    async fn transfer(&self, arguments: Value, mode: TransferMode) -> CommandOutcome {
        let args: TransferArgs = match Self::parse_args(arguments) {
            Ok(args) => args,
            Err(outcome) => return outcome,
        };
        let source = Self::item_info(&args.source_path_info, args.source_is_directory);
        let destination = Self::item_info(&args.destination_path_info, true);
        let result = match mode {
            TransferMode::Copy => self.provider.copy_item(&source, &destination).await,
            TransferMode::Move => self.provider.move_item(&source, &destination).await,
        };
        Self::from_provider(result)
    }

    async fn upload_chunk(&self, arguments: Value, payload: Vec<u8>) -> CommandOutcome {
        let args: UploadChunkArgs = match Self::parse_args(arguments) {
            Ok(args) => args,
            Err(outcome) => return outcome,
        };
        let destination = Self::item_info(&args.destination_path_info, true);
        let metadata = &args.chunk_metadata;
        match self.uploads.append_chunk(metadata, &payload).await {
            Ok(ChunkDisposition::Partial) => CommandOutcome::Json(CommandResult::ok()),
            Ok(ChunkDisposition::Complete { scratch }) => {
                let upload = self
                    .provider
                    .upload_file(&metadata.file_name, UploadContent::TempFile(scratch), &destination)
                    .await;
                self.uploads.remove_scratch(&metadata.upload_id).await;
                Self::from_provider(upload)
            }
            Err(error) => {
                log::warn!("chunk append failed: {error}");
                CommandOutcome::Json(CommandResult::failure(Some(ErrorCode::Other)))
            }
        }
    }

    async fn abort_upload(&self, arguments: Value) -> CommandOutcome {
        let args: AbortUploadArgs = match Self::parse_args(arguments) {
            Ok(args) => args,
            Err(outcome) => return outcome,
        };
        self.uploads.abort(&args.upload_id).await;
        CommandOutcome::Json(CommandResult::ok())
    }
}
