use std::path::{Path, PathBuf};

use clap::Parser;
use futures::TryStreamExt;
use serde::Deserialize;
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::commands::{CommandOutcome, CommandResult, DownloadPayload, FileSystemCommandProcessor};
use crate::config::{FileSystemConfiguration, UnknownCommandPolicy};
use crate::error::{ErrorCode, Result};
use crate::provider::PhysicalFileSystemProvider;

/// Transport-agnostic driver: newline-delimited JSON requests on stdin, one
/// JSON result line per request on stdout. Download payloads are materialized
/// into the output directory.
#[derive(Debug, Parser)]
#[command(name = "filegate", about = "Capability-gated file management command runner")]
pub struct Args {
    /// Directory the provider is rooted at.
    #[arg(long, env = "FILEGATE_ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Scratch directory for chunked uploads. Defaults to the system temp
    /// directory.
    #[arg(long, env = "FILEGATE_TEMP_DIR")]
    pub temp_dir: Option<PathBuf>,

    /// Directory download payloads are written into. Defaults to the root.
    #[arg(long, env = "FILEGATE_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    #[arg(long)]
    pub allow_copy: bool,
    #[arg(long)]
    pub allow_create: bool,
    #[arg(long)]
    pub allow_delete: bool,
    #[arg(long)]
    pub allow_download: bool,
    #[arg(long)]
    pub allow_move: bool,
    #[arg(long)]
    pub allow_rename: bool,
    #[arg(long)]
    pub allow_upload: bool,

    /// Grant every capability.
    #[arg(long)]
    pub allow_all: bool,

    /// Comma-separated file suffixes listings are restricted to.
    #[arg(long, value_delimiter = ',', env = "FILEGATE_ALLOWED_EXTENSIONS")]
    pub allowed_extensions: Vec<String>,

    /// Answer unknown commands with an explicit failure instead of silently
    /// ignoring them.
    #[arg(long)]
    pub strict_commands: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Request {
    command: String,
    #[serde(default)]
    arguments: Value,
    /// Local file whose bytes stand in for the transport's binary chunk
    /// payload.
    #[serde(default)]
    payload_path: Option<PathBuf>,
}

pub fn configuration_from(args: &Args) -> FileSystemConfiguration {
    let temp_directory = args.temp_dir.clone().unwrap_or_else(std::env::temp_dir);
    let mut configuration = FileSystemConfiguration::new(temp_directory);
    configuration.allow_copy = args.allow_copy || args.allow_all;
    configuration.allow_create = args.allow_create || args.allow_all;
    configuration.allow_delete = args.allow_delete || args.allow_all;
    configuration.allow_download = args.allow_download || args.allow_all;
    configuration.allow_move = args.allow_move || args.allow_all;
    configuration.allow_rename = args.allow_rename || args.allow_all;
    configuration.allow_upload = args.allow_upload || args.allow_all;
    configuration.allowed_file_extensions = args.allowed_extensions.clone();
    if args.strict_commands {
        configuration.unknown_command_policy = UnknownCommandPolicy::Error;
    }
    configuration
}

pub async fn run(args: Args) -> Result<()> {
    let provider = PhysicalFileSystemProvider::new(&args.root)?;
    let output_dir = args.output_dir.clone().unwrap_or_else(|| args.root.clone());
    let processor = FileSystemCommandProcessor::new(configuration_from(&args), provider);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let request: Request = match serde_json::from_str(line) {
            Ok(request) => request,
            Err(error) => {
                log::warn!("malformed request line: {error}");
                respond(&mut stdout, &CommandResult::failure(Some(ErrorCode::Other))).await?;
                continue;
            }
        };
        let payload = match &request.payload_path {
            Some(payload_path) => match tokio::fs::read(payload_path).await {
                Ok(bytes) => Some(bytes),
                Err(error) => {
                    log::warn!("cannot read payload {}: {error}", payload_path.display());
                    respond(&mut stdout, &CommandResult::failure(Some(ErrorCode::Other))).await?;
                    continue;
                }
            },
            None => None,
        };
        match processor.execute(&request.command, request.arguments, payload).await {
            CommandOutcome::Json(result) => respond(&mut stdout, &result).await?,
            CommandOutcome::Ignored => {}
            CommandOutcome::Unknown { command } => {
                log::warn!("unknown command {command:?}");
                respond(&mut stdout, &CommandResult::failure(None)).await?;
            }
            CommandOutcome::Download(payload) => {
                deliver(&mut stdout, &output_dir, payload).await?;
            }
        }
    }
    Ok(())
}

async fn respond<W: AsyncWrite + Unpin>(stdout: &mut W, result: &CommandResult) -> Result<()> {
    let mut line = serde_json::to_string(result)?;
    line.push('\n');
    stdout.write_all(line.as_bytes()).await?;
    stdout.flush().await?;
    Ok(())
}

/// Stand-in download collaborator: single files are streamed to disk and
/// archive manifests are copied entry by entry. Any failure is terminal for
/// the request, mirroring how a transport must treat archive errors.
async fn deliver<W: AsyncWrite + Unpin>(
    stdout: &mut W,
    output_dir: &Path,
    payload: DownloadPayload,
) -> Result<()> {
    tokio::fs::create_dir_all(output_dir).await?;
    match payload {
        DownloadPayload::File { file_name, content_type, mut content } => {
            let target = output_dir.join(&file_name);
            let mut file = tokio::fs::File::create(&target).await?;
            loop {
                match content.try_next().await {
                    Ok(Some(chunk)) => file.write_all(&chunk.to_vec()).await?,
                    Ok(None) => break,
                    Err(error) => {
                        log::warn!("download stream failed: {error}");
                        return respond(stdout, &CommandResult::failure(Some(error.code()))).await;
                    }
                }
            }
            file.flush().await?;
            log::debug!("saved {} ({content_type})", target.display());
            respond(stdout, &CommandResult::ok()).await
        }
        DownloadPayload::Archive { archive_name, entries } => {
            log::debug!("materializing {archive_name} manifest ({} entries)", entries.len());
            for entry in &entries {
                let target = output_dir.join(&entry.entry_name);
                if let Err(error) = tokio::fs::copy(&entry.source, &target).await {
                    log::warn!("archive entry {} failed: {error}", entry.source.display());
                    return respond(stdout, &CommandResult::failure(Some(ErrorCode::Other))).await;
                }
            }
            respond(stdout, &CommandResult::ok()).await
        }
    }
}
