/// Maps a resolved file name to the content type sent with a single-file
/// download. The transport may install its own resolver; the extension map
/// below is the default collaborator.
pub trait ContentTypeResolver {
    fn content_type(&self, file_name: &str) -> String;
}

/// Extension-based resolver covering the types a file manager commonly
/// serves. Anything else is `application/octet-stream`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExtensionContentTypes;

impl ContentTypeResolver for ExtensionContentTypes {
    fn content_type(&self, file_name: &str) -> String {
        let extension = file_name
            .rsplit_once('.')
            .map(|(_, extension)| extension.to_ascii_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            "txt" | "log" | "md" => "text/plain",
            "html" | "htm" => "text/html",
            "css" => "text/css",
            "csv" => "text/csv",
            "js" => "text/javascript",
            "json" => "application/json",
            "xml" => "application/xml",
            "pdf" => "application/pdf",
            "png" => "image/png",
            "jpg" | "jpeg" => "image/jpeg",
            "gif" => "image/gif",
            "svg" => "image/svg+xml",
            "webp" => "image/webp",
            "ico" => "image/x-icon",
            "mp3" => "audio/mpeg",
            "wav" => "audio/wav",
            "mp4" => "video/mp4",
            "webm" => "video/webm",
            "zip" => "application/zip",
            "gz" => "application/gzip",
            "tar" => "application/x-tar",
            _ => "application/octet-stream",
        }
        .to_string()
    }
}
