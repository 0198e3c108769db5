// Logical-path helpers shared across provider operations. Logical paths use
// '/' separators and never carry a leading or trailing slash; the empty
// string is the provider root.
use crate::error::{PathOutsideRootSnafu, ProviderError};

/// Normalize a raw logical path. Splits on both separator styles, drops empty
/// and `.` segments, resolves `..` against the preceding segments, and fails
/// once a `..` or a drive-style segment would leave the provider root.
pub fn sanitize(raw: &str) -> Result<String, ProviderError> {
    let mut segments: Vec<&str> = Vec::new();
    for segment in raw.split(['/', '\\']) {
        match segment {
            "" | "." => continue,
            ".." => {
                if segments.pop().is_none() {
                    return PathOutsideRootSnafu { path: raw.to_string() }.fail();
                }
            }
            _ => {
                if segment.contains(':') {
                    return PathOutsideRootSnafu { path: raw.to_string() }.fail();
                }
                segments.push(segment);
            }
        }
    }
    Ok(segments.join("/"))
}

/// Join a logical base path and a child name.
pub fn join(base: &str, name: &str) -> String {
    if base.is_empty() {
        name.to_string()
    } else {
        format!("{base}/{name}")
    }
}

/// Logical parent of a path ("" for top-level entries).
pub fn parent(path: &str) -> &str {
    path.rfind('/').map(|index| &path[..index]).unwrap_or("")
}

/// Final component of a logical path.
pub fn basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Directory form of a logical path for the operator ("/" for the root).
pub fn dir_path(logical: &str) -> String {
    if logical.is_empty() {
        "/".to_string()
    } else {
        format!("{logical}/")
    }
}

/// Strip the operator's surrounding slashes off an entry path so it compares
/// against logical paths.
pub fn logical_of_entry(entry_path: &str) -> &str {
    entry_path.trim_matches('/')
}

/// Split a name into stem and extension (extension keeps its dot). Names
/// starting with a dot have no extension, matching the copy-name synthesis of
/// common path libraries.
pub fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(index) if index > 0 => name.split_at(index),
        _ => (name, ""),
    }
}
