use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::debug;

/// Content type used when the extension tells us nothing.
pub const FALLBACK_CONTENT_TYPE: &str = "video/mp4";

/// A file produced by the downloader for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub path: PathBuf,
    /// Filename with the correlation prefix stripped.
    pub display_name: String,
    pub modified: SystemTime,
    pub size_bytes: u64,
}

impl Artifact {
    /// Content type guessed from the file extension.
    pub fn content_type(&self) -> String {
        mime_guess::from_path(&self.path)
            .first()
            .filter(|mime| matches!(mime.type_().as_str(), "video" | "audio"))
            .map(|mime| mime.essence_str().to_string())
            .unwrap_or_else(|| FALLBACK_CONTENT_TYPE.to_string())
    }

    /// `Content-Disposition` value for serving this artifact as an attachment.
    pub fn content_disposition(&self) -> String {
        content_disposition(&self.display_name)
    }
}

/// Builds an attachment disposition for `name`.
///
/// Plain ASCII names produce `attachment; filename="<name>"`. Anything else
/// gets an ASCII fallback plus an RFC 5987 `filename*` parameter.
pub fn content_disposition(name: &str) -> String {
    let plain = name
        .chars()
        .all(|c| c.is_ascii() && !c.is_ascii_control() && c != '"' && c != '\\');
    if plain {
        return format!("attachment; filename=\"{}\"", name);
    }

    let fallback: String = name
        .chars()
        .map(|c| {
            if c.is_ascii() && !c.is_ascii_control() && c != '"' && c != '\\' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        fallback,
        urlencoding::encode(name)
    )
}

/// Finds the most recently modified file in `dir` whose name starts with `prefix`.
///
/// Entries that disappear between listing and stat are skipped. When several
/// files tie on modification time the pick among them is arbitrary.
pub async fn find_artifact(dir: &Path, prefix: &str) -> io::Result<Option<Artifact>> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut best: Option<Artifact> = None;

    while let Some(entry) = entries.next_entry().await? {
        let file_name = entry.file_name();
        if !file_name.as_encoded_bytes().starts_with(prefix.as_bytes()) {
            continue;
        }
        // Titles are not guaranteed to be valid UTF-8
        let name = file_name.to_string_lossy();

        let metadata = match entry.metadata().await {
            Ok(m) if m.is_file() => m,
            Ok(_) => continue,
            Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
            Err(e) => return Err(e),
        };
        let modified = metadata.modified()?;
        debug!(file = %name, ?modified, "Prefix match");

        if best.as_ref().is_some_and(|b| b.modified >= modified) {
            continue;
        }

        let stripped = name.strip_prefix(prefix).unwrap_or_default();
        best = Some(Artifact {
            path: entry.path(),
            display_name: if stripped.is_empty() {
                name.to_string()
            } else {
                stripped.to_string()
            },
            modified,
            size_bytes: metadata.len(),
        });
    }

    Ok(best)
}
