use serde::de::{Deserializer, IgnoredAny};
use serde::Deserialize;
use std::path::Path;

use super::quality::Quality;

/// Inbound download request body.
///
/// Both fields are lenient: a missing or non-string `url` becomes empty and is
/// rejected by host validation, a non-string `quality` counts as unrecognized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DownloadRequest {
    #[serde(default, deserialize_with = "lenient_url")]
    pub url: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub quality: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MaybeString {
    Text(String),
    Other(#[allow(dead_code)] IgnoredAny),
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match MaybeString::deserialize(deserializer)? {
        MaybeString::Text(s) => Some(s),
        MaybeString::Other(_) => None,
    })
}

fn lenient_url<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_string(deserializer)?.unwrap_or_default())
}

impl DownloadRequest {
    pub fn new(url: impl Into<String>, quality: Option<&str>) -> Self {
        Self {
            url: url.into(),
            quality: quality.map(str::to_string),
        }
    }

    pub fn quality(&self) -> Quality {
        Quality::from_tag(self.quality.as_deref())
    }
}

/// True when `url` contains any of `allowed_hosts`.
///
/// This is a plain substring test: it does not parse the URL.
pub fn is_allowed_url(url: &str, allowed_hosts: &[String]) -> bool {
    !url.is_empty() && allowed_hosts.iter().any(|host| url.contains(host.as_str()))
}

/// Key tying a request to the files its download produces.
///
/// Millisecond timestamp plus a random suffix, so two requests landing in the
/// same millisecond still get distinct prefixes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrelationKey {
    timestamp_ms: i64,
    suffix: String,
}

impl CorrelationKey {
    pub fn generate() -> Self {
        let suffix = uuid::Uuid::new_v4().simple().to_string()[..8].to_string();
        Self {
            timestamp_ms: chrono::Utc::now().timestamp_millis(),
            suffix,
        }
    }

    pub fn from_parts(timestamp_ms: i64, suffix: impl Into<String>) -> Self {
        Self {
            timestamp_ms,
            suffix: suffix.into(),
        }
    }

    pub fn timestamp_ms(&self) -> i64 {
        self.timestamp_ms
    }

    /// Filename prefix shared by every file of this request: `video_{key}_`.
    pub fn file_prefix(&self) -> String {
        format!("video_{}_", self)
    }

    /// yt-dlp output template inside `dir`.
    pub fn output_template(&self, dir: &Path) -> String {
        dir.join(format!("{}%(title)s.%(ext)s", self.file_prefix()))
            .to_string_lossy()
            .to_string()
    }
}

impl std::fmt::Display for CorrelationKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.timestamp_ms, self.suffix)
    }
}
