use serde::{Deserialize, Serialize};

/// Quality preference accepted by the download endpoint.
///
/// Every variant keeps the mp4 container constraint; the resolution variants
/// cap the vertical resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    #[default]
    Best,
    Worst,
    #[serde(rename = "720p")]
    P720,
    #[serde(rename = "480p")]
    P480,
    #[serde(rename = "360p")]
    P360,
}

impl Quality {
    pub const ALL: [Quality; 5] = [
        Quality::Best,
        Quality::Worst,
        Quality::P720,
        Quality::P480,
        Quality::P360,
    ];

    /// Parses a tag, falling back to `Best` for anything missing or unknown.
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some("best") => Self::Best,
            Some("worst") => Self::Worst,
            Some("720p") => Self::P720,
            Some("480p") => Self::P480,
            Some("360p") => Self::P360,
            _ => Self::Best,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Best => "best",
            Self::Worst => "worst",
            Self::P720 => "720p",
            Self::P480 => "480p",
            Self::P360 => "360p",
        }
    }

    /// yt-dlp `-f` expression for this quality.
    pub fn format_selector(&self) -> &'static str {
        match self {
            Self::Best => "best[ext=mp4]",
            Self::Worst => "worst[ext=mp4]",
            Self::P720 => "best[height<=720][ext=mp4]",
            Self::P480 => "best[height<=480][ext=mp4]",
            Self::P360 => "best[height<=360][ext=mp4]",
        }
    }
}

impl std::fmt::Display for Quality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
