//! Data structures for video information
//!
//! `VideoInfo` and `VideoFormat` mirror the subset of yt-dlp's `--dump-json`
//! output that the application needs. `FormatOption` is the curated,
//! user-facing list built from the raw formats.

use serde::{Deserialize, Serialize};

use crate::utils::format::format_filesize;

/// Video information as reported by yt-dlp
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoInfo {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    // The page URL, not the resolved media `url` key that yt-dlp also emits.
    // A serde alias would reject payloads carrying both keys.
    #[serde(rename = "webpage_url", default)]
    pub url: String,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub uploader: Option<String>,
    #[serde(default)]
    pub upload_date: Option<String>,
    #[serde(default)]
    pub formats: Vec<VideoFormat>,
    #[serde(default)]
    pub extractor: Option<String>,
}

impl VideoInfo {
    /// Duration in whole seconds, if known
    pub fn duration_secs(&self) -> Option<u64> {
        self.duration.map(|d| d.max(0.0) as u64)
    }
}

/// One raw format entry from yt-dlp
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoFormat {
    #[serde(default)]
    pub format_id: String,
    #[serde(default)]
    pub ext: String,
    #[serde(default)]
    pub vcodec: Option<String>,
    #[serde(default)]
    pub acodec: Option<String>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub fps: Option<f64>,
    #[serde(default)]
    pub filesize: Option<u64>,
    #[serde(default)]
    pub filesize_approx: Option<f64>,
    #[serde(default)]
    pub format_note: Option<String>,
    #[serde(default)]
    pub resolution: Option<String>,
}

impl VideoFormat {
    /// Whether this format carries a video stream. A missing vcodec key
    /// counts as video; only an explicit "none" rules it out.
    pub fn has_video(&self) -> bool {
        self.vcodec.as_deref() != Some("none")
    }

    /// Whether this format carries an audio stream, same reading as
    /// [`Self::has_video`]
    pub fn has_audio(&self) -> bool {
        self.acodec.as_deref() != Some("none")
    }

    /// Exact size when reported, otherwise the estimate
    pub fn size_bytes(&self) -> Option<u64> {
        self.filesize
            .or_else(|| self.filesize_approx.map(|s| s.max(0.0) as u64))
    }
}

/// Resolutions surfaced to the user, highest first
const COMMON_RESOLUTIONS: [u32; 8] = [2160, 1440, 1080, 720, 480, 360, 240, 144];

/// A user-selectable download option
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOption {
    pub format_id: String,
    pub height: u32,
    pub ext: String,
    pub filesize: Option<u64>,
    /// Video-only stream: audio has to be merged in by yt-dlp/ffmpeg
    pub needs_audio: bool,
}

impl FormatOption {
    /// yt-dlp format selector for this option
    pub fn selector(&self) -> String {
        if self.needs_audio {
            format!("{}+bestaudio/best", self.format_id)
        } else {
            self.format_id.clone()
        }
    }
}

impl std::fmt::Display for FormatOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}p ({}) {}{}",
            self.height,
            self.ext,
            format_filesize(self.filesize),
            if self.needs_audio { " + audio" } else { "" }
        )
    }
}

/// Build the curated format list from raw yt-dlp formats.
///
/// Per resolution only one candidate survives: formats that already carry
/// audio beat video-only ones, and among equals mp4 beats other containers.
/// Exact ties go to the later entry. Only the common resolutions are
/// surfaced, sorted highest first.
pub fn build_format_options(info: &VideoInfo) -> Vec<FormatOption> {
    let mut best_per_height: std::collections::HashMap<u32, &VideoFormat> =
        std::collections::HashMap::new();

    let candidates = info
        .formats
        .iter()
        .filter(|f| f.has_video() && f.resolution.as_deref() != Some("audio only"));

    for format in candidates {
        let Some(height) = format.height.filter(|h| *h > 0) else {
            continue;
        };

        match best_per_height.get(&height) {
            Some(current) => {
                let keep_current = if current.has_audio() != format.has_audio() {
                    current.has_audio()
                } else {
                    current.ext == "mp4" && format.ext != "mp4"
                };
                if !keep_current {
                    best_per_height.insert(height, format);
                }
            }
            None => {
                best_per_height.insert(height, format);
            }
        }
    }

    COMMON_RESOLUTIONS
        .iter()
        .filter_map(|height| best_per_height.get(height))
        .map(|format| FormatOption {
            format_id: format.format_id.clone(),
            height: format.height.unwrap_or(0),
            ext: format.ext.clone(),
            filesize: format.size_bytes(),
            needs_audio: !format.has_audio(),
        })
        .collect()
}
