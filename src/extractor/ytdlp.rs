//! yt-dlp wrapper for video metadata extraction
//!
//! All protocol and site-specific work lives in yt-dlp; this module only
//! locates the binary and parses its `--dump-json` output.

use std::path::PathBuf;

use anyhow::Result;
use tokio::process::Command as AsyncCommand;
use tracing::{debug, error, info, warn};

use crate::extractor::models::VideoInfo;
use crate::utils::error::TubefetchError;

/// Metadata-fetch adapter around the yt-dlp binary
#[derive(Debug, Clone)]
pub struct VideoExtractor {
    ytdlp_path: PathBuf,
}

impl VideoExtractor {
    /// Initialize the extractor and verify yt-dlp availability
    pub fn new() -> Result<Self> {
        let ytdlp_path = match find_ytdlp() {
            Some(path) => {
                info!("Found yt-dlp at: {}", path.display());
                path
            }
            None => {
                error!("yt-dlp not found");
                return Err(TubefetchError::YtDlpNotFound.into());
            }
        };

        Ok(Self { ytdlp_path })
    }

    /// Build an extractor around a known binary path (used by tests)
    pub fn with_path(ytdlp_path: PathBuf) -> Self {
        Self { ytdlp_path }
    }

    /// Extract video information without downloading.
    /// Uses: yt-dlp --dump-json --no-download
    pub async fn extract_info(&self, url: &str) -> Result<VideoInfo> {
        debug!("Extracting video info for URL: {}", url);

        let output = AsyncCommand::new(&self.ytdlp_path)
            .arg("--dump-json")
            .arg("--no-download")
            .arg("--no-warnings")
            .arg(url)
            .output()
            .await?;

        if !output.status.success() {
            let error_msg = String::from_utf8_lossy(&output.stderr);
            error!("yt-dlp extraction failed: {}", error_msg);
            return Err(TubefetchError::ExtractionError(error_msg.trim().to_string()).into());
        }

        let json_str = String::from_utf8_lossy(&output.stdout);
        let video_info: VideoInfo =
            serde_json::from_str(json_str.trim()).map_err(TubefetchError::SerializationError)?;

        Ok(video_info)
    }

    /// The yt-dlp binary this extractor shells out to
    pub fn ytdlp_path(&self) -> &PathBuf {
        &self.ytdlp_path
    }
}

// Locations checked after PATH: Homebrew (Apple Silicon then Intel), distro
// packages, pip --user installs.
const FALLBACK_PATHS: [&str; 4] = [
    "/opt/homebrew/bin/yt-dlp",
    "/usr/local/bin/yt-dlp",
    "/usr/bin/yt-dlp",
    "~/.local/bin/yt-dlp",
];

/// Find the yt-dlp binary: system PATH first, then common install locations.
/// Apps launched from a desktop shell often miss user-level PATH entries,
/// hence the fallback list.
pub fn find_ytdlp() -> Option<PathBuf> {
    if let Ok(found) = which::which("yt-dlp") {
        debug!("Using yt-dlp from PATH: {}", found.display());
        return Some(found);
    }

    let fallback = FALLBACK_PATHS
        .iter()
        .map(|p| expand_home(p))
        .find(|p| is_executable(p));

    match &fallback {
        Some(path) => debug!("Using yt-dlp at {}", path.display()),
        None => warn!("yt-dlp not found in PATH or common locations"),
    }
    fallback
}

fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

#[cfg(unix)]
fn is_executable(path: &PathBuf) -> bool {
    use std::os::unix::fs::PermissionsExt;

    std::fs::metadata(path)
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &PathBuf) -> bool {
    path.exists()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::models::build_format_options;

    // A trimmed --dump-json payload: one audio-only stream, one video-only
    // 1080p stream and one combined 720p mp4. Carries both "url" and
    // "webpage_url" plus both "uploader" and "channel", like the real thing.
    const SAMPLE_DUMP_JSON: &str = r#"{
        "id": "dQw4w9WgXcQ",
        "title": "Sample Video",
        "url": "https://rr2---sn-example.googlevideo.com/videoplayback?expire=1",
        "webpage_url": "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
        "duration": 212.0,
        "thumbnail": "https://i.ytimg.com/vi/dQw4w9WgXcQ/maxresdefault.jpg",
        "uploader": "Sample Channel",
        "channel": "Sample Channel",
        "upload_date": "20091025",
        "extractor": "youtube",
        "formats": [
            {"format_id": "140", "ext": "m4a", "vcodec": "none", "acodec": "mp4a.40.2", "filesize": 3400000},
            {"format_id": "137", "ext": "mp4", "vcodec": "avc1.640028", "acodec": "none", "height": 1080, "width": 1920, "filesize": 52000000},
            {"format_id": "22", "ext": "mp4", "vcodec": "avc1.64001F", "acodec": "mp4a.40.2", "height": 720, "width": 1280, "filesize_approx": 31000000.5}
        ]
    }"#;

    #[test]
    fn parses_dump_json_payload() {
        let info: VideoInfo = serde_json::from_str(SAMPLE_DUMP_JSON).expect("parse");
        assert_eq!(info.title, "Sample Video");
        assert_eq!(info.uploader.as_deref(), Some("Sample Channel"));
        assert_eq!(info.duration_secs(), Some(212));
        assert_eq!(info.formats.len(), 3);
        assert_eq!(info.url, "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
    }

    #[test]
    fn sample_payload_yields_format_options() {
        let info: VideoInfo = serde_json::from_str(SAMPLE_DUMP_JSON).expect("parse");
        let options = build_format_options(&info);

        assert_eq!(options.len(), 2);
        assert_eq!(options[0].height, 1080);
        assert!(options[0].needs_audio);
        assert_eq!(options[1].height, 720);
        assert!(!options[1].needs_audio);
        // estimate is used when the exact size is missing
        assert_eq!(options[1].filesize, Some(31000000));
    }

    #[test]
    fn malformed_json_maps_to_serialization_error() {
        let err = serde_json::from_str::<VideoInfo>("not json")
            .map_err(TubefetchError::SerializationError)
            .unwrap_err();
        assert!(matches!(err, TubefetchError::SerializationError(_)));
    }

    #[test]
    fn find_ytdlp_does_not_panic() {
        // yt-dlp may or may not be installed where tests run
        let result = find_ytdlp();
        println!("yt-dlp found at: {:?}", result);
    }

    #[test]
    fn extractor_with_explicit_path() {
        let extractor = VideoExtractor::with_path(PathBuf::from("/usr/bin/yt-dlp"));
        assert_eq!(extractor.ytdlp_path(), &PathBuf::from("/usr/bin/yt-dlp"));
    }
}
