//! Application configuration

use std::path::PathBuf;

use path_absolutize::Absolutize;
use serde::{Deserialize, Serialize};

use crate::utils::error::TubefetchError;

/// Environment variable overriding the default download folder
pub const DOWNLOAD_DIR_ENV: &str = "TUBEFETCH_DOWNLOAD_DIR";

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// Download location
    pub download_dir: PathBuf,

    /// Bitrate used when extracting audio
    pub audio_bitrate: AudioBitrate,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            download_dir: default_download_dir(),
            audio_bitrate: AudioBitrate::default(),
        }
    }
}

/// Resolve the default download folder.
///
/// Priority: `TUBEFETCH_DOWNLOAD_DIR` env var, then the platform Downloads
/// directory, then `./downloads`.
pub fn default_download_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DOWNLOAD_DIR_ENV) {
        if !dir.trim().is_empty() {
            return PathBuf::from(dir);
        }
    }

    dirs::download_dir().unwrap_or_else(|| PathBuf::from("./downloads"))
}

/// Resolve an output directory to an absolute path and make sure it exists
/// and is writable.
pub fn prepare_output_dir(dir: &str) -> Result<PathBuf, TubefetchError> {
    if dir.trim().is_empty() {
        return Err(TubefetchError::OutputDirError(
            "no output folder selected".to_string(),
        ));
    }

    let path = PathBuf::from(dir.trim());
    let absolute = path
        .absolutize()
        .map_err(|e| TubefetchError::OutputDirError(format!("cannot resolve folder: {}", e)))?
        .to_path_buf();

    std::fs::create_dir_all(&absolute)
        .map_err(|e| TubefetchError::OutputDirError(format!("cannot create folder: {}", e)))?;

    let metadata = std::fs::metadata(&absolute)
        .map_err(|e| TubefetchError::OutputDirError(format!("cannot access folder: {}", e)))?;
    if metadata.permissions().readonly() {
        return Err(TubefetchError::OutputDirError(format!(
            "folder is read-only: {}",
            absolute.display()
        )));
    }

    Ok(absolute)
}

/// MP3 bitrates offered in the settings view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AudioBitrate {
    Kbps128,
    Kbps192,
    Kbps256,
    Kbps320,
}

impl Default for AudioBitrate {
    fn default() -> Self {
        AudioBitrate::Kbps192
    }
}

impl AudioBitrate {
    pub const ALL: [AudioBitrate; 4] = [
        AudioBitrate::Kbps128,
        AudioBitrate::Kbps192,
        AudioBitrate::Kbps256,
        AudioBitrate::Kbps320,
    ];

    /// Value passed to yt-dlp's `--audio-quality`
    pub fn as_arg(&self) -> &'static str {
        match self {
            AudioBitrate::Kbps128 => "128",
            AudioBitrate::Kbps192 => "192",
            AudioBitrate::Kbps256 => "256",
            AudioBitrate::Kbps320 => "320",
        }
    }

    pub fn from_setting(value: &str) -> Self {
        match value {
            "128" => AudioBitrate::Kbps128,
            "192" => AudioBitrate::Kbps192,
            "256" => AudioBitrate::Kbps256,
            "320" => AudioBitrate::Kbps320,
            _ => AudioBitrate::default(),
        }
    }
}

impl std::fmt::Display for AudioBitrate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} kbps", self.as_arg())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_have_a_download_dir() {
        let settings = AppSettings::default();
        assert!(!settings.download_dir.as_os_str().is_empty());
        assert_eq!(settings.audio_bitrate, AudioBitrate::Kbps192);
    }

    #[test]
    fn bitrate_roundtrip() {
        for bitrate in AudioBitrate::ALL {
            assert_eq!(AudioBitrate::from_setting(bitrate.as_arg()), bitrate);
        }
        assert_eq!(AudioBitrate::from_setting("garbage"), AudioBitrate::Kbps192);
    }

    #[test]
    fn prepare_output_dir_rejects_empty() {
        assert!(matches!(
            prepare_output_dir(""),
            Err(TubefetchError::OutputDirError(_))
        ));
        assert!(matches!(
            prepare_output_dir("   "),
            Err(TubefetchError::OutputDirError(_))
        ));
    }

    #[test]
    fn prepare_output_dir_creates_missing_folders() {
        let temp = tempfile::tempdir().expect("temp dir");
        let nested = temp.path().join("a").join("b");
        let resolved = prepare_output_dir(nested.to_str().unwrap()).expect("prepare");
        assert!(resolved.is_dir());
        assert!(resolved.is_absolute());
    }
}
