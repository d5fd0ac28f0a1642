//! Thin adapter around yt-dlp's download routine

pub mod progress;
pub mod runner;

pub use progress::DownloadEvent;
pub use runner::{DownloadMode, DownloadRequest, DownloadRunner};
