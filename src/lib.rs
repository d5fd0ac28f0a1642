//! Tubefetch - desktop frontend for yt-dlp
//!
//! Paste a URL, fetch its metadata, pick a resolution or audio only, and
//! download through yt-dlp/ffmpeg with live progress and a history of
//! finished downloads.

pub mod database;
pub mod downloader;
pub mod extractor;
pub mod gui;
pub mod utils;

pub use database::{HistoryEntry, HistoryStore};
pub use downloader::{DownloadEvent, DownloadMode, DownloadRequest, DownloadRunner};
pub use extractor::{FormatOption, VideoExtractor, VideoInfo};
