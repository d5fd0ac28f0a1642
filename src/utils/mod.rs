//! Utility modules for error handling, configuration and formatting

pub mod config;
pub mod error;
pub mod format;

// Re-export for convenience
pub use config::{default_download_dir, prepare_output_dir, AppSettings, AudioBitrate};
pub use error::TubefetchError;
