//! Video metadata extraction via yt-dlp

pub mod models;
pub mod ytdlp;

pub use models::{build_format_options, FormatOption, VideoFormat, VideoInfo};
pub use ytdlp::{find_ytdlp, VideoExtractor};
