//! Download-invocation adapter
//!
//! Starts a yt-dlp process for a single download, forwards its progress
//! events over a channel and reports the final output path. All retry and
//! resume behavior is yt-dlp's own; cancellation kills the child.

use std::path::PathBuf;
use std::process::Stdio;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command as AsyncCommand;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::downloader::progress::{
    is_postprocessing_line, parse_destination_line, parse_merger_line, parse_progress_line,
    DownloadEvent, PROGRESS_TEMPLATE,
};
use crate::extractor::ytdlp::find_ytdlp;
use crate::utils::config::AudioBitrate;
use crate::utils::error::TubefetchError;
use crate::utils::format::{sanitize_filename, timestamp_slug};

/// What to download for a given URL
#[derive(Debug, Clone)]
pub enum DownloadMode {
    /// A video format picked from the curated list, merged into mp4
    Video { selector: String },
    /// Best audio track, transcoded to mp3
    Audio { bitrate: AudioBitrate },
}

impl DownloadMode {
    /// Extension of the finished file
    pub fn output_ext(&self) -> &'static str {
        match self {
            DownloadMode::Video { .. } => "mp4",
            DownloadMode::Audio { .. } => "mp3",
        }
    }
}

/// Everything the runner needs for one download
#[derive(Debug, Clone)]
pub struct DownloadRequest {
    pub url: String,
    pub output_dir: PathBuf,
    pub mode: DownloadMode,
    /// Filename stem, derived from the video title plus a timestamp
    pub stem: String,
}

impl DownloadRequest {
    pub fn new(url: String, title: &str, output_dir: PathBuf, mode: DownloadMode) -> Self {
        let stem = format!("{}_{}", sanitize_filename(title), timestamp_slug());
        Self {
            url,
            output_dir,
            mode,
            stem,
        }
    }

    /// Path the finished file is expected at
    pub fn expected_output(&self) -> PathBuf {
        self.output_dir
            .join(format!("{}.{}", self.stem, self.mode.output_ext()))
    }
}

/// Runs yt-dlp downloads one at a time
#[derive(Debug, Clone)]
pub struct DownloadRunner {
    ytdlp_path: PathBuf,
}

impl DownloadRunner {
    pub fn new() -> Result<Self> {
        let ytdlp_path = find_ytdlp().ok_or(TubefetchError::YtDlpNotFound)?;
        Ok(Self { ytdlp_path })
    }

    pub fn with_path(ytdlp_path: PathBuf) -> Self {
        Self { ytdlp_path }
    }

    /// Run a download to completion.
    ///
    /// Progress is streamed over `events`; the call resolves once yt-dlp
    /// exits. Cancelling the token kills the child process.
    pub async fn run(
        &self,
        request: DownloadRequest,
        events: mpsc::Sender<DownloadEvent>,
        cancel: CancellationToken,
    ) -> Result<PathBuf> {
        let args = build_args(&request);
        info!("Starting yt-dlp download: {}", request.url);
        debug!("yt-dlp args: {:?}", args);

        let mut child = AsyncCommand::new(&self.ytdlp_path)
            .args(&args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| TubefetchError::DownloadError(format!("failed to start yt-dlp: {}", e)))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| TubefetchError::DownloadError("yt-dlp stdout unavailable".into()))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| TubefetchError::DownloadError("yt-dlp stderr unavailable".into()))?;

        // Collect stderr in the background so a failing run can be reported
        let stderr_task = tokio::spawn(async move {
            let mut lines = BufReader::new(stderr).lines();
            let mut collected = String::new();
            while let Ok(Some(line)) = lines.next_line().await {
                if !collected.is_empty() {
                    collected.push('\n');
                }
                collected.push_str(&line);
            }
            collected
        });

        let mut lines = BufReader::new(stdout).lines();
        let mut final_path: Option<PathBuf> = None;

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    warn!("Download cancelled, killing yt-dlp");
                    child.kill().await.ok();
                    stderr_task.abort();
                    return Err(TubefetchError::Cancelled.into());
                }
                line = lines.next_line() => {
                    match line {
                        Ok(Some(line)) => {
                            self.handle_line(&line, &events, &mut final_path).await;
                        }
                        Ok(None) => break,
                        Err(e) => {
                            warn!("Failed reading yt-dlp output: {}", e);
                            break;
                        }
                    }
                }
            }
        }

        let status = tokio::select! {
            _ = cancel.cancelled() => {
                child.kill().await.ok();
                stderr_task.abort();
                return Err(TubefetchError::Cancelled.into());
            }
            status = child.wait() => status?,
        };

        if !status.success() {
            let stderr_output = stderr_task.await.unwrap_or_default();
            let reason = last_error_line(&stderr_output)
                .unwrap_or_else(|| format!("yt-dlp exited with {}", status));
            return Err(TubefetchError::DownloadError(reason).into());
        }

        let output = self.resolve_output(&request, final_path)?;
        info!("Download finished: {}", output.display());
        Ok(output)
    }

    async fn handle_line(
        &self,
        line: &str,
        events: &mpsc::Sender<DownloadEvent>,
        final_path: &mut Option<PathBuf>,
    ) {
        if let Some(event) = parse_progress_line(line) {
            let _ = events.send(event).await;
        } else if let Some(dest) = parse_destination_line(line) {
            *final_path = Some(dest.clone());
            let _ = events.send(DownloadEvent::Destination(dest)).await;
        } else if let Some(merged) = parse_merger_line(line) {
            *final_path = Some(merged);
            let _ = events.send(DownloadEvent::Processing).await;
        } else if is_postprocessing_line(line) {
            let _ = events.send(DownloadEvent::Processing).await;
        } else {
            debug!("yt-dlp: {}", line);
        }
    }

    /// Pick the finished file: the expected merged/transcoded path when it
    /// exists, otherwise the last destination yt-dlp reported.
    fn resolve_output(
        &self,
        request: &DownloadRequest,
        last_seen: Option<PathBuf>,
    ) -> Result<PathBuf> {
        let expected = request.expected_output();
        if file_has_content(&expected) {
            return Ok(expected);
        }

        if let Some(path) = last_seen {
            if file_has_content(&path) {
                return Ok(path);
            }
        }

        Err(TubefetchError::DownloadError(format!(
            "yt-dlp reported success but {} is missing",
            expected.display()
        ))
        .into())
    }
}

fn file_has_content(path: &PathBuf) -> bool {
    std::fs::metadata(path).map(|m| m.len() > 0).unwrap_or(false)
}

/// Last `ERROR:` line from stderr, or the last non-empty line
fn last_error_line(stderr: &str) -> Option<String> {
    let lines: Vec<&str> = stderr.lines().filter(|l| !l.trim().is_empty()).collect();
    lines
        .iter()
        .rev()
        .find(|l| l.trim_start().starts_with("ERROR:"))
        .or_else(|| lines.last())
        .map(|l| l.trim().to_string())
}

/// Build the yt-dlp argument list for a request
pub fn build_args(request: &DownloadRequest) -> Vec<String> {
    let output_template = request
        .output_dir
        .join(format!("{}.%(ext)s", request.stem))
        .to_string_lossy()
        .to_string();

    let mut args = vec![
        "--newline".to_string(),
        "--progress-template".to_string(),
        PROGRESS_TEMPLATE.to_string(),
        "--no-warnings".to_string(),
        "-o".to_string(),
        output_template,
    ];

    match &request.mode {
        DownloadMode::Video { selector } => {
            args.push("-f".to_string());
            args.push(selector.clone());
            args.push("--merge-output-format".to_string());
            args.push("mp4".to_string());
            args.push("--embed-metadata".to_string());
        }
        DownloadMode::Audio { bitrate } => {
            args.push("-f".to_string());
            args.push("bestaudio/best".to_string());
            args.push("-x".to_string());
            args.push("--audio-format".to_string());
            args.push("mp3".to_string());
            args.push("--audio-quality".to_string());
            args.push(bitrate.as_arg().to_string());
        }
    }

    args.push(request.url.clone());
    args
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video_request() -> DownloadRequest {
        DownloadRequest::new(
            "https://www.youtube.com/watch?v=abc".to_string(),
            "My: Video?",
            PathBuf::from("/tmp/downloads"),
            DownloadMode::Video {
                selector: "137+bestaudio/best".to_string(),
            },
        )
    }

    #[test]
    fn request_sanitizes_title_into_stem() {
        let request = video_request();
        assert!(request.stem.starts_with("My_ Video__"));
        assert_eq!(request.expected_output().extension().unwrap(), "mp4");
    }

    #[test]
    fn video_args_merge_into_mp4() {
        let request = video_request();
        let args = build_args(&request);

        let f_pos = args.iter().position(|a| a == "-f").expect("-f flag");
        assert_eq!(args[f_pos + 1], "137+bestaudio/best");
        assert!(args.contains(&"--merge-output-format".to_string()));
        assert!(args.contains(&"--embed-metadata".to_string()));
        assert!(args.contains(&"--newline".to_string()));
        assert_eq!(args.last().unwrap(), "https://www.youtube.com/watch?v=abc");

        let o_pos = args.iter().position(|a| a == "-o").expect("-o flag");
        assert!(args[o_pos + 1].ends_with(".%(ext)s"));
        assert!(args[o_pos + 1].starts_with("/tmp/downloads/"));
    }

    #[test]
    fn audio_args_extract_mp3() {
        let request = DownloadRequest::new(
            "https://youtu.be/abc".to_string(),
            "Track",
            PathBuf::from("/tmp"),
            DownloadMode::Audio {
                bitrate: AudioBitrate::Kbps256,
            },
        );
        let args = build_args(&request);

        assert!(args.contains(&"-x".to_string()));
        assert!(args.contains(&"mp3".to_string()));
        let q_pos = args
            .iter()
            .position(|a| a == "--audio-quality")
            .expect("quality flag");
        assert_eq!(args[q_pos + 1], "256");
        assert_eq!(request.expected_output().extension().unwrap(), "mp3");
    }

    #[test]
    fn last_error_line_prefers_error_prefix() {
        let stderr = "WARNING: something\nERROR: Video unavailable\ntrailing";
        assert_eq!(
            last_error_line(stderr).unwrap(),
            "ERROR: Video unavailable"
        );
        assert_eq!(last_error_line("just noise").unwrap(), "just noise");
        assert!(last_error_line("").is_none());
    }

    #[tokio::test]
    async fn run_fails_cleanly_when_binary_is_missing() {
        let runner = DownloadRunner::with_path(PathBuf::from("/nonexistent/yt-dlp"));
        let (tx, _rx) = mpsc::channel(16);
        let result = runner
            .run(video_request(), tx, CancellationToken::new())
            .await;
        assert!(result.is_err());
    }
}
