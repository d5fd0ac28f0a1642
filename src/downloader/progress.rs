//! Parsing of yt-dlp progress output
//!
//! The runner starts yt-dlp with `--newline` and a fixed `--progress-template`
//! so stdout can be parsed line by line without scraping the human-readable
//! progress bar.

use std::path::PathBuf;

/// Template handed to yt-dlp's `--progress-template`. Fields are printed
/// `|`-separated; unknown values come out as `NA`.
pub const PROGRESS_TEMPLATE: &str = "download:%(progress.downloaded_bytes)s|\
%(progress.total_bytes)s|%(progress.total_bytes_estimate)s|\
%(progress.speed)s|%(progress.eta)s";

/// Event forwarded from the running yt-dlp process to the GUI
#[derive(Debug, Clone)]
pub enum DownloadEvent {
    /// Periodic progress; `total` is the exact size or yt-dlp's estimate
    Progress {
        downloaded: u64,
        total: Option<u64>,
        speed: Option<f64>,
        eta: Option<u64>,
    },
    /// yt-dlp announced the file it writes to
    Destination(PathBuf),
    /// Post-processing (merging / audio extraction) has started
    Processing,
}

/// Parse a line produced by [`PROGRESS_TEMPLATE`]
pub fn parse_progress_line(line: &str) -> Option<DownloadEvent> {
    let rest = line.trim().strip_prefix("download:")?;
    let mut fields = rest.split('|');

    let downloaded = parse_field::<f64>(fields.next()?)? as u64;
    let total_bytes = parse_field::<f64>(fields.next().unwrap_or("NA"));
    let total_estimate = parse_field::<f64>(fields.next().unwrap_or("NA"));
    let speed = parse_field::<f64>(fields.next().unwrap_or("NA"));
    let eta = parse_field::<f64>(fields.next().unwrap_or("NA"));

    Some(DownloadEvent::Progress {
        downloaded,
        total: total_bytes.or(total_estimate).map(|t| t as u64),
        speed,
        eta: eta.map(|e| e.max(0.0) as u64),
    })
}

fn parse_field<T: std::str::FromStr>(raw: &str) -> Option<T> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "NA" || trimmed == "null" || trimmed == "None" {
        return None;
    }
    trimmed.parse().ok()
}

/// Parse a `[download] Destination: <path>` line
pub fn parse_destination_line(line: &str) -> Option<PathBuf> {
    let rest = line.trim().strip_prefix("[download] Destination:")?;
    let path = rest.trim();
    if path.is_empty() {
        None
    } else {
        Some(PathBuf::from(path))
    }
}

/// Parse the target of a `[Merger] Merging formats into "<path>"` line
pub fn parse_merger_line(line: &str) -> Option<PathBuf> {
    let rest = line.trim().strip_prefix("[Merger] Merging formats into")?;
    let path = rest.trim().trim_matches('"');
    if path.is_empty() {
        None
    } else {
        Some(PathBuf::from(path))
    }
}

/// Whether a line marks the start of a post-processing stage
pub fn is_postprocessing_line(line: &str) -> bool {
    const MARKERS: [&str; 4] = ["[Merger]", "[ExtractAudio]", "[Metadata]", "[Fixup"];
    let trimmed = line.trim();
    MARKERS.iter().any(|m| trimmed.starts_with(m))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_progress_line() {
        let event = parse_progress_line("download:1048576|4194304|NA|524288.5|6").unwrap();
        match event {
            DownloadEvent::Progress {
                downloaded,
                total,
                speed,
                eta,
            } => {
                assert_eq!(downloaded, 1_048_576);
                assert_eq!(total, Some(4_194_304));
                assert_eq!(speed, Some(524_288.5));
                assert_eq!(eta, Some(6));
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn falls_back_to_total_estimate() {
        let event = parse_progress_line("download:100|NA|2000.7|NA|NA").unwrap();
        match event {
            DownloadEvent::Progress {
                total, speed, eta, ..
            } => {
                assert_eq!(total, Some(2000));
                assert_eq!(speed, None);
                assert_eq!(eta, None);
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn rejects_garbage_lines() {
        assert!(parse_progress_line("").is_none());
        assert!(parse_progress_line("[info] Writing video metadata").is_none());
        assert!(parse_progress_line("download:NA|NA|NA|NA|NA").is_none());
    }

    #[test]
    fn parses_destination_line() {
        let path =
            parse_destination_line("[download] Destination: /tmp/My Video_2026-08-25.f137.mp4")
                .unwrap();
        assert_eq!(path, PathBuf::from("/tmp/My Video_2026-08-25.f137.mp4"));
        assert!(parse_destination_line("[download]  42.0% of ~10MiB").is_none());
    }

    #[test]
    fn parses_merger_line() {
        let path =
            parse_merger_line("[Merger] Merging formats into \"/tmp/My Video_2026-08-25.mp4\"")
                .unwrap();
        assert_eq!(path, PathBuf::from("/tmp/My Video_2026-08-25.mp4"));
    }

    #[test]
    fn detects_postprocessing_markers() {
        assert!(is_postprocessing_line("[Merger] Merging formats into \"a.mp4\""));
        assert!(is_postprocessing_line("[ExtractAudio] Destination: a.mp3"));
        assert!(is_postprocessing_line("[Metadata] Adding metadata to \"a.mp4\""));
        assert!(!is_postprocessing_line("[download] Destination: a.mp4"));
    }
}
