//! Small display/formatting helpers shared by the GUI and the adapters.

use chrono::Local;
use url::Url;

/// Replace characters that are invalid in filenames with underscores
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect()
}

/// Format a byte count as a human-readable size with two decimals
pub fn format_filesize(bytes: Option<u64>) -> String {
    let Some(bytes) = bytes else {
        return "Unknown".to_string();
    };

    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    let mut value = bytes as f64;
    let mut unit = 0;

    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    format!("{:.2} {}", value, UNITS[unit])
}

/// Format seconds as MM:SS, or HH:MM:SS when an hour or longer
pub fn format_duration(seconds: Option<u64>) -> String {
    let Some(total) = seconds else {
        return "Unknown".to_string();
    };

    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{:02}:{:02}", minutes, seconds)
    }
}

/// Format bytes-per-second as a download speed
pub fn format_speed(bytes_per_sec: Option<f64>) -> String {
    match bytes_per_sec {
        Some(speed) if speed > 0.0 => format!("{:.1} MB/s", speed / 1024.0 / 1024.0),
        _ => "-".to_string(),
    }
}

/// Local timestamp used to keep output filenames unique
pub fn timestamp_slug() -> String {
    Local::now().format("%Y-%m-%d_%H-%M-%S").to_string()
}

/// Check that a string is an http(s) URL with a host.
///
/// Everything beyond that is left to yt-dlp, which knows far more sites
/// than any allowlist here could.
pub fn is_valid_video_url(input: &str) -> bool {
    match Url::parse(input.trim()) {
        Ok(url) => {
            matches!(url.scheme(), "http" | "https") && url.host_str().is_some_and(|h| !h.is_empty())
        }
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_replaces_reserved_characters() {
        assert_eq!(
            sanitize_filename("a/b\\c:d*e?f\"g<h>i|j"),
            "a_b_c_d_e_f_g_h_i_j"
        );
        assert_eq!(sanitize_filename("plain title 123"), "plain title 123");
    }

    #[test]
    fn filesize_units() {
        assert_eq!(format_filesize(None), "Unknown");
        assert_eq!(format_filesize(Some(512)), "512.00 B");
        assert_eq!(format_filesize(Some(2048)), "2.00 KB");
        assert_eq!(format_filesize(Some(5 * 1024 * 1024)), "5.00 MB");
        assert_eq!(format_filesize(Some(3 * 1024 * 1024 * 1024)), "3.00 GB");
    }

    #[test]
    fn duration_rolls_over_to_hours() {
        assert_eq!(format_duration(None), "Unknown");
        assert_eq!(format_duration(Some(59)), "00:59");
        assert_eq!(format_duration(Some(61)), "01:01");
        assert_eq!(format_duration(Some(3723)), "01:02:03");
    }

    #[test]
    fn url_validation() {
        assert!(is_valid_video_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ"));
        assert!(is_valid_video_url("http://vimeo.com/12345"));
        assert!(is_valid_video_url("  https://youtu.be/dQw4w9WgXcQ "));
        assert!(!is_valid_video_url(""));
        assert!(!is_valid_video_url("not a url"));
        assert!(!is_valid_video_url("ftp://example.com/file"));
        assert!(!is_valid_video_url("file:///etc/passwd"));
    }
}
