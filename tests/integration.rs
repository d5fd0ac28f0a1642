//! Integration-style tests: metadata payload through format selection to the
//! yt-dlp invocation, without hitting the network.

use std::path::PathBuf;

use tempfile::TempDir;
use tubefetch::downloader::runner::build_args;
use tubefetch::downloader::{DownloadMode, DownloadRequest};
use tubefetch::extractor::{build_format_options, VideoInfo};
use tubefetch::utils::config::{prepare_output_dir, AudioBitrate};

// The subset of a real --dump-json payload the application consumes
const DUMP_JSON: &str = r#"{
    "id": "xyz",
    "title": "Conference Talk: Borrow / Checker?",
    "webpage_url": "https://www.youtube.com/watch?v=xyz",
    "duration": 1825.4,
    "uploader": "RustConf",
    "formats": [
        {"format_id": "140", "ext": "m4a", "vcodec": "none", "acodec": "mp4a.40.2"},
        {"format_id": "137", "ext": "mp4", "vcodec": "avc1", "acodec": "none", "height": 1080, "filesize": 90000000},
        {"format_id": "248", "ext": "webm", "vcodec": "vp9", "acodec": "none", "height": 1080, "filesize": 80000000},
        {"format_id": "22", "ext": "mp4", "vcodec": "avc1", "acodec": "mp4a.40.2", "height": 720, "filesize": 45000000},
        {"format_id": "18", "ext": "mp4", "vcodec": "avc1", "acodec": "mp4a.40.2", "height": 360, "filesize": 15000000}
    ]
}"#;

fn sample_info() -> VideoInfo {
    serde_json::from_str(DUMP_JSON).expect("parse dump json")
}

#[test]
fn payload_to_curated_options() {
    let info = sample_info();
    let options = build_format_options(&info);

    // 1080p keeps the mp4 over the webm, 720p/360p already carry audio
    let summary: Vec<(u32, &str, bool)> = options
        .iter()
        .map(|o| (o.height, o.ext.as_str(), o.needs_audio))
        .collect();
    assert_eq!(
        summary,
        vec![(1080, "mp4", true), (720, "mp4", false), (360, "mp4", false)]
    );
}

#[test]
fn video_selection_drives_the_invocation() {
    let temp = TempDir::new().expect("temp dir");
    let info = sample_info();
    let options = build_format_options(&info);
    let chosen = &options[0];

    let output_dir = prepare_output_dir(temp.path().to_str().unwrap()).expect("output dir");
    let request = DownloadRequest::new(
        info.url.clone(),
        &info.title,
        output_dir.clone(),
        DownloadMode::Video {
            selector: chosen.selector(),
        },
    );

    // Reserved characters from the title never reach the filesystem
    assert!(!request.stem.contains('/'));
    assert!(!request.stem.contains(':'));
    assert!(!request.stem.contains('?'));
    assert!(request.expected_output().starts_with(&output_dir));
    assert_eq!(request.expected_output().extension().unwrap(), "mp4");

    let args = build_args(&request);
    let f_pos = args.iter().position(|a| a == "-f").expect("-f flag");
    assert_eq!(args[f_pos + 1], "137+bestaudio/best");
    assert!(args.contains(&"--merge-output-format".to_string()));
    assert!(args.contains(&"--progress-template".to_string()));
    assert_eq!(args.last().unwrap(), "https://www.youtube.com/watch?v=xyz");
}

#[test]
fn audio_selection_drives_the_invocation() {
    let temp = TempDir::new().expect("temp dir");
    let info = sample_info();

    let output_dir = prepare_output_dir(temp.path().to_str().unwrap()).expect("output dir");
    let request = DownloadRequest::new(
        info.url.clone(),
        &info.title,
        output_dir,
        DownloadMode::Audio {
            bitrate: AudioBitrate::Kbps192,
        },
    );

    assert_eq!(request.expected_output().extension().unwrap(), "mp3");

    let args = build_args(&request);
    assert!(args.contains(&"-x".to_string()));
    assert!(args.contains(&"--audio-format".to_string()));
    let q_pos = args
        .iter()
        .position(|a| a == "--audio-quality")
        .expect("quality flag");
    assert_eq!(args[q_pos + 1], "192");
    // Video-only flags never leak into audio runs
    assert!(!args.contains(&"--merge-output-format".to_string()));
}

#[test]
fn two_requests_for_the_same_title_get_distinct_stems() {
    let dir = PathBuf::from("/tmp");
    let a = DownloadRequest::new(
        "https://example.com/v".into(),
        "Same Title",
        dir.clone(),
        DownloadMode::Video {
            selector: "22".into(),
        },
    );
    std::thread::sleep(std::time::Duration::from_millis(1100));
    let b = DownloadRequest::new(
        "https://example.com/v".into(),
        "Same Title",
        dir,
        DownloadMode::Video {
            selector: "22".into(),
        },
    );

    // Timestamp suffix has second granularity
    assert_ne!(a.stem, b.stem);
}

#[test]
fn output_dir_preparation_is_idempotent() {
    let temp = TempDir::new().expect("temp dir");
    let nested = temp.path().join("videos");

    let first = prepare_output_dir(nested.to_str().unwrap()).expect("first");
    let second = prepare_output_dir(nested.to_str().unwrap()).expect("second");

    assert_eq!(first, second);
    assert!(first.is_dir());
}
