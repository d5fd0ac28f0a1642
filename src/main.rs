//! Tubefetch - desktop frontend for yt-dlp
//!
//! Launches the GUI by default; `--probe <url>` fetches metadata headlessly
//! and prints the download options, which is handy for checking that yt-dlp
//! works before filing a bug against the GUI.

use anyhow::Result;
use clap::Parser;
use iced::Application;
use tubefetch::extractor::{build_format_options, find_ytdlp, VideoExtractor};
use tubefetch::gui;
use tubefetch::utils::format::{format_duration, format_filesize};

#[derive(Parser)]
#[command(name = "tubefetch", about = "Desktop video downloader built on yt-dlp")]
struct Args {
    /// Fetch metadata for a URL and print the format options, without a GUI
    #[arg(long)]
    probe: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt::init();

    check_ytdlp_installed();

    if let Some(url) = args.probe {
        let rt = tokio::runtime::Runtime::new()?;
        rt.block_on(probe(url))?;
        return Ok(());
    }

    gui::TubefetchApp::run(iced::Settings {
        window: iced::window::Settings {
            size: iced::Size::new(860.0, 680.0),
            min_size: Some(iced::Size::new(720.0, 560.0)),
            ..Default::default()
        },
        antialiasing: true,
        ..Default::default()
    })?;

    Ok(())
}

/// Warn early when yt-dlp is missing. The app still launches; the user sees
/// the error again when they try to fetch a URL.
fn check_ytdlp_installed() {
    match find_ytdlp() {
        Some(path) => tracing::info!("yt-dlp found at {}", path.display()),
        None => {
            eprintln!("WARNING: yt-dlp not found in PATH or common locations.");
            eprintln!("The app will run, but fetching and downloading will fail.");
            eprintln!("Install it with: pip install yt-dlp  (or your package manager)");
        }
    }
}

async fn probe(url: String) -> Result<()> {
    let extractor = VideoExtractor::new()?;
    let info = extractor.extract_info(&url).await?;

    println!("Title:    {}", info.title);
    if let Some(uploader) = &info.uploader {
        println!("Uploader: {}", uploader);
    }
    println!("Duration: {}", format_duration(info.duration_secs()));

    let options = build_format_options(&info);
    if options.is_empty() {
        println!("No downloadable video formats (audio-only download still possible)");
    } else {
        println!("Formats:");
        for option in options {
            println!(
                "  {:>5}p  {:>5}  {:>12}  selector: {}",
                option.height,
                option.ext,
                format_filesize(option.filesize),
                option.selector()
            );
        }
    }

    Ok(())
}
