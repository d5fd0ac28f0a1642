//! Main GUI application
//!
//! State machine for a single download at a time: fetch metadata for the
//! pasted URL, let the user pick a format (or audio only), then run yt-dlp
//! in the background and drain its progress events on a timer tick.

use std::path::PathBuf;
use std::time::Duration;

use iced::widget::image;
use iced::widget::{button, column, container, row, text, Space};
use iced::{Application, Command, Element, Length, Subscription, Theme};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::database::{initialize_database, HistoryEntry, HistoryStore};
use crate::downloader::{DownloadEvent, DownloadMode, DownloadRequest, DownloadRunner};
use crate::extractor::models::{build_format_options, FormatOption, VideoInfo};
use crate::extractor::VideoExtractor;
use crate::gui::clipboard;
use crate::gui::theme;
use crate::gui::views::{history_view, main_view, settings_view};
use crate::utils::config::{prepare_output_dir, AppSettings, AudioBitrate};
use crate::utils::error::TubefetchError;
use crate::utils::format::is_valid_video_url;

const HISTORY_LIMIT: i64 = 50;

/// Application state
pub struct TubefetchApp {
    pub(crate) store: Option<HistoryStore>,
    pub(crate) settings: AppSettings,

    pub(crate) current_view: View,
    pub(crate) url_input: String,
    pub(crate) url_error: Option<String>,
    pub(crate) status_message: String,
    pub(crate) phase: Phase,

    // Fetched video
    pub(crate) video: Option<VideoInfo>,
    pub(crate) format_options: Vec<FormatOption>,
    pub(crate) selected_format: Option<FormatOption>,
    pub(crate) audio_only: bool,
    pub(crate) thumbnail: Option<image::Handle>,

    // Active download
    pub(crate) progress_downloaded: u64,
    pub(crate) progress_total: Option<u64>,
    pub(crate) progress_speed: Option<f64>,
    pub(crate) progress_eta: Option<u64>,
    progress_rx: Option<mpsc::Receiver<DownloadEvent>>,
    cancel: Option<CancellationToken>,
    pub(crate) completed_path: Option<PathBuf>,

    pub(crate) history: Vec<HistoryEntry>,

    // Short activity log shown under the progress panel
    pub(crate) log_lines: Vec<String>,

    // Settings view scratch value, applied on save
    pub(crate) download_dir_input: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Main,
    History,
    Settings,
}

/// Lifecycle of the one allowed download
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Idle,
    Fetching,
    Downloading,
    Processing,
    Done,
    Failed(String),
}

/// Everything loaded asynchronously at startup
#[derive(Debug, Clone)]
pub struct Bootstrap {
    store: HistoryStore,
    settings: AppSettings,
    history: Vec<HistoryEntry>,
}

/// Result of a finished download task
#[derive(Debug, Clone)]
pub enum DownloadOutcome {
    Finished(PathBuf),
    Cancelled,
    Failed(String),
}

#[derive(Debug, Clone)]
pub enum Message {
    Bootstrapped(Result<Bootstrap, String>),

    // URL entry
    UrlInputChanged(String),
    PasteFromClipboard,
    ClearUrlInput,

    // Metadata fetch
    FetchPressed,
    FetchCompleted(Result<VideoInfo, String>),
    ThumbnailLoaded(Result<Vec<u8>, String>),

    // Format selection
    FormatSelected(FormatOption),
    AudioOnlyToggled(bool),

    // Download
    DownloadPressed,
    CancelPressed,
    DownloadFinished(DownloadOutcome),
    Tick,

    // Finished file actions
    OpenCompletedFile,
    OpenDownloadFolder,
    OpenHistoryFile(PathBuf),
    OpenHistoryFolder(PathBuf),

    // Navigation and history
    SwitchView(View),
    RefreshHistory,
    HistoryLoaded(Result<Vec<HistoryEntry>, String>),

    // Settings
    DownloadDirChanged(String),
    BrowseDownloadDir,
    BitrateSelected(AudioBitrate),
    SaveSettings,
    SettingsSaved(Result<(), String>),
}

impl Application for TubefetchApp {
    type Executor = iced::executor::Default;
    type Message = Message;
    type Theme = Theme;
    type Flags = ();

    fn new(_flags: Self::Flags) -> (Self, Command<Message>) {
        let settings = AppSettings::default();
        let download_dir_input = settings.download_dir.to_string_lossy().to_string();

        let app = Self {
            store: None,
            settings,
            current_view: View::Main,
            url_input: String::new(),
            url_error: None,
            status_message: "Starting...".to_string(),
            phase: Phase::Idle,
            video: None,
            format_options: Vec::new(),
            selected_format: None,
            audio_only: false,
            thumbnail: None,
            progress_downloaded: 0,
            progress_total: None,
            progress_speed: None,
            progress_eta: None,
            progress_rx: None,
            cancel: None,
            completed_path: None,
            history: Vec::new(),
            log_lines: Vec::new(),
            download_dir_input,
        };

        (app, Command::perform(bootstrap(), Message::Bootstrapped))
    }

    fn title(&self) -> String {
        String::from("Tubefetch - Video Downloader")
    }

    fn update(&mut self, message: Message) -> Command<Message> {
        match message {
            Message::Bootstrapped(Ok(bootstrap)) => {
                self.download_dir_input = bootstrap.settings.download_dir.to_string_lossy().into();
                self.settings = bootstrap.settings;
                self.history = bootstrap.history;
                self.store = Some(bootstrap.store);
                self.status_message = "Ready".to_string();
                Command::none()
            }

            Message::Bootstrapped(Err(e)) => {
                // Downloads still work, only history/settings persistence is gone
                warn!("Database unavailable: {}", e);
                self.status_message = format!("History unavailable: {}", e);
                Command::none()
            }

            Message::UrlInputChanged(url) => {
                self.url_input = url;
                self.url_error = None;
                Command::none()
            }

            Message::PasteFromClipboard => {
                match clipboard::get_clipboard_content() {
                    Ok(content) => {
                        self.url_input = content.trim().to_string();
                        self.url_error = None;
                    }
                    Err(e) => self.status_message = e,
                }
                Command::none()
            }

            Message::ClearUrlInput => {
                self.url_input.clear();
                self.url_error = None;
                Command::none()
            }

            Message::FetchPressed => {
                if !is_valid_video_url(&self.url_input) {
                    self.url_error = Some("Enter a valid http(s) video URL".to_string());
                    return Command::none();
                }

                self.phase = Phase::Fetching;
                self.status_message = "Fetching video info...".to_string();
                self.video = None;
                self.format_options.clear();
                self.selected_format = None;
                self.thumbnail = None;
                self.completed_path = None;

                let url = self.url_input.trim().to_string();
                self.push_log(format!("Fetching info for {}", url));
                Command::perform(fetch_info(url), Message::FetchCompleted)
            }

            Message::FetchCompleted(Ok(info)) => {
                self.phase = Phase::Idle;
                self.format_options = build_format_options(&info);
                self.selected_format = self.format_options.first().cloned();
                self.status_message = "Pick a format and download".to_string();
                self.push_log(format!("Fetched: {}", info.title));

                let thumbnail_url = info.thumbnail.clone();
                self.video = Some(info);

                match thumbnail_url {
                    Some(url) => Command::perform(fetch_thumbnail(url), Message::ThumbnailLoaded),
                    None => Command::none(),
                }
            }

            Message::FetchCompleted(Err(e)) => {
                self.phase = Phase::Idle;
                self.url_error = Some(friendly_fetch_error(&e));
                self.status_message = "Ready".to_string();
                Command::none()
            }

            Message::ThumbnailLoaded(result) => {
                match result {
                    Ok(bytes) => self.thumbnail = Some(image::Handle::from_memory(bytes)),
                    Err(e) => debug!("Thumbnail fetch failed: {}", e),
                }
                Command::none()
            }

            Message::FormatSelected(option) => {
                self.selected_format = Some(option);
                Command::none()
            }

            Message::AudioOnlyToggled(enabled) => {
                self.audio_only = enabled;
                Command::none()
            }

            Message::DownloadPressed => self.start_download(),

            Message::CancelPressed => {
                if let Some(token) = &self.cancel {
                    token.cancel();
                    self.status_message = "Cancelling...".to_string();
                }
                Command::none()
            }

            Message::DownloadFinished(outcome) => {
                self.progress_rx = None;
                self.cancel = None;

                match outcome {
                    DownloadOutcome::Finished(path) => {
                        self.phase = Phase::Done;
                        self.completed_path = Some(path.clone());
                        self.status_message = "Download complete".to_string();
                        self.push_log(format!("Saved to {}", path.display()));
                        self.record_history(path)
                    }
                    DownloadOutcome::Cancelled => {
                        self.phase = Phase::Idle;
                        self.status_message = "Download cancelled".to_string();
                        self.push_log("Cancelled");
                        Command::none()
                    }
                    DownloadOutcome::Failed(error) => {
                        self.status_message = "Download failed".to_string();
                        self.push_log(format!("Failed: {}", error));
                        self.phase = Phase::Failed(error);
                        Command::none()
                    }
                }
            }

            Message::Tick => {
                self.drain_progress();
                Command::none()
            }

            Message::OpenCompletedFile => {
                if let Some(path) = &self.completed_path {
                    self.open_path(path.clone());
                }
                Command::none()
            }

            Message::OpenDownloadFolder => {
                self.open_path(self.settings.download_dir.clone());
                Command::none()
            }

            Message::OpenHistoryFile(path) => {
                self.open_path(path);
                Command::none()
            }

            Message::OpenHistoryFolder(path) => {
                let folder = path.parent().map(PathBuf::from).unwrap_or(path);
                self.open_path(folder);
                Command::none()
            }

            Message::SwitchView(view) => {
                self.current_view = view;
                if view == View::History {
                    self.refresh_history()
                } else {
                    Command::none()
                }
            }

            Message::RefreshHistory => self.refresh_history(),

            Message::HistoryLoaded(result) => {
                match result {
                    Ok(entries) => self.history = entries,
                    Err(e) => self.status_message = format!("Could not load history: {}", e),
                }
                Command::none()
            }

            Message::DownloadDirChanged(dir) => {
                self.download_dir_input = dir;
                Command::none()
            }

            Message::BrowseDownloadDir => {
                // Applies immediately; the picked folder already exists
                if let Some(folder) = rfd::FileDialog::new().pick_folder() {
                    self.download_dir_input = folder.to_string_lossy().to_string();
                    self.settings.download_dir = folder;
                    return self.persist_settings();
                }
                Command::none()
            }

            Message::BitrateSelected(bitrate) => {
                self.settings.audio_bitrate = bitrate;
                Command::none()
            }

            Message::SaveSettings => {
                let dir = match prepare_output_dir(&self.download_dir_input) {
                    Ok(dir) => dir,
                    Err(e) => {
                        self.status_message = e.to_string();
                        return Command::none();
                    }
                };

                self.download_dir_input = dir.to_string_lossy().to_string();
                self.settings.download_dir = dir;
                self.persist_settings()
            }

            Message::SettingsSaved(result) => {
                self.status_message = match result {
                    Ok(()) => "Settings saved".to_string(),
                    Err(e) => format!("Could not save settings: {}", e),
                };
                Command::none()
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        let sidebar = container(
            column![
                container(text("Tubefetch").size(22)).padding([16, 12]),
                nav_button("Download", View::Main, self.current_view),
                nav_button("History", View::History, self.current_view),
                nav_button("Settings", View::Settings, self.current_view),
                Space::with_height(Length::Fill),
            ]
            .spacing(6)
            .padding(10),
        )
        .width(Length::Fixed(190.0))
        .height(Length::Fill)
        .style(iced::theme::Container::Custom(Box::new(
            theme::SidebarContainer,
        )));

        let content = match self.current_view {
            View::Main => main_view(self),
            View::History => history_view(self),
            View::Settings => settings_view(self),
        };

        let layout = row![
            sidebar,
            container(content)
                .width(Length::Fill)
                .height(Length::Fill)
                .padding(24),
        ];

        container(layout)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(iced::theme::Container::Custom(Box::new(
                theme::MainContainer,
            )))
            .into()
    }

    fn subscription(&self) -> Subscription<Message> {
        // Only poll the progress channel while a download is running
        match self.phase {
            Phase::Downloading | Phase::Processing => {
                iced::time::every(Duration::from_millis(200)).map(|_| Message::Tick)
            }
            _ => Subscription::none(),
        }
    }

    fn theme(&self) -> Self::Theme {
        Theme::Dark
    }
}

impl TubefetchApp {
    fn start_download(&mut self) -> Command<Message> {
        let Some(video) = &self.video else {
            return Command::none();
        };

        let mode = if self.audio_only {
            DownloadMode::Audio {
                bitrate: self.settings.audio_bitrate,
            }
        } else {
            match &self.selected_format {
                Some(option) => DownloadMode::Video {
                    selector: option.selector(),
                },
                None => return Command::none(),
            }
        };

        let output_dir = match prepare_output_dir(&self.settings.download_dir.to_string_lossy()) {
            Ok(dir) => dir,
            Err(e) => {
                let error = e.to_string();
                self.phase = Phase::Failed(error.clone());
                self.status_message = error;
                return Command::none();
            }
        };

        let runner = match DownloadRunner::new() {
            Ok(runner) => runner,
            Err(e) => {
                let error = e.to_string();
                self.phase = Phase::Failed(error.clone());
                self.status_message = error;
                return Command::none();
            }
        };

        let request = DownloadRequest::new(video.url.clone(), &video.title, output_dir, mode);

        let (tx, rx) = mpsc::channel(64);
        let token = CancellationToken::new();

        self.progress_downloaded = 0;
        self.progress_total = if self.audio_only {
            None
        } else {
            self.selected_format.as_ref().and_then(|f| f.filesize)
        };
        self.progress_speed = None;
        self.progress_eta = None;
        self.progress_rx = Some(rx);
        self.cancel = Some(token.clone());
        self.completed_path = None;
        self.phase = Phase::Downloading;
        self.status_message = format!("Downloading {}", video.title);
        let kind = if self.audio_only { "audio" } else { "video" };
        self.push_log(format!("Starting {} download", kind));

        Command::perform(
            async move {
                match runner.run(request, tx, token).await {
                    Ok(path) => DownloadOutcome::Finished(path),
                    Err(e) => match e.downcast_ref::<TubefetchError>() {
                        Some(TubefetchError::Cancelled) => DownloadOutcome::Cancelled,
                        _ => DownloadOutcome::Failed(e.to_string()),
                    },
                }
            },
            Message::DownloadFinished,
        )
    }

    fn drain_progress(&mut self) {
        let mut events = Vec::new();
        if let Some(rx) = self.progress_rx.as_mut() {
            while let Ok(event) = rx.try_recv() {
                events.push(event);
            }
        }

        for event in events {
            match event {
                DownloadEvent::Progress {
                    downloaded,
                    total,
                    speed,
                    eta,
                } => {
                    // A new stream may start after post-processing markers when
                    // video and audio are fetched separately
                    self.phase = Phase::Downloading;
                    self.progress_downloaded = downloaded;
                    if total.is_some() {
                        self.progress_total = total;
                    }
                    self.progress_speed = speed;
                    self.progress_eta = eta;
                }
                DownloadEvent::Destination(path) => {
                    debug!("Writing to {}", path.display());
                    self.push_log(format!("Writing {}", path.display()));
                }
                DownloadEvent::Processing => {
                    if self.phase != Phase::Processing {
                        self.push_log("Post-processing (merge / convert)");
                    }
                    self.phase = Phase::Processing;
                }
            }
        }
    }

    fn record_history(&self, path: PathBuf) -> Command<Message> {
        let (Some(store), Some(video)) = (&self.store, &self.video) else {
            return Command::none();
        };

        let store = store.clone();
        let title = video.title.clone();
        let url = video.url.clone();
        let kind = if self.audio_only { "audio" } else { "video" };

        Command::perform(
            async move {
                store
                    .add_entry(&title, &url, &path, kind)
                    .await
                    .map_err(|e| e.to_string())?;
                store.recent(HISTORY_LIMIT).await.map_err(|e| e.to_string())
            },
            Message::HistoryLoaded,
        )
    }

    fn refresh_history(&self) -> Command<Message> {
        match &self.store {
            Some(store) => {
                let store = store.clone();
                Command::perform(
                    async move { store.recent(HISTORY_LIMIT).await.map_err(|e| e.to_string()) },
                    Message::HistoryLoaded,
                )
            }
            None => Command::none(),
        }
    }

    fn persist_settings(&mut self) -> Command<Message> {
        match &self.store {
            Some(store) => {
                let store = store.clone();
                let settings = self.settings.clone();
                Command::perform(
                    async move {
                        store
                            .save_settings(&settings)
                            .await
                            .map_err(|e| e.to_string())
                    },
                    Message::SettingsSaved,
                )
            }
            None => {
                self.status_message = "Settings applied (not persisted)".to_string();
                Command::none()
            }
        }
    }

    fn push_log(&mut self, line: impl Into<String>) {
        self.log_lines.push(line.into());
        if self.log_lines.len() > 50 {
            self.log_lines.remove(0);
        }
    }

    fn open_path(&mut self, path: PathBuf) {
        if let Err(e) = open::that(&path) {
            self.status_message = format!("Could not open {}: {}", path.display(), e);
        }
    }
}

fn nav_button(label: &str, target: View, current: View) -> Element<'static, Message> {
    let style = if current == target {
        theme::SidebarButtonStyle::Active
    } else {
        theme::SidebarButtonStyle::Inactive
    };

    button(text(label.to_string()).size(15))
        .style(iced::theme::Button::Custom(Box::new(style)))
        .width(Length::Fill)
        .padding([10, 14])
        .on_press(Message::SwitchView(target))
        .into()
}

async fn bootstrap() -> Result<Bootstrap, String> {
    let db_path = dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tubefetch")
        .join("tubefetch.db");

    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| e.to_string())?;
    }

    let pool = initialize_database(&db_path.to_string_lossy())
        .await
        .map_err(|e| e.to_string())?;
    let store = HistoryStore::new(pool);

    let settings = store.load_settings().await.map_err(|e| e.to_string())?;
    let history = store.recent(HISTORY_LIMIT).await.map_err(|e| e.to_string())?;

    Ok(Bootstrap {
        store,
        settings,
        history,
    })
}

async fn fetch_info(url: String) -> Result<VideoInfo, String> {
    let extractor = VideoExtractor::new().map_err(|e| e.to_string())?;
    extractor.extract_info(&url).await.map_err(|e| e.to_string())
}

async fn fetch_thumbnail(url: String) -> Result<Vec<u8>, String> {
    let response = reqwest::get(&url)
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| e.to_string())?;

    let bytes = response.bytes().await.map_err(|e| e.to_string())?;
    Ok(bytes.to_vec())
}

/// Map raw yt-dlp stderr to something a user can act on
fn friendly_fetch_error(error: &str) -> String {
    let lower = error.to_lowercase();

    if lower.contains("yt-dlp not found") {
        "yt-dlp is not installed. Install it with pip or your package manager".to_string()
    } else if lower.contains("unsupported url") || lower.contains("is not a valid url") {
        "This site is not supported".to_string()
    } else if lower.contains("unavailable") || lower.contains("not found") {
        "This video is not available or has been removed".to_string()
    } else if lower.contains("private") || lower.contains("sign in") {
        "This video is private or requires signing in".to_string()
    } else if lower.contains("network")
        || lower.contains("connection")
        || lower.contains("timed out")
    {
        "Unable to connect. Check your internet connection".to_string()
    } else {
        format!("Could not fetch video info: {}", error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_errors_are_translated() {
        assert!(friendly_fetch_error("ERROR: Video unavailable").contains("not available"));
        assert!(friendly_fetch_error("yt-dlp not found. Please install yt-dlp")
            .contains("not installed"));
        assert!(
            friendly_fetch_error("ERROR: Unsupported URL: https://example.com")
                .contains("not supported")
        );
        assert!(friendly_fetch_error("Private video. Sign in").contains("private"));
    }

    #[test]
    fn unknown_errors_keep_the_original_text() {
        let message = friendly_fetch_error("something odd happened");
        assert!(message.contains("something odd happened"));
    }
}
