//! Card showing fetched video metadata and the format picker

use iced::widget::{checkbox, column, container, image, pick_list, row, text, Space};
use iced::{Alignment, Element, Length};

use crate::extractor::models::{FormatOption, VideoInfo};
use crate::gui::app::Message;
use crate::gui::theme;
use crate::utils::config::AudioBitrate;
use crate::utils::format::format_duration;

pub fn video_card(
    video: &VideoInfo,
    thumbnail: Option<&image::Handle>,
    options: &[FormatOption],
    selected: Option<&FormatOption>,
    audio_only: bool,
    bitrate: AudioBitrate,
) -> Element<'static, Message> {
    let thumb: Element<'static, Message> = match thumbnail {
        Some(handle) => image(handle.clone())
            .width(Length::Fixed(220.0))
            .height(Length::Fixed(124.0))
            .into(),
        None => container(
            text("No preview")
                .size(13)
                .style(iced::theme::Text::Color(theme::TEXT_MUTED)),
        )
        .width(Length::Fixed(220.0))
        .height(Length::Fixed(124.0))
        .center_x()
        .center_y()
        .style(iced::theme::Container::Custom(Box::new(
            theme::SidebarContainer,
        )))
        .into(),
    };

    let mut meta_line = String::new();
    if let Some(uploader) = &video.uploader {
        meta_line.push_str(uploader);
        meta_line.push_str("  ·  ");
    }
    meta_line.push_str(&format_duration(video.duration_secs()));

    // Format picker only applies to video downloads; audio-only ignores it
    let selection: Element<'static, Message> = if audio_only {
        text(format!("Best audio, converted to mp3 at {}", bitrate))
            .size(14)
            .style(iced::theme::Text::Color(theme::TEXT_SECONDARY))
            .into()
    } else if options.is_empty() {
        text("No downloadable video formats found. Try audio only.")
            .size(14)
            .style(iced::theme::Text::Color(theme::WARNING))
            .into()
    } else {
        pick_list(options.to_vec(), selected.cloned(), Message::FormatSelected)
            .placeholder("Choose a resolution")
            .text_size(14)
            .padding([8, 12])
            .width(Length::Fixed(280.0))
            .into()
    };

    let details = column![
        text(video.title.clone()).size(18),
        text(meta_line)
            .size(14)
            .style(iced::theme::Text::Color(theme::TEXT_SECONDARY)),
        Space::with_height(4),
        selection,
        checkbox("Audio only (mp3)", audio_only).on_toggle(Message::AudioOnlyToggled),
    ]
    .spacing(8)
    .width(Length::Fill);

    container(
        row![thumb, details]
            .spacing(20)
            .align_items(Alignment::Start),
    )
    .padding(20)
    .width(Length::Fill)
    .style(iced::theme::Container::Custom(Box::new(
        theme::PanelContainer,
    )))
    .into()
}
