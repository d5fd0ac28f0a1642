//! Settings view: download folder and audio bitrate

use iced::widget::{button, column, container, pick_list, row, text, text_input, Space};
use iced::{Alignment, Element, Length};

use crate::gui::app::{Message, TubefetchApp};
use crate::gui::theme;
use crate::utils::config::AudioBitrate;

pub fn settings_view(app: &TubefetchApp) -> Element<'static, Message> {
    let folder_section = column![
        text("Download folder").size(16),
        row![
            text_input("Folder for finished downloads", &app.download_dir_input)
                .size(14)
                .padding([10, 14])
                .style(iced::theme::TextInput::Custom(Box::new(theme::InputStyle)))
                .on_input(Message::DownloadDirChanged)
                .width(Length::Fill),
            button(text("Browse").size(14))
                .padding([10, 18])
                .style(iced::theme::Button::Custom(Box::new(theme::SecondaryButton)))
                .on_press(Message::BrowseDownloadDir),
        ]
        .spacing(8)
        .align_items(Alignment::Center),
    ]
    .spacing(8);

    let bitrate_section = column![
        text("Audio bitrate (mp3)").size(16),
        pick_list(
            AudioBitrate::ALL.to_vec(),
            Some(app.settings.audio_bitrate),
            Message::BitrateSelected,
        )
        .text_size(14)
        .padding([8, 12])
        .width(Length::Fixed(160.0)),
    ]
    .spacing(8);

    let save_row = row![
        Space::with_width(Length::Fill),
        button(text("Save settings").size(15))
            .padding([12, 26])
            .style(iced::theme::Button::Custom(Box::new(theme::PrimaryButton)))
            .on_press(Message::SaveSettings),
    ];

    let panel = container(
        column![folder_section, bitrate_section, save_row].spacing(24),
    )
    .padding(24)
    .width(Length::Fill)
    .style(iced::theme::Container::Custom(Box::new(
        theme::PanelContainer,
    )));

    column![
        text("Settings").size(26),
        panel,
        text(app.status_message.clone())
            .size(13)
            .style(iced::theme::Text::Color(theme::TEXT_MUTED)),
    ]
    .spacing(20)
    .width(Length::Fill)
    .height(Length::Fill)
    .into()
}
