//! One row in the history list

use iced::widget::{button, column, container, row, text, Space};
use iced::{Alignment, Element, Length};

use crate::database::HistoryEntry;
use crate::gui::app::Message;
use crate::gui::theme;

pub fn history_item(entry: &HistoryEntry) -> Element<'static, Message> {
    let kind_color = if entry.kind == "audio" {
        theme::WARNING
    } else {
        theme::ACCENT
    };

    let header = row![
        text(entry.title.clone()).size(15),
        Space::with_width(Length::Fill),
        text(entry.kind.clone())
            .size(12)
            .style(iced::theme::Text::Color(kind_color)),
    ]
    .align_items(Alignment::Center);

    let when = entry
        .created_at
        .with_timezone(&chrono::Local)
        .format("%Y-%m-%d %H:%M")
        .to_string();

    let details = row![
        text(when)
            .size(12)
            .style(iced::theme::Text::Color(theme::TEXT_MUTED)),
        text(entry.path.to_string_lossy().to_string())
            .size(12)
            .style(iced::theme::Text::Color(theme::TEXT_SECONDARY)),
        Space::with_width(Length::Fill),
        button(text("Open").size(12))
            .padding([6, 12])
            .style(iced::theme::Button::Custom(Box::new(theme::SecondaryButton)))
            .on_press(Message::OpenHistoryFile(entry.path.clone())),
        button(text("Folder").size(12))
            .padding([6, 12])
            .style(iced::theme::Button::Custom(Box::new(theme::SecondaryButton)))
            .on_press(Message::OpenHistoryFolder(entry.path.clone())),
    ]
    .spacing(12)
    .align_items(Alignment::Center);

    container(column![header, details].spacing(6))
        .padding([12, 16])
        .width(Length::Fill)
        .style(iced::theme::Container::Custom(Box::new(
            theme::PanelContainer,
        )))
        .into()
}
