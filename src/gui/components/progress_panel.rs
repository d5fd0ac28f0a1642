//! Progress panel shown while a download is running

use iced::widget::{button, column, container, progress_bar, row, text, Space};
use iced::{Alignment, Element, Length};

use crate::gui::app::Message;
use crate::gui::theme;
use crate::utils::format::{format_duration, format_filesize, format_speed};

pub fn progress_panel(
    downloaded: u64,
    total: Option<u64>,
    speed: Option<f64>,
    eta: Option<u64>,
    processing: bool,
) -> Element<'static, Message> {
    let fraction = match total {
        Some(total) if total > 0 => (downloaded as f32 / total as f32).clamp(0.0, 1.0),
        _ => 0.0,
    };

    // Post-processing has no byte counter; show a full bar with a label
    let (bar_value, label) = if processing {
        (1.0, "Processing (merging / converting)...".to_string())
    } else if total.is_some() {
        (fraction, format!("{:.0}%", fraction * 100.0))
    } else {
        (0.0, format_filesize(Some(downloaded)))
    };

    let bar_style: iced::theme::ProgressBar = if processing || bar_value >= 1.0 {
        iced::theme::ProgressBar::Custom(Box::new(theme::ProgressBarCompleted))
    } else {
        iced::theme::ProgressBar::Custom(Box::new(theme::ProgressBarStyle))
    };

    let bar = progress_bar(0.0..=1.0, bar_value)
        .height(Length::Fixed(10.0))
        .style(bar_style);

    let stats = row![
        text(label).size(14),
        Space::with_width(Length::Fill),
        text(format!(
            "{} / {}",
            format_filesize(Some(downloaded)),
            format_filesize(total)
        ))
        .size(13)
        .style(iced::theme::Text::Color(theme::TEXT_SECONDARY)),
        text(format_speed(speed))
            .size(13)
            .style(iced::theme::Text::Color(theme::TEXT_SECONDARY)),
        text(match eta {
            Some(eta) if !processing => format!("ETA {}", format_duration(Some(eta))),
            _ => String::new(),
        })
        .size(13)
        .style(iced::theme::Text::Color(theme::TEXT_SECONDARY)),
    ]
    .spacing(16)
    .align_items(Alignment::Center);

    let cancel = button(text("Cancel").size(14))
        .padding([10, 20])
        .style(iced::theme::Button::Custom(Box::new(
            theme::DestructiveButton,
        )))
        .on_press(Message::CancelPressed);

    container(
        column![
            bar,
            stats,
            row![Space::with_width(Length::Fill), cancel],
        ]
        .spacing(12),
    )
    .padding(20)
    .width(Length::Fill)
    .style(iced::theme::Container::Custom(Box::new(
        theme::PanelContainer,
    )))
    .into()
}
