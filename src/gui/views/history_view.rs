//! History view: completed downloads, newest first

use iced::widget::{button, column, container, row, scrollable, text, Space};
use iced::{Alignment, Element, Length};

use crate::gui::app::{Message, TubefetchApp};
use crate::gui::components::history_item;
use crate::gui::theme;

pub fn history_view(app: &TubefetchApp) -> Element<'static, Message> {
    let header = row![
        text("History").size(26),
        Space::with_width(Length::Fill),
        button(text("Refresh").size(14))
            .padding([10, 18])
            .style(iced::theme::Button::Custom(Box::new(theme::SecondaryButton)))
            .on_press(Message::RefreshHistory),
    ]
    .align_items(Alignment::Center);

    let list: Element<'static, Message> = if app.history.is_empty() {
        container(
            column![
                text("No downloads yet")
                    .size(16)
                    .style(iced::theme::Text::Color(theme::TEXT_SECONDARY)),
                text("Finished downloads will show up here")
                    .size(13)
                    .style(iced::theme::Text::Color(theme::TEXT_MUTED)),
            ]
            .spacing(8)
            .align_items(Alignment::Center),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x()
        .center_y()
        .into()
    } else {
        let mut items = column![].spacing(12);
        for entry in &app.history {
            items = items.push(history_item(entry));
        }

        scrollable(items)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(iced::theme::Scrollable::Custom(Box::new(
                theme::ScrollableStyle,
            )))
            .into()
    };

    column![header, list]
        .spacing(20)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
