//! URL input row with paste and clear actions

use iced::widget::{button, column, row, text, text_input};
use iced::{Element, Length};

use crate::gui::app::Message;
use crate::gui::theme;

/// URL entry with paste/clear buttons and an inline validation error
pub fn url_input(value: &str, error: Option<&str>, enabled: bool) -> Element<'static, Message> {
    let input_style: iced::theme::TextInput = if error.is_some() {
        iced::theme::TextInput::Custom(Box::new(theme::InputErrorStyle))
    } else {
        iced::theme::TextInput::Custom(Box::new(theme::InputStyle))
    };

    let mut input = text_input("Paste a video URL (YouTube, Vimeo, ...)", value)
        .size(16)
        .padding([12, 16])
        .style(input_style)
        .width(Length::Fill);

    if enabled {
        input = input
            .on_input(Message::UrlInputChanged)
            .on_submit(Message::FetchPressed);
    }

    let paste_button = button(text("Paste").size(14))
        .padding([12, 18])
        .style(iced::theme::Button::Custom(Box::new(theme::SecondaryButton)))
        .on_press_maybe(enabled.then_some(Message::PasteFromClipboard));

    let clear_button = button(text("Clear").size(14))
        .padding([12, 18])
        .style(iced::theme::Button::Custom(Box::new(theme::SecondaryButton)))
        .on_press_maybe((enabled && !value.is_empty()).then_some(Message::ClearUrlInput));

    let input_row = row![input, paste_button, clear_button].spacing(8);

    let mut content = column![input_row].spacing(6);
    if let Some(error) = error {
        content = content.push(
            text(error.to_string())
                .size(13)
                .style(iced::theme::Text::Color(theme::DANGER)),
        );
    }

    content.into()
}
