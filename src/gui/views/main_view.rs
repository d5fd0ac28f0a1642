//! Main view: URL entry, fetched video card, download progress

use iced::widget::{button, column, container, row, text, Space};
use iced::{Alignment, Element, Length};

use crate::gui::app::{Message, Phase, TubefetchApp};
use crate::gui::components::{progress_panel, url_input, video_card};
use crate::gui::theme;

pub fn main_view(app: &TubefetchApp) -> Element<'static, Message> {
    let busy = matches!(
        app.phase,
        Phase::Fetching | Phase::Downloading | Phase::Processing
    );

    let fetch_button = button(
        text(if app.phase == Phase::Fetching {
            "Fetching..."
        } else {
            "Fetch info"
        })
        .size(16),
    )
    .padding([14, 28])
    .style(iced::theme::Button::Custom(Box::new(theme::PrimaryButton)))
    .on_press_maybe((!app.url_input.trim().is_empty() && !busy).then_some(Message::FetchPressed));

    let hero = container(
        column![
            text("Download a video").size(26),
            url_input(&app.url_input, app.url_error.as_deref(), !busy),
            row![
                text(format!("Saving to {}", app.settings.download_dir.display()))
                    .size(13)
                    .style(iced::theme::Text::Color(theme::TEXT_MUTED)),
                button(text("Change").size(12))
                    .padding([6, 12])
                    .style(iced::theme::Button::Custom(Box::new(theme::SecondaryButton)))
                    .on_press(Message::BrowseDownloadDir),
                Space::with_width(Length::Fill),
                fetch_button,
            ]
            .spacing(10)
            .align_items(Alignment::Center),
        ]
        .spacing(16),
    )
    .padding(24)
    .width(Length::Fill)
    .style(iced::theme::Container::Custom(Box::new(
        theme::PanelContainer,
    )));

    let mut content = column![hero].spacing(20);

    if let Some(video) = &app.video {
        content = content.push(video_card(
            video,
            app.thumbnail.as_ref(),
            &app.format_options,
            app.selected_format.as_ref(),
            app.audio_only,
            app.settings.audio_bitrate,
        ));

        let can_download = !busy && (app.audio_only || app.selected_format.is_some());
        let download_button = button(text("Download").size(16))
            .padding([14, 32])
            .style(iced::theme::Button::Custom(Box::new(theme::PrimaryButton)))
            .on_press_maybe(can_download.then_some(Message::DownloadPressed));

        content = content.push(
            row![Space::with_width(Length::Fill), download_button].align_items(Alignment::Center),
        );
    }

    match &app.phase {
        Phase::Downloading | Phase::Processing => {
            content = content.push(progress_panel(
                app.progress_downloaded,
                app.progress_total,
                app.progress_speed,
                app.progress_eta,
                app.phase == Phase::Processing,
            ));
        }
        Phase::Done => {
            if let Some(path) = &app.completed_path {
                content = content.push(completion_panel(path));
            }
        }
        Phase::Failed(error) => {
            content = content.push(
                container(
                    text(error.clone())
                        .size(14)
                        .style(iced::theme::Text::Color(theme::DANGER)),
                )
                .padding(16)
                .width(Length::Fill)
                .style(iced::theme::Container::Custom(Box::new(
                    theme::PanelContainer,
                ))),
            );
        }
        _ => {}
    }

    if !app.log_lines.is_empty() {
        // Last few activity lines, newest at the bottom
        let mut log = column![].spacing(2);
        let start = app.log_lines.len().saturating_sub(6);
        for line in &app.log_lines[start..] {
            log = log.push(
                text(line.clone())
                    .size(12)
                    .style(iced::theme::Text::Color(theme::TEXT_SECONDARY)),
            );
        }
        content = content.push(
            container(log)
                .padding([10, 16])
                .width(Length::Fill)
                .style(iced::theme::Container::Custom(Box::new(
                    theme::PanelContainer,
                ))),
        );
    }

    content = content.push(Space::with_height(Length::Fill));
    content = content.push(
        text(app.status_message.clone())
            .size(13)
            .style(iced::theme::Text::Color(theme::TEXT_MUTED)),
    );

    content.width(Length::Fill).height(Length::Fill).into()
}

fn completion_panel(path: &std::path::Path) -> Element<'static, Message> {
    container(
        row![
            text(format!("Saved to {}", path.display()))
                .size(14)
                .style(iced::theme::Text::Color(theme::SUCCESS)),
            Space::with_width(Length::Fill),
            button(text("Open file").size(14))
                .padding([10, 18])
                .style(iced::theme::Button::Custom(Box::new(theme::SecondaryButton)))
                .on_press(Message::OpenCompletedFile),
            button(text("Open folder").size(14))
                .padding([10, 18])
                .style(iced::theme::Button::Custom(Box::new(theme::SecondaryButton)))
                .on_press(Message::OpenDownloadFolder),
        ]
        .spacing(12)
        .align_items(Alignment::Center),
    )
    .padding(16)
    .width(Length::Fill)
    .style(iced::theme::Container::Custom(Box::new(
        theme::PanelContainer,
    )))
    .into()
}
