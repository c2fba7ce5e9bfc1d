//! Main view: capture button, event log and settings side by side

use crate::app::{format_duration, Message, ShutterApp};
use iced::{
    widget::{button, column, container, row, text, Space},
    Alignment, Element, Length,
};
use shutter_ui::capture_button;

pub fn main_view(app: &ShutterApp) -> Element<'_, Message> {
    let content = row![
        capture_column(app),
        app.settings.view().map(Message::Settings),
    ]
    .spacing(20);

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(20)
        .into()
}

fn capture_column(app: &ShutterApp) -> Element<'_, Message> {
    let status = match app.recording_since {
        Some(since) => text(format!("Recording {}", format_duration(since.elapsed())))
            .size(16)
            .style(iced::theme::Text::Color(iced::Color::from_rgb(
                1.0, 0.3, 0.3,
            ))),
        None => text("Ready")
            .size(16)
            .style(iced::theme::Text::Color(iced::Color::from_rgb(
                0.6, 0.6, 0.6,
            ))),
    };

    let label = if app.is_recording() { "REC" } else { "" };
    let shutter = capture_button(label, app.is_recording(), Message::Pressed, Message::Released);

    let actions = row![
        button(text("Save settings").size(12))
            .padding([6, 12])
            .style(iced::theme::Button::Secondary)
            .on_press(Message::SaveSettings),
        button(text("Clear log").size(12))
            .padding([6, 12])
            .style(iced::theme::Button::Text)
            .on_press(Message::ClearLog),
    ]
    .spacing(8);

    column![
        shutter,
        status,
        Space::with_height(10),
        app.log.view(),
        Space::with_height(Length::Fill),
        actions,
    ]
    .spacing(12)
    .width(Length::Fill)
    .align_items(Alignment::Center)
    .into()
}
