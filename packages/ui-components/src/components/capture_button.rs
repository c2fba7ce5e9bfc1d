//! Round shutter button that reports raw press and release
//!
//! The widget does no gesture interpretation; it forwards pointer input so a
//! [`GestureButton`](shutter_core::GestureButton) can tell taps from holds.

use iced::widget::{container, mouse_area, text};
use iced::{alignment, Element, Length};

/// Outer diameter of the button in logical pixels
pub const CAPTURE_BUTTON_SIZE: f32 = 88.0;

/// Build the capture button.
///
/// `recording` switches the fill from white (photo) to red (video).
pub fn capture_button<'a, Message: Clone + 'a>(
    label: &'a str,
    recording: bool,
    on_press: Message,
    on_release: Message,
) -> Element<'a, Message> {
    let face = container(
        text(label)
            .size(14)
            .horizontal_alignment(alignment::Horizontal::Center)
            .style(iced::theme::Text::Color(if recording {
                iced::Color::WHITE
            } else {
                iced::Color::BLACK
            })),
    )
    .width(Length::Fixed(CAPTURE_BUTTON_SIZE))
    .height(Length::Fixed(CAPTURE_BUTTON_SIZE))
    .center_x()
    .center_y()
    .style(iced::theme::Container::Custom(Box::new(ShutterFace {
        recording,
    })));

    mouse_area(face)
        .on_press(on_press)
        .on_release(on_release)
        .into()
}

struct ShutterFace {
    recording: bool,
}

impl container::StyleSheet for ShutterFace {
    type Style = iced::Theme;

    fn appearance(&self, _style: &Self::Style) -> container::Appearance {
        let fill = if self.recording {
            iced::Color::from_rgb(0.9, 0.1, 0.1)
        } else {
            iced::Color::WHITE
        };

        container::Appearance {
            background: Some(iced::Background::Color(fill)),
            border: iced::Border {
                color: iced::Color::from_rgb(0.8, 0.8, 0.8),
                width: 4.0,
                radius: (CAPTURE_BUTTON_SIZE / 2.0).into(),
            },
            ..Default::default()
        }
    }
}
