//! Settings panel for the capture button
//!
//! Edits a [`ButtonConfig`] plus the maximum recording length the host hands
//! to the button when a long press begins.

use iced::widget::{checkbox, column, container, slider, text, Space};
use iced::{Element, Length};
use shutter_core::ButtonConfig;
use std::time::Duration;

/// Messages from the settings panel
#[derive(Debug, Clone)]
pub enum SettingsMessage {
    EnabledChanged(bool),
    PhotoCaptureChanged(bool),
    VideoCaptureChanged(bool),
    MinimumPressChanged(u32),
    MaximumDurationChanged(f32),
}

/// Settings panel state
#[derive(Debug, Clone)]
pub struct SettingsPanel {
    config: ButtonConfig,
    /// Seconds; 0 means unlimited
    maximum_duration: f32,
}

impl SettingsPanel {
    pub fn new(config: ButtonConfig, maximum_duration: f32) -> Self {
        Self {
            config,
            maximum_duration,
        }
    }

    pub fn config(&self) -> &ButtonConfig {
        &self.config
    }

    pub fn maximum_duration(&self) -> f32 {
        self.maximum_duration
    }

    /// Record a settings change
    pub fn update(&mut self, message: SettingsMessage) {
        match message {
            SettingsMessage::EnabledChanged(enabled) => {
                self.config.enabled = enabled;
            }
            SettingsMessage::PhotoCaptureChanged(enabled) => {
                self.config.photo_capture_enabled = enabled;
            }
            SettingsMessage::VideoCaptureChanged(enabled) => {
                self.config.video_capture_enabled = enabled;
            }
            SettingsMessage::MinimumPressChanged(ms) => {
                self.config.minimum_press_duration = Duration::from_millis(ms as u64);
            }
            SettingsMessage::MaximumDurationChanged(seconds) => {
                self.maximum_duration = seconds.max(0.0);
            }
        }
    }

    /// Build the view
    pub fn view(&self) -> Element<'_, SettingsMessage> {
        let title = text("Button Settings")
            .size(18)
            .style(iced::theme::Text::Color(iced::Color::from_rgb(
                0.8, 0.8, 0.8,
            )));

        let enabled = checkbox("Button enabled", self.config.enabled)
            .on_toggle(SettingsMessage::EnabledChanged);
        let photo = checkbox("Photo capture", self.config.photo_capture_enabled)
            .on_toggle(SettingsMessage::PhotoCaptureChanged);
        let video = checkbox("Video capture", self.config.video_capture_enabled)
            .on_toggle(SettingsMessage::VideoCaptureChanged);

        let press_ms = self.config.minimum_press_duration.as_millis() as u32;
        let press_label = text(format!("Hold to record after: {}ms", press_ms))
            .size(14)
            .style(iced::theme::Text::Color(iced::Color::from_rgb(
                0.7, 0.7, 0.7,
            )));
        let press = slider(100.0..=2000.0, press_ms as f32, |v| {
            SettingsMessage::MinimumPressChanged(v as u32)
        })
        .step(50.0);

        let max_label = if self.maximum_duration > 0.0 {
            format!("Maximum recording: {:.0}s", self.maximum_duration)
        } else {
            "Maximum recording: unlimited".to_string()
        };
        let max_label = text(max_label)
            .size(14)
            .style(iced::theme::Text::Color(iced::Color::from_rgb(
                0.7, 0.7, 0.7,
            )));
        let max = slider(
            0.0..=60.0,
            self.maximum_duration,
            SettingsMessage::MaximumDurationChanged,
        )
        .step(1.0);

        let content = column![
            title,
            Space::with_height(10),
            enabled,
            photo,
            video,
            Space::with_height(10),
            press_label,
            press,
            max_label,
            max,
        ]
        .spacing(5)
        .width(Length::Fixed(280.0));

        container(content).padding(10).into()
    }
}

impl Default for SettingsPanel {
    fn default() -> Self {
        Self::new(ButtonConfig::default(), 0.0)
    }
}
