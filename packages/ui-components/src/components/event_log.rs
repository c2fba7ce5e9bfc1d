//! Scrolling list of recent button notifications

use iced::widget::{column, text, Column};
use iced::Element;
use std::collections::VecDeque;

/// Entries kept before the oldest is dropped
pub const MAX_LOG_ENTRIES: usize = 12;

#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    /// Wall-clock time, already formatted for display
    pub time: String,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct EventLog {
    entries: VecDeque<LogEntry>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, time: impl Into<String>, message: impl Into<String>) {
        if self.entries.len() == MAX_LOG_ENTRIES {
            self.entries.pop_front();
        }
        self.entries.push_back(LogEntry {
            time: time.into(),
            message: message.into(),
        });
    }

    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Newest entries first
    pub fn view<'a, Message: 'a>(&'a self) -> Element<'a, Message> {
        if self.entries.is_empty() {
            return text("Tap for a photo, hold to record")
                .size(14)
                .style(iced::theme::Text::Color(iced::Color::from_rgb(
                    0.6, 0.6, 0.6,
                )))
                .into();
        }

        let rows: Column<'a, Message> = self
            .entries
            .iter()
            .rev()
            .fold(column![].spacing(4), |col, entry| {
                col.push(
                    text(format!("{}  {}", entry.time, entry.message))
                        .size(14)
                        .style(iced::theme::Text::Color(iced::Color::from_rgb(
                            0.8, 0.8, 0.8,
                        ))),
                )
            });

        rows.into()
    }
}
