//! Notification interface between the button and its host

use std::sync::Mutex;
use tokio::time::Instant;

/// Receiver of button notifications, implemented by the host.
///
/// The button only holds a weak reference, so a host that has been dropped
/// simply stops receiving calls.
pub trait ButtonDelegate: Send + Sync {
    /// A tap was recognized (photo capture)
    fn button_was_tapped(&self);

    /// A long press began (start video capture)
    fn button_did_begin_long_press(&self);

    /// The long press ended, was cancelled or failed (stop video capture)
    fn button_did_end_long_press(&self);

    /// The session ran for the maximum duration. The button does not end the
    /// session itself; the host decides whether to stop capturing.
    fn long_press_did_reach_maximum_duration(&self);

    /// Maximum session length in seconds, queried once per session start.
    /// Zero or negative means unlimited.
    fn maximum_video_duration(&self) -> f64;
}

/// A delegate notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEvent {
    Tapped,
    LongPressBegan,
    LongPressEnded,
    MaximumDurationReached,
}

impl ButtonEvent {
    pub fn label(&self) -> &'static str {
        match self {
            ButtonEvent::Tapped => "Photo",
            ButtonEvent::LongPressBegan => "Recording started",
            ButtonEvent::LongPressEnded => "Recording stopped",
            ButtonEvent::MaximumDurationReached => "Maximum duration reached",
        }
    }
}

/// Delegate that records every notification with the time it arrived
#[derive(Debug)]
pub struct EventRecorder {
    events: Mutex<Vec<(ButtonEvent, Instant)>>,
    maximum_duration: Mutex<f64>,
}

impl EventRecorder {
    /// Recorder with no session limit
    pub fn new() -> Self {
        Self::with_maximum_duration(0.0)
    }

    pub fn with_maximum_duration(seconds: f64) -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            maximum_duration: Mutex::new(seconds),
        }
    }

    pub fn set_maximum_duration(&self, seconds: f64) {
        if let Ok(mut value) = self.maximum_duration.lock() {
            *value = seconds;
        }
    }

    /// Recorded notifications in arrival order
    pub fn events(&self) -> Vec<ButtonEvent> {
        self.timeline().into_iter().map(|(event, _)| event).collect()
    }

    /// Recorded notifications with their timestamps
    pub fn timeline(&self) -> Vec<(ButtonEvent, Instant)> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Number of times `event` was delivered
    pub fn count(&self, event: ButtonEvent) -> usize {
        self.events().iter().filter(|e| **e == event).count()
    }

    /// Drain recorded notifications
    pub fn take(&self) -> Vec<(ButtonEvent, Instant)> {
        self.events
            .lock()
            .map(|mut events| std::mem::take(&mut *events))
            .unwrap_or_default()
    }

    fn record(&self, event: ButtonEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push((event, Instant::now()));
        }
    }
}

impl Default for EventRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl ButtonDelegate for EventRecorder {
    fn button_was_tapped(&self) {
        self.record(ButtonEvent::Tapped);
    }

    fn button_did_begin_long_press(&self) {
        self.record(ButtonEvent::LongPressBegan);
    }

    fn button_did_end_long_press(&self) {
        self.record(ButtonEvent::LongPressEnded);
    }

    fn long_press_did_reach_maximum_duration(&self) {
        self.record(ButtonEvent::MaximumDurationReached);
    }

    fn maximum_video_duration(&self) -> f64 {
        self.maximum_duration
            .lock()
            .map(|value| *value)
            .unwrap_or(0.0)
    }
}
