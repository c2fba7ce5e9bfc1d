//! Tap-for-photo, hold-for-video capture button
//!
//! [`GestureButton`] owns a tap detector and a long-press detector, turns the
//! gestures they recognize into delegate notifications, and bounds each
//! long-press session with an optional maximum-duration timer.
//!
//! The button is a plain state machine driven by its owner's event loop:
//! pointer input goes through [`GestureButton::handle_pointer`], and the owner
//! calls [`GestureButton::poll`] when [`GestureButton::next_deadline`] passes.

use std::sync::{Arc, Weak};
use std::time::{Duration, Instant};
use tracing::{debug, info, trace};
use uuid::Uuid;

use crate::config::ButtonConfig;
use crate::delegate::ButtonDelegate;
use crate::gesture::{GesturePhase, LongPressRecognizer, PointerEvent, TapRecognizer};
use crate::timer::MaxDurationTimer;

/// A long press between its begin and end notifications
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LongPressSession {
    pub id: Uuid,
    pub started_at: Instant,
}

pub struct GestureButton {
    delegate: Option<Weak<dyn ButtonDelegate>>,
    enabled: bool,
    photo_capture_enabled: bool,
    video_capture_enabled: bool,
    tap: TapRecognizer,
    long_press: LongPressRecognizer,
    tap_attached: bool,
    long_press_attached: bool,
    timer: MaxDurationTimer,
    session: Option<LongPressSession>,
}

impl GestureButton {
    pub fn new() -> Self {
        Self::with_config(ButtonConfig::default())
    }

    /// Build a button from initial values. Both detectors start attached; the
    /// capture flags are stored as-is without running their setters.
    pub fn with_config(config: ButtonConfig) -> Self {
        Self {
            delegate: None,
            enabled: config.enabled,
            photo_capture_enabled: config.photo_capture_enabled,
            video_capture_enabled: config.video_capture_enabled,
            tap: TapRecognizer::new(config.allowable_movement),
            long_press: LongPressRecognizer::new(
                config.minimum_press_duration,
                config.allowable_movement,
            ),
            tap_attached: true,
            long_press_attached: true,
            timer: MaxDurationTimer::new(),
            session: None,
        }
    }

    // Delegate

    /// Register the host. Only a weak reference is kept.
    pub fn set_delegate<D: ButtonDelegate + 'static>(&mut self, delegate: &Arc<D>) {
        let weak: Weak<D> = Arc::downgrade(delegate);
        self.delegate = Some(weak);
    }

    pub fn set_delegate_weak(&mut self, delegate: Weak<dyn ButtonDelegate>) {
        self.delegate = Some(delegate);
    }

    pub fn clear_delegate(&mut self) {
        self.delegate = None;
    }

    /// The delegate, if one is set and still alive
    fn delegate(&self) -> Option<Arc<dyn ButtonDelegate>> {
        self.delegate.as_ref().and_then(Weak::upgrade)
    }

    // Configuration

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        debug!("Button enabled: {}", enabled);
    }

    pub fn photo_capture_enabled(&self) -> bool {
        self.photo_capture_enabled
    }

    /// Runs on every assignment: `true` detaches the tap detector and
    /// `false` attaches it.
    pub fn set_photo_capture_enabled(&mut self, enabled: bool) {
        self.photo_capture_enabled = enabled;
        if enabled {
            self.tap_attached = false;
            self.tap.reset();
        } else {
            self.tap_attached = true;
        }
        debug!(
            "Photo capture enabled: {} (tap detector attached: {})",
            enabled, self.tap_attached
        );
    }

    pub fn video_capture_enabled(&self) -> bool {
        self.video_capture_enabled
    }

    /// Same pattern as [`Self::set_photo_capture_enabled`], for the
    /// long-press detector.
    pub fn set_video_capture_enabled(&mut self, enabled: bool) {
        self.video_capture_enabled = enabled;
        if enabled {
            self.long_press_attached = false;
            self.long_press.reset();
        } else {
            self.long_press_attached = true;
        }
        debug!(
            "Video capture enabled: {} (long-press detector attached: {})",
            enabled, self.long_press_attached
        );
    }

    pub fn minimum_press_duration(&self) -> Duration {
        self.long_press.minimum_press_duration()
    }

    pub fn set_minimum_press_duration(&mut self, duration: Duration) {
        self.long_press.set_minimum_press_duration(duration);
        debug!("Minimum press duration set to {:?}", duration);
    }

    pub fn allowable_movement(&self) -> f32 {
        self.tap.allowable_movement()
    }

    /// Movement, in pixels, that a press may drift before both detectors give
    /// up on it
    pub fn set_allowable_movement(&mut self, allowable_movement: f32) {
        self.tap.set_allowable_movement(allowable_movement);
        self.long_press.set_allowable_movement(allowable_movement);
        debug!("Allowable movement set to {}", allowable_movement);
    }

    pub fn is_tap_attached(&self) -> bool {
        self.tap_attached
    }

    pub fn is_long_press_attached(&self) -> bool {
        self.long_press_attached
    }

    pub fn is_timer_active(&self) -> bool {
        self.timer.is_active()
    }

    /// The long press currently in progress
    pub fn session(&self) -> Option<&LongPressSession> {
        self.session.as_ref()
    }

    // Event loop

    /// Route raw pointer input to the attached detectors
    pub fn handle_pointer(&mut self, event: PointerEvent, now: Instant) {
        if self.long_press_attached {
            if let Some(phase) = self.long_press.handle(event, now) {
                self.on_long_press(phase, now);
            }
        }

        if self.tap_attached && self.tap.handle(event) {
            self.on_tap();
        }
    }

    /// Fire whatever is due at `now`: the long-press threshold first, then
    /// the maximum-duration timer.
    pub fn poll(&mut self, now: Instant) {
        if self.long_press_attached {
            if let Some(phase) = self.long_press.poll(now) {
                // A recognized long press claims the touch
                self.tap.fail();
                self.on_long_press(phase, now);
            }
        }

        if self.timer.fire_if_due(now) {
            self.timer_finished();
        }
    }

    /// Earliest instant at which [`Self::poll`] has work to do
    pub fn next_deadline(&self) -> Option<Instant> {
        let threshold = if self.long_press_attached {
            self.long_press.deadline()
        } else {
            None
        };

        match (threshold, self.timer.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    // Gesture handlers

    pub fn on_tap(&mut self) {
        if !(self.enabled && self.photo_capture_enabled) {
            trace!("Tap ignored: photo capture unavailable");
            return;
        }

        debug!("Tap recognized");
        if let Some(delegate) = self.delegate() {
            delegate.button_was_tapped();
        }
    }

    pub fn on_long_press(&mut self, phase: GesturePhase, now: Instant) {
        if !(self.enabled && self.video_capture_enabled) {
            trace!("Long press {:?} ignored: video capture unavailable", phase);
            return;
        }

        match phase {
            GesturePhase::Began => self.long_press_start_action(now),
            phase if phase.is_terminal() => {
                if self.session.is_none() {
                    trace!("Long press {:?} ignored: no session in progress", phase);
                    return;
                }
                self.long_press_end_action();
            }
            _ => {}
        }
    }

    /// Begin a session: notify the host, then arm the maximum-duration timer
    pub fn long_press_start_action(&mut self, now: Instant) {
        let session = LongPressSession {
            id: Uuid::new_v4(),
            started_at: now,
        };
        info!("Long press session {} began", session.id);
        self.session = Some(session);

        if let Some(delegate) = self.delegate() {
            delegate.button_did_begin_long_press();
        }
        self.start_timer(now);
    }

    /// End a session: the timer is cleared before the host hears about it
    pub fn long_press_end_action(&mut self) {
        self.timer.invalidate();

        if let Some(session) = self.session.take() {
            info!("Long press session {} ended", session.id);
        }
        if let Some(delegate) = self.delegate() {
            delegate.button_did_end_long_press();
        }
    }

    fn start_timer(&mut self, now: Instant) {
        self.timer.invalidate();

        let Some(delegate) = self.delegate() else {
            trace!("No delegate, session is unbounded");
            return;
        };

        let seconds = delegate.maximum_video_duration();
        match Duration::try_from_secs_f64(seconds) {
            Ok(duration) if seconds > 0.0 => {
                if self.timer.schedule(duration, now) {
                    debug!("Maximum duration timer armed for {:?}", duration);
                } else {
                    debug!(
                        "Maximum duration {:?} out of range, session is unbounded",
                        duration
                    );
                }
            }
            _ => debug!("No maximum duration ({}), session is unbounded", seconds),
        }
    }

    fn timer_finished(&mut self) {
        self.timer.invalidate();

        if let Some(session) = &self.session {
            info!("Long press session {} reached maximum duration", session.id);
        }
        if let Some(delegate) = self.delegate() {
            delegate.long_press_did_reach_maximum_duration();
        }
    }
}

impl Default for GestureButton {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for GestureButton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GestureButton")
            .field("has_delegate", &self.delegate().is_some())
            .field("enabled", &self.enabled)
            .field("photo_capture_enabled", &self.photo_capture_enabled)
            .field("video_capture_enabled", &self.video_capture_enabled)
            .field("tap_attached", &self.tap_attached)
            .field("long_press_attached", &self.long_press_attached)
            .field("timer", &self.timer)
            .field("session", &self.session)
            .finish()
    }
}
