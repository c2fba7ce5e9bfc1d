//! Tap and long-press detectors
//!
//! Both detectors consume the same raw [`PointerEvent`] stream. The tap
//! detector reports a tap on release; the long-press detector reports the
//! phases of a press-and-hold once its threshold elapses. Time only advances
//! through the `now` arguments, so the host's event loop owns the clock.

use std::time::{Duration, Instant};

use crate::config::{DEFAULT_ALLOWABLE_MOVEMENT, DEFAULT_MINIMUM_PRESS_DURATION};

/// Raw pointer input delivered to the button
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Pressed,
    /// Pointer moved while pressed; `distance` is measured from the press point
    Moved { distance: f32 },
    Released,
    /// The platform took the pointer away (window lost focus, touch cancelled)
    Cancelled,
}

/// Phase of a continuous gesture, as reported to the button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    Possible,
    Began,
    Changed,
    Ended,
    Cancelled,
    Failed,
}

impl GesturePhase {
    /// Phases that close a long-press session
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            GesturePhase::Ended | GesturePhase::Cancelled | GesturePhase::Failed
        )
    }
}

/// Discrete tap detector
#[derive(Debug, Clone)]
pub struct TapRecognizer {
    allowable_movement: f32,
    tracking: bool,
}

impl TapRecognizer {
    pub fn new(allowable_movement: f32) -> Self {
        Self {
            allowable_movement,
            tracking: false,
        }
    }

    /// Feed an event; returns true when a tap is recognized
    pub fn handle(&mut self, event: PointerEvent) -> bool {
        match event {
            PointerEvent::Pressed => {
                self.tracking = true;
                false
            }
            PointerEvent::Moved { distance } => {
                if distance > self.allowable_movement {
                    self.tracking = false;
                }
                false
            }
            PointerEvent::Released => std::mem::take(&mut self.tracking),
            PointerEvent::Cancelled => {
                self.tracking = false;
                false
            }
        }
    }

    /// Give up on the current press (another gesture claimed it)
    pub fn fail(&mut self) {
        self.tracking = false;
    }

    pub fn reset(&mut self) {
        self.tracking = false;
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    pub fn allowable_movement(&self) -> f32 {
        self.allowable_movement
    }

    pub fn set_allowable_movement(&mut self, allowable_movement: f32) {
        self.allowable_movement = allowable_movement;
    }
}

impl Default for TapRecognizer {
    fn default() -> Self {
        Self::new(DEFAULT_ALLOWABLE_MOVEMENT)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum LongPressState {
    Idle,
    /// Pointer is down, threshold not reached yet
    Pressed { since: Instant },
    /// Threshold reached and `Began` reported
    Active,
}

/// Continuous press-and-hold detector
#[derive(Debug, Clone)]
pub struct LongPressRecognizer {
    minimum_press_duration: Duration,
    allowable_movement: f32,
    state: LongPressState,
}

impl LongPressRecognizer {
    pub fn new(minimum_press_duration: Duration, allowable_movement: f32) -> Self {
        Self {
            minimum_press_duration,
            allowable_movement,
            state: LongPressState::Idle,
        }
    }

    pub fn minimum_press_duration(&self) -> Duration {
        self.minimum_press_duration
    }

    /// Update the threshold; a press already being tracked uses the new value
    pub fn set_minimum_press_duration(&mut self, duration: Duration) {
        self.minimum_press_duration = duration;
    }

    pub fn set_allowable_movement(&mut self, allowable_movement: f32) {
        self.allowable_movement = allowable_movement;
    }

    /// Feed an event; returns the phase to report, if any.
    ///
    /// A press that ends before the threshold fails without reporting.
    pub fn handle(&mut self, event: PointerEvent, now: Instant) -> Option<GesturePhase> {
        match (event, self.state) {
            (PointerEvent::Pressed, LongPressState::Idle) => {
                self.state = LongPressState::Pressed { since: now };
                None
            }
            (PointerEvent::Pressed, _) => None,
            (PointerEvent::Moved { distance }, LongPressState::Pressed { .. }) => {
                if distance > self.allowable_movement {
                    self.state = LongPressState::Idle;
                }
                None
            }
            (PointerEvent::Moved { .. }, LongPressState::Active) => Some(GesturePhase::Changed),
            (PointerEvent::Released, LongPressState::Active) => {
                self.state = LongPressState::Idle;
                Some(GesturePhase::Ended)
            }
            (PointerEvent::Cancelled, LongPressState::Active) => {
                self.state = LongPressState::Idle;
                Some(GesturePhase::Cancelled)
            }
            (PointerEvent::Released | PointerEvent::Cancelled, _) => {
                self.state = LongPressState::Idle;
                None
            }
            (PointerEvent::Moved { .. }, LongPressState::Idle) => None,
        }
    }

    /// Report `Began` once the threshold has elapsed
    pub fn poll(&mut self, now: Instant) -> Option<GesturePhase> {
        match self.deadline() {
            Some(deadline) if now >= deadline => {
                self.state = LongPressState::Active;
                Some(GesturePhase::Began)
            }
            _ => None,
        }
    }

    /// When the current press will be recognized. A threshold too large to
    /// represent as an `Instant` has no deadline, so the press never begins.
    pub fn deadline(&self) -> Option<Instant> {
        match self.state {
            LongPressState::Pressed { since } => {
                since.checked_add(self.minimum_press_duration)
            }
            _ => None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.state == LongPressState::Active
    }

    pub fn reset(&mut self) {
        self.state = LongPressState::Idle;
    }
}

impl Default for LongPressRecognizer {
    fn default() -> Self {
        Self::new(DEFAULT_MINIMUM_PRESS_DURATION, DEFAULT_ALLOWABLE_MOVEMENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn test_tap_recognized_on_release() {
        let mut tap = TapRecognizer::default();
        assert!(!tap.handle(PointerEvent::Pressed));
        assert!(tap.handle(PointerEvent::Released));
        // Release without a press is not a tap
        assert!(!tap.handle(PointerEvent::Released));
    }

    #[test]
    fn test_tap_fails_on_movement() {
        let mut tap = TapRecognizer::default();
        tap.handle(PointerEvent::Pressed);
        tap.handle(PointerEvent::Moved { distance: 4.0 });
        assert!(tap.is_tracking());
        tap.handle(PointerEvent::Moved { distance: 25.0 });
        assert!(!tap.handle(PointerEvent::Released));
    }

    #[test]
    fn test_tap_fail_and_cancel() {
        let mut tap = TapRecognizer::default();
        tap.handle(PointerEvent::Pressed);
        tap.fail();
        assert!(!tap.handle(PointerEvent::Released));

        tap.handle(PointerEvent::Pressed);
        tap.handle(PointerEvent::Cancelled);
        assert!(!tap.handle(PointerEvent::Released));
    }

    #[test]
    fn test_long_press_phases() {
        let start = Instant::now();
        let mut press = LongPressRecognizer::default();

        assert_eq!(press.handle(PointerEvent::Pressed, start), None);
        assert_eq!(press.deadline(), Some(start + ms(500)));
        assert_eq!(press.poll(start + ms(499)), None);
        assert_eq!(press.poll(start + ms(500)), Some(GesturePhase::Began));
        assert!(press.is_active());
        assert_eq!(press.poll(start + ms(900)), None);
        assert_eq!(
            press.handle(PointerEvent::Moved { distance: 80.0 }, start + ms(600)),
            Some(GesturePhase::Changed)
        );
        assert_eq!(
            press.handle(PointerEvent::Released, start + ms(700)),
            Some(GesturePhase::Ended)
        );
        assert!(!press.is_active());
        assert_eq!(press.deadline(), None);
    }

    #[test]
    fn test_long_press_cancelled_after_began() {
        let start = Instant::now();
        let mut press = LongPressRecognizer::default();
        press.handle(PointerEvent::Pressed, start);
        press.poll(start + ms(500));
        assert_eq!(
            press.handle(PointerEvent::Cancelled, start + ms(600)),
            Some(GesturePhase::Cancelled)
        );
    }

    #[test]
    fn test_short_press_reports_nothing() {
        let start = Instant::now();
        let mut press = LongPressRecognizer::default();
        press.handle(PointerEvent::Pressed, start);
        assert_eq!(press.handle(PointerEvent::Released, start + ms(100)), None);
        assert_eq!(press.poll(start + ms(1000)), None);
    }

    #[test]
    fn test_movement_before_threshold_fails_press() {
        let start = Instant::now();
        let mut press = LongPressRecognizer::default();
        press.handle(PointerEvent::Pressed, start);
        press.handle(PointerEvent::Moved { distance: 11.0 }, start + ms(100));
        assert_eq!(press.deadline(), None);
        assert_eq!(press.poll(start + ms(1000)), None);
    }

    #[test]
    fn test_threshold_change_applies_to_tracked_press() {
        let start = Instant::now();
        let mut press = LongPressRecognizer::default();
        press.handle(PointerEvent::Pressed, start);
        press.set_minimum_press_duration(ms(200));
        assert_eq!(press.poll(start + ms(200)), Some(GesturePhase::Began));
    }

    #[test]
    fn test_unrepresentable_threshold_never_begins() {
        let start = Instant::now();
        let mut press = LongPressRecognizer::new(Duration::MAX, DEFAULT_ALLOWABLE_MOVEMENT);
        press.handle(PointerEvent::Pressed, start);

        assert_eq!(press.deadline(), None);
        assert_eq!(press.poll(start + Duration::from_secs(3600)), None);
        assert_eq!(press.handle(PointerEvent::Released, start + ms(100)), None);
    }

    #[test]
    fn test_allowable_movement_update() {
        let start = Instant::now();
        let mut tap = TapRecognizer::default();
        let mut press = LongPressRecognizer::default();
        tap.set_allowable_movement(50.0);
        press.set_allowable_movement(50.0);
        assert_eq!(tap.allowable_movement(), 50.0);

        tap.handle(PointerEvent::Pressed);
        press.handle(PointerEvent::Pressed, start);
        tap.handle(PointerEvent::Moved { distance: 30.0 });
        press.handle(PointerEvent::Moved { distance: 30.0 }, start + ms(100));

        assert!(tap.is_tracking());
        assert_eq!(press.poll(start + ms(500)), Some(GesturePhase::Began));
    }

    #[test]
    fn test_terminal_phases() {
        assert!(GesturePhase::Ended.is_terminal());
        assert!(GesturePhase::Cancelled.is_terminal());
        assert!(GesturePhase::Failed.is_terminal());
        assert!(!GesturePhase::Began.is_terminal());
        assert!(!GesturePhase::Changed.is_terminal());
        assert!(!GesturePhase::Possible.is_terminal());
    }
}
