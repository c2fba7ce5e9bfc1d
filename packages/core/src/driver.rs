//! Tokio event loop for a [`GestureButton`]
//!
//! Hosts that do not already run a UI loop can hand the button to a
//! [`ButtonDriver`] and talk to it through a cloneable [`ButtonHandle`]. The
//! driver sleeps until the button's next deadline or the next command,
//! whichever comes first, so every callback runs on the driver's task.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info};

use crate::button::GestureButton;
use crate::gesture::PointerEvent;
use crate::{ButtonError, ButtonResult};

/// Input accepted by the driver
#[derive(Debug, Clone, PartialEq)]
pub enum ButtonCommand {
    Pointer(PointerEvent),
    SetEnabled(bool),
    SetPhotoCaptureEnabled(bool),
    SetVideoCaptureEnabled(bool),
    SetMinimumPressDuration(Duration),
    SetAllowableMovement(f32),
    BeginLongPress,
    EndLongPress,
    Shutdown,
}

/// Sending side of a running driver
#[derive(Debug, Clone)]
pub struct ButtonHandle {
    tx: mpsc::UnboundedSender<ButtonCommand>,
}

impl ButtonHandle {
    pub fn send(&self, command: ButtonCommand) -> ButtonResult<()> {
        self.tx
            .send(command)
            .map_err(|_| ButtonError::DriverClosed)
    }

    pub fn pointer(&self, event: PointerEvent) -> ButtonResult<()> {
        self.send(ButtonCommand::Pointer(event))
    }

    pub fn press(&self) -> ButtonResult<()> {
        self.pointer(PointerEvent::Pressed)
    }

    pub fn release(&self) -> ButtonResult<()> {
        self.pointer(PointerEvent::Released)
    }

    pub fn begin_long_press(&self) -> ButtonResult<()> {
        self.send(ButtonCommand::BeginLongPress)
    }

    pub fn end_long_press(&self) -> ButtonResult<()> {
        self.send(ButtonCommand::EndLongPress)
    }

    pub fn shutdown(&self) -> ButtonResult<()> {
        self.send(ButtonCommand::Shutdown)
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

pub struct ButtonDriver {
    button: GestureButton,
    rx: mpsc::UnboundedReceiver<ButtonCommand>,
}

impl ButtonDriver {
    pub fn new(button: GestureButton) -> (Self, ButtonHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { button, rx }, ButtonHandle { tx })
    }

    /// Run until shut down or every handle is dropped; returns the button
    pub async fn run(mut self) -> GestureButton {
        info!("Button driver started");

        loop {
            let deadline = self.button.next_deadline().map(Instant::from_std);

            tokio::select! {
                biased;

                _ = sleep_until_deadline(deadline) => {
                    self.button.poll(now());
                }
                command = self.rx.recv() => match command {
                    Some(ButtonCommand::Shutdown) | None => break,
                    Some(command) => self.apply(command),
                },
            }
        }

        info!("Button driver stopped");
        self.button
    }

    fn apply(&mut self, command: ButtonCommand) {
        debug!("Applying {:?}", command);
        let now = now();

        match command {
            ButtonCommand::Pointer(event) => self.button.handle_pointer(event, now),
            ButtonCommand::SetEnabled(enabled) => self.button.set_enabled(enabled),
            ButtonCommand::SetPhotoCaptureEnabled(enabled) => {
                self.button.set_photo_capture_enabled(enabled)
            }
            ButtonCommand::SetVideoCaptureEnabled(enabled) => {
                self.button.set_video_capture_enabled(enabled)
            }
            ButtonCommand::SetMinimumPressDuration(duration) => {
                self.button.set_minimum_press_duration(duration)
            }
            ButtonCommand::SetAllowableMovement(movement) => {
                self.button.set_allowable_movement(movement)
            }
            ButtonCommand::BeginLongPress => self.button.long_press_start_action(now),
            ButtonCommand::EndLongPress => self.button.long_press_end_action(),
            ButtonCommand::Shutdown => {}
        }
    }
}

/// Current time on the runtime clock (honors paused test time)
fn now() -> std::time::Instant {
    Instant::now().into_std()
}

async fn sleep_until_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delegate::{ButtonEvent, EventRecorder};
    use std::sync::Arc;
    use tokio::time::sleep;

    fn spawn_driver(
        recorder: &Arc<EventRecorder>,
    ) -> (ButtonHandle, tokio::task::JoinHandle<GestureButton>) {
        let mut button = GestureButton::new();
        button.set_delegate(recorder);
        let (driver, handle) = ButtonDriver::new(button);
        (handle, tokio::spawn(driver.run()))
    }

    #[tokio::test(start_paused = true)]
    async fn test_scenario_released_before_maximum() {
        let recorder = Arc::new(EventRecorder::with_maximum_duration(1.0));
        let (handle, task) = spawn_driver(&recorder);
        let start = Instant::now();

        handle.begin_long_press().unwrap();
        sleep(Duration::from_millis(300)).await;
        handle.end_long_press().unwrap();
        // Wait well past the maximum to catch a late callback
        sleep(Duration::from_secs(2)).await;

        handle.shutdown().unwrap();
        let button = task.await.unwrap();
        assert!(!button.is_timer_active());

        let timeline = recorder.timeline();
        let events: Vec<_> = timeline.iter().map(|(e, _)| *e).collect();
        assert_eq!(
            events,
            vec![ButtonEvent::LongPressBegan, ButtonEvent::LongPressEnded]
        );
        assert!(timeline[0].1 - start < Duration::from_millis(10));
        assert!(timeline[1].1 - start >= Duration::from_millis(300));
    }

    #[tokio::test(start_paused = true)]
    async fn test_scenario_held_past_maximum() {
        let recorder = Arc::new(EventRecorder::with_maximum_duration(1.0));
        let (handle, task) = spawn_driver(&recorder);
        let start = Instant::now();

        handle.begin_long_press().unwrap();
        sleep(Duration::from_secs(3)).await;

        handle.shutdown().unwrap();
        task.await.unwrap();

        let timeline = recorder.timeline();
        let events: Vec<_> = timeline.iter().map(|(e, _)| *e).collect();
        assert_eq!(
            events,
            vec![
                ButtonEvent::LongPressBegan,
                ButtonEvent::MaximumDurationReached
            ]
        );
        let fired_after = timeline[1].1 - start;
        assert!(fired_after >= Duration::from_secs(1));
        assert!(fired_after < Duration::from_millis(1100));
    }

    #[tokio::test(start_paused = true)]
    async fn test_pointer_hold_recognized_by_driver() {
        let recorder = Arc::new(EventRecorder::new());
        let (handle, task) = spawn_driver(&recorder);
        let start = Instant::now();

        handle.press().unwrap();
        sleep(Duration::from_millis(800)).await;
        handle.release().unwrap();
        sleep(Duration::from_millis(10)).await;

        handle.shutdown().unwrap();
        task.await.unwrap();

        let timeline = recorder.timeline();
        assert_eq!(timeline.len(), 2);
        assert_eq!(timeline[0].0, ButtonEvent::LongPressBegan);
        assert!(timeline[0].1 - start >= Duration::from_millis(500));
        assert_eq!(timeline[1].0, ButtonEvent::LongPressEnded);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pointer_tap_through_driver() {
        let recorder = Arc::new(EventRecorder::new());
        let (handle, task) = spawn_driver(&recorder);

        handle.press().unwrap();
        sleep(Duration::from_millis(100)).await;
        handle.release().unwrap();
        sleep(Duration::from_secs(1)).await;

        handle.shutdown().unwrap();
        task.await.unwrap();

        assert_eq!(recorder.events(), vec![ButtonEvent::Tapped]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_disable_video_through_driver() {
        let recorder = Arc::new(EventRecorder::new());
        let (handle, task) = spawn_driver(&recorder);

        handle
            .send(ButtonCommand::SetVideoCaptureEnabled(false))
            .unwrap();
        handle.press().unwrap();
        sleep(Duration::from_secs(1)).await;

        handle.shutdown().unwrap();
        let button = task.await.unwrap();

        assert!(!button.video_capture_enabled());
        assert_eq!(recorder.count(ButtonEvent::LongPressBegan), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_allowable_movement_through_driver() {
        let recorder = Arc::new(EventRecorder::new());
        let (handle, task) = spawn_driver(&recorder);

        handle
            .send(ButtonCommand::SetAllowableMovement(50.0))
            .unwrap();
        handle.press().unwrap();
        handle
            .pointer(PointerEvent::Moved { distance: 30.0 })
            .unwrap();
        handle.release().unwrap();
        sleep(Duration::from_millis(10)).await;

        handle.shutdown().unwrap();
        let button = task.await.unwrap();

        assert_eq!(button.allowable_movement(), 50.0);
        assert_eq!(recorder.events(), vec![ButtonEvent::Tapped]);
    }

    #[tokio::test]
    async fn test_send_after_shutdown_fails() {
        let recorder = Arc::new(EventRecorder::new());
        let (handle, task) = spawn_driver(&recorder);

        handle.shutdown().unwrap();
        task.await.unwrap();

        assert!(handle.is_closed());
        assert!(matches!(handle.press(), Err(ButtonError::DriverClosed)));
    }

    #[tokio::test]
    async fn test_dropping_handles_stops_driver() {
        let recorder = Arc::new(EventRecorder::new());
        let (handle, task) = spawn_driver(&recorder);
        drop(handle);

        let button = task.await.unwrap();
        assert!(button.session().is_none());
    }
}
