//! Demo host: owns the capture button and acts as its delegate

use crate::ui::main_view;
use iced::{executor, time, Application, Command, Element, Subscription, Theme};
use shutter_core::{ButtonConfig, ButtonEvent, EventRecorder, GestureButton, PointerEvent};
use shutter_ui::{EventLog, SettingsMessage, SettingsPanel};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Default maximum recording length offered to the button, in seconds
const DEFAULT_MAXIMUM_DURATION: f32 = 10.0;

/// How often pending button deadlines are checked
const TICK_INTERVAL: Duration = Duration::from_millis(16);

pub struct ShutterApp {
    pub button: GestureButton,
    pub delegate: Arc<EventRecorder>,
    pub settings: SettingsPanel,
    pub log: EventLog,
    pub recording_since: Option<Instant>,
    pub config_path: PathBuf,
    pub theme: Theme,
}

#[derive(Debug, Clone)]
pub enum Message {
    // Pointer input from the capture button
    Pressed,
    Released,
    Tick,

    // Settings
    Settings(SettingsMessage),
    SaveSettings,
    ClearLog,
}

impl ShutterApp {
    pub fn with_config(config: ButtonConfig, config_path: PathBuf) -> Self {
        let delegate = Arc::new(EventRecorder::with_maximum_duration(
            DEFAULT_MAXIMUM_DURATION as f64,
        ));
        let mut button = GestureButton::with_config(config.clone());
        button.set_delegate(&delegate);

        Self {
            button,
            delegate,
            settings: SettingsPanel::new(config, DEFAULT_MAXIMUM_DURATION),
            log: EventLog::new(),
            recording_since: None,
            config_path,
            theme: Theme::Dark,
        }
    }

    pub fn is_recording(&self) -> bool {
        self.recording_since.is_some()
    }

    fn pointer(&mut self, event: PointerEvent, now: Instant) {
        self.button.handle_pointer(event, now);
        self.process_notifications();
    }

    fn tick(&mut self, now: Instant) {
        self.button.poll(now);
        self.process_notifications();
    }

    /// React to whatever the button reported since the last call
    fn process_notifications(&mut self) {
        loop {
            let notifications = self.delegate.take();
            if notifications.is_empty() {
                break;
            }

            for (event, _) in notifications {
                let time = chrono::Local::now().format("%H:%M:%S%.3f").to_string();
                self.log.push(time, event.label());

                match event {
                    ButtonEvent::Tapped => info!("Photo requested"),
                    ButtonEvent::LongPressBegan => {
                        info!("Recording requested");
                        self.recording_since = Some(Instant::now());
                    }
                    ButtonEvent::LongPressEnded => {
                        info!("Recording stop requested");
                        self.recording_since = None;
                    }
                    ButtonEvent::MaximumDurationReached => {
                        // The button leaves stopping to the host
                        info!("Maximum recording length reached, stopping");
                        self.button.long_press_end_action();
                    }
                }
            }
        }
    }

    fn apply_setting(&mut self, message: SettingsMessage) {
        self.settings.update(message.clone());

        match message {
            SettingsMessage::EnabledChanged(enabled) => self.button.set_enabled(enabled),
            SettingsMessage::PhotoCaptureChanged(enabled) => {
                self.button.set_photo_capture_enabled(enabled)
            }
            SettingsMessage::VideoCaptureChanged(enabled) => {
                self.button.set_video_capture_enabled(enabled)
            }
            SettingsMessage::MinimumPressChanged(_) => self
                .button
                .set_minimum_press_duration(self.settings.config().minimum_press_duration),
            SettingsMessage::MaximumDurationChanged(_) => self
                .delegate
                .set_maximum_duration(self.settings.maximum_duration() as f64),
        }
    }
}

impl Application for ShutterApp {
    type Executor = executor::Default;
    type Message = Message;
    type Theme = Theme;
    type Flags = ButtonConfig;

    fn new(config: ButtonConfig) -> (Self, Command<Message>) {
        info!("Initializing Shutter demo");
        (
            Self::with_config(config, ButtonConfig::default_path()),
            Command::none(),
        )
    }

    fn title(&self) -> String {
        match self.recording_since {
            Some(since) => format!("Shutter - Recording {}", format_duration(since.elapsed())),
            None => "Shutter".to_string(),
        }
    }

    fn update(&mut self, message: Message) -> Command<Message> {
        if !matches!(message, Message::Tick) {
            debug!("Handling message: {:?}", message);
        }

        match message {
            Message::Pressed => self.pointer(PointerEvent::Pressed, Instant::now()),
            Message::Released => self.pointer(PointerEvent::Released, Instant::now()),
            Message::Tick => self.tick(Instant::now()),
            Message::Settings(message) => self.apply_setting(message),
            Message::SaveSettings => {
                match self.settings.config().save(&self.config_path) {
                    Ok(()) => info!("Settings saved to {:?}", self.config_path),
                    Err(e) => warn!("Failed to save settings: {}", e),
                }
            }
            Message::ClearLog => self.log.clear(),
        }

        Command::none()
    }

    fn view(&self) -> Element<'_, Message> {
        main_view(self)
    }

    fn theme(&self) -> Theme {
        self.theme.clone()
    }

    fn subscription(&self) -> Subscription<Message> {
        // Only tick while a threshold or timeout is pending, or to refresh the title
        if self.button.next_deadline().is_some() || self.is_recording() {
            time::every(TICK_INTERVAL).map(|_| Message::Tick)
        } else {
            Subscription::none()
        }
    }
}

/// Format duration as MM:SS
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let mins = secs / 60;
    let secs = secs % 60;
    format!("{:02}:{:02}", mins, secs)
}
