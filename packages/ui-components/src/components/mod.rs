pub mod capture_button;
pub mod event_log;
pub mod settings_panel;

pub use capture_button::*;
pub use event_log::*;
pub use settings_panel::*;
