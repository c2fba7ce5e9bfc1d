pub mod button;
pub mod config;
pub mod delegate;
pub mod driver;
pub mod error;
pub mod gesture;
pub mod timer;

pub use button::{GestureButton, LongPressSession};
pub use config::ButtonConfig;
pub use delegate::{ButtonDelegate, ButtonEvent, EventRecorder};
pub use driver::{ButtonCommand, ButtonDriver, ButtonHandle};
pub use error::{ButtonError, ButtonResult};
pub use gesture::{GesturePhase, LongPressRecognizer, PointerEvent, TapRecognizer};
pub use timer::MaxDurationTimer;
