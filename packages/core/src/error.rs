use thiserror::Error;

#[derive(Error, Debug)]
pub enum ButtonError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Button driver is no longer running")]
    DriverClosed,
}

pub type ButtonResult<T> = Result<T, ButtonError>;
