use thiserror::Error;

#[derive(Error, Debug)]
pub enum TimelineError {
    #[error("JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    /// The raw payload matched neither supported shape. Carries the original
    /// value so callers can log it for diagnosis.
    #[error("unrecognized events payload shape: expected an event array or an object with an 'events' key")]
    UnrecognizedShape { value: serde_json::Value },
}

pub type Result<T> = std::result::Result<T, TimelineError>;
