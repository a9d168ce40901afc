use thiserror::Error;

#[derive(Debug, Error)]
pub enum ObserveError {
    #[error("Invalid log format: {0} (expected: text|json)")]
    InvalidFormat(String),
    #[error("Logger has been already initialized")]
    AlreadyInitialized,
    #[error("Failed to initialize logger: {0}")]
    InitializationFailed(String),
    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),
}
