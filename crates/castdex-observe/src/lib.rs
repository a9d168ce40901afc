//! Logging initialization for castdex binaries.

mod logger;

pub use logger::{LogConfig, LogFormat, ObserveError, init_logging};
