use std::str::FromStr;

use crate::logger::error::ObserveError;

/// Output encoding of the log stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = ObserveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_ascii_lowercase();
        match norm.as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(ObserveError::InvalidFormat(s.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub format: LogFormat,
    /// EnvFilter directive, e.g. `"info"` or `"castdex_core=debug"`.
    pub level: String,
    pub with_targets: bool,
    pub ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Text,
            level: "info".to_string(),
            with_targets: true,
            ansi: true,
        }
    }
}
