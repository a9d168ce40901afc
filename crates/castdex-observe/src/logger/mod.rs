mod config;
mod error;

pub use config::{LogConfig, LogFormat};
pub use error::ObserveError;

use time::{UtcOffset, format_description::well_known::Rfc3339};
use tracing::Subscriber;
use tracing_subscriber::{
    EnvFilter, fmt, fmt::time::OffsetTime, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Install the global tracing subscriber described by `cfg`.
///
/// Fails when the level filter does not parse or a subscriber is already
/// installed.
pub fn init_logging(cfg: &LogConfig) -> Result<(), ObserveError> {
    let filter = mk_filter(&cfg.level)?;

    match cfg.format {
        LogFormat::Text => {
            let layer = fmt::layer()
                .with_ansi(cfg.ansi)
                .with_target(cfg.with_targets)
                .with_timer(mk_timer());
            init_with(tracing_subscriber::registry().with(filter).with(layer))
        }
        LogFormat::Json => {
            let layer = fmt::layer()
                .json()
                .with_ansi(false)
                .with_target(cfg.with_targets)
                .with_timer(mk_timer());
            init_with(tracing_subscriber::registry().with(filter).with(layer))
        }
    }
}

fn mk_filter(level: &str) -> Result<EnvFilter, ObserveError> {
    EnvFilter::try_new(level).map_err(|_| ObserveError::InvalidLogLevel(level.to_string()))
}

fn mk_timer() -> OffsetTime<Rfc3339> {
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    OffsetTime::new(offset, Rfc3339)
}

fn init_with<S>(subscriber: S) -> Result<(), ObserveError>
where
    S: Subscriber + Send + Sync + 'static,
{
    subscriber.try_init().map_err(|e| {
        let s = e.to_string();
        if s.contains("SetGlobalDefaultError") {
            ObserveError::AlreadyInitialized
        } else {
            ObserveError::InitializationFailed(s)
        }
    })
}
