use tracing::error;

/// Destination for failures the engine absorbs instead of propagating.
///
/// Fetch failures never reach the consumer as errors (the snapshot flags
/// carry the observable effect); they are reported here once each.
pub trait ErrorSink: Send + Sync {
    /// Must not panic or return an error; a report has nowhere further to go.
    fn report(&self, context: &str, cause: &(dyn std::error::Error + 'static));
}

/// Default sink forwarding reports to the tracing pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl ErrorSink for TracingSink {
    fn report(&self, context: &str, cause: &(dyn std::error::Error + 'static)) {
        error!("{context}: {cause}");
    }
}
