/// Connection settings for the remote catalog.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the catalog API, without a trailing slash.
    pub endpoint: String,
    /// Per-request timeout; a timeout surfaces as an ordinary fetch failure.
    pub timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://rickandmortyapi.com/api".to_string(),
            timeout_ms: 10_000,
        }
    }
}
