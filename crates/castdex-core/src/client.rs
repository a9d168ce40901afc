use async_trait::async_trait;
use thiserror::Error;

use castdex_model::{CatalogFilter, CatalogPage, PageNumber};

/// Failure of a single page fetch.
///
/// Timeouts are a transport concern of the client implementation and surface
/// here as [`FetchError::Transport`].
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("transport failure: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("catalog returned status {status}")]
    Status { status: u16 },

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl FetchError {
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        FetchError::Transport(Box::new(err))
    }
}

/// Remote paged-catalog access.
///
/// Implementations send only the non-empty, remote-expressible predicates of
/// `filter`; `page` is 1-based. The engine owns retry/accumulation policy, so
/// a call either yields one complete page or one error.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    async fn fetch_page(
        &self,
        filter: &CatalogFilter,
        page: PageNumber,
    ) -> Result<CatalogPage, FetchError>;
}
