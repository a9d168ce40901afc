//! HTTP implementation of the catalog client consumed by `castdex-core`.

mod config;
pub use config::ClientConfig;

mod http;
pub use http::HttpCatalogClient;

mod wire;
pub use wire::{PageEnvelope, PageInfo};
