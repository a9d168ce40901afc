pub mod bridge;
pub mod client;
pub mod engine;
pub mod error;
pub mod scroll;
pub mod sink;

pub use bridge::{InMemoryBridge, PersistError, UrlStateBridge};
pub use client::{CatalogClient, FetchError};
pub use engine::{EngineConfig, EngineSnapshot, QueryEngine};
pub use error::EngineError;
pub use scroll::{IntersectHandler, ScrollTrigger, WatchScrollTrigger};
pub use sink::{ErrorSink, TracingSink};
