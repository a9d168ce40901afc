use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// The engine worker has been torn down; no further commands are accepted.
    #[error("query engine is shut down")]
    Closed,
}
