use thiserror::Error;

/// Coarse classification of a failed request against the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The request never reached the server or the response never arrived.
    Network,
    /// The server answered with a status outside 2xx.
    ServerRejection,
    /// The body did not decode into the expected shape.
    Parse,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("movie record must be a JSON object")]
    NotAnObject,
    #[error("movie record is missing an id")]
    MissingId,
    #[error("invalid movie record: {0}")]
    InvalidRecord(String),
}
