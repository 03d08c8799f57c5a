//! Error types for host transports.

use thiserror::Error;

/// A host call that did not produce a response.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TransportError {
    /// The request was rejected or threw before answering.
    #[error("Transport failed: {0}")]
    Failed(String),

    /// The response arrived but could not be decoded.
    #[error("Malformed response: {0}")]
    Malformed(String),
}
