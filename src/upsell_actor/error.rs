//! Error types for the upsell widget client.

use thiserror::Error;

/// Errors that can occur while driving the widget.
#[derive(Debug, Error)]
pub enum UpsellError {
    /// The settings payload is not a JSON object of primitives.
    #[error("Invalid settings: {0}")]
    InvalidSettings(#[from] serde_json::Error),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for UpsellError {
    fn from(msg: String) -> Self {
        UpsellError::ActorCommunicationError(msg)
    }
}
