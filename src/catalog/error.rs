//! Error types for catalog loading.

use crate::host::{MessageKey, TransportError};
use crate::model::MerchandiseId;
use thiserror::Error;

/// Why a single record could not be populated.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LoadError {
    /// The query matched no product variant.
    #[error("No product variant matches {0}")]
    NotFound(MerchandiseId),

    /// The query itself failed.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl LoadError {
    /// Translation key of the inline text shown in place of the product.
    pub fn message_key(&self) -> MessageKey {
        match self {
            LoadError::NotFound(_) => MessageKey::CouldNotLoadProduct,
            LoadError::Transport(_) => MessageKey::FailedToLoadProduct,
        }
    }
}
