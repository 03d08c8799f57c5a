//! Capabilities consumed from the checkout host.
//!
//! The widget never talks to a transport directly. The host hands it a catalog
//! query function, a cart mutation function and a localizer; the first two are
//! injected into the actor at `run()` time through [`Host`].

pub mod error;
pub mod localizer;
pub mod memory;

pub use error::*;
pub use localizer::*;

use crate::model::{CartChangeResult, CartLineChange, QueryResponse};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Executes catalog queries against the storefront.
#[async_trait]
pub trait CatalogQuery: Send + Sync {
    async fn query(&self, document: &str, variables: Value)
        -> Result<QueryResponse, TransportError>;
}

/// Applies cart line changes to the active checkout.
#[async_trait]
pub trait CartMutator: Send + Sync {
    async fn apply_cart_lines_change(
        &self,
        change: CartLineChange,
    ) -> Result<CartChangeResult, TransportError>;
}

/// The I/O capabilities injected into the widget actor.
#[derive(Clone)]
pub struct Host {
    pub catalog: Arc<dyn CatalogQuery>,
    pub cart: Arc<dyn CartMutator>,
}

impl Host {
    pub fn new(catalog: Arc<dyn CatalogQuery>, cart: Arc<dyn CartMutator>) -> Self {
        Self { catalog, cart }
    }
}
