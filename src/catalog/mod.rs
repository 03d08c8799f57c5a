//! # Product Catalog Loader
//!
//! Turns the resolved identifier list into fully populated
//! [`ProductRecord`](crate::model::ProductRecord)s.
//!
//! ## Structure
//!
//! - [`query`] - The variant query document and response decoding
//! - [`loader`] - Concurrent per-item fetch with error isolation
//! - [`error`] - [`LoadError`] for the two per-item failure kinds
//!
//! One fetch runs per identifier and they all run at once. A failing item only
//! ever affects its own record; the caller receives the complete list after the
//! last fetch settles, in configuration order.

pub mod error;
pub mod loader;
pub mod query;

pub use error::*;
pub use loader::*;
pub use query::*;
