//! # Configuration Resolver
//!
//! Pure derivation of the widget configuration from the merchant
//! [`Settings`](crate::model::Settings).
//! See [`resolve`] for the rules.

pub mod resolver;

pub use resolver::*;
