//! Generic single-owner actor runtime.
//!
//! This module provides the building blocks for driving a piece of state from
//! a stream of events, one at a time, while its slow work runs elsewhere.
//!
//! # Main Components
//!
//! - [`ActorEntity`] - Trait that state owners implement to be driven by events
//! - [`ResourceActor`] - Generic actor that owns the entity and runs the loop
//! - [`ResourceClient`] - Typed, cloneable handle for sending events and reading snapshots
//! - [`Mailbox`] - Weak self-handle used to feed async results back in
//! - [`FrameworkError`] - Common error types
//!
//! # Testing
//!
//! See [`mock`] module for utilities to test clients without spawning full actors.

pub mod core;
pub mod mock;

// Re-export core types for convenience
pub use self::core::*;
