//! Type-safe wrappers around [`ResourceClient`](crate::framework::ResourceClient).

pub mod actor_client;
pub mod upsell_client;

pub use actor_client::*;
pub use upsell_client::*;
