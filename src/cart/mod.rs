//! Cart membership: keeping records in line with the live cart, and changing the cart.
//!
//! - [`sync`] - The Cart Synchronizer, a pure overlay of cart lines onto records
//! - [`mutation`] - The Cart Mutation Controller: permission-gated planning of a
//!   toggle and the local update applied once the host confirms it

pub mod mutation;
pub mod sync;

pub use mutation::*;
pub use sync::*;
