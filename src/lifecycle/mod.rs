//! # Widget Lifecycle
//!
//! Mounting, wiring and unmounting the upsell widget.
//!
//! ## Dependency Injection via Context
//!
//! The widget actor is created without its I/O capabilities. The [`Host`](crate::host::Host)
//! (catalog query and cart mutation) is injected when the actor starts:
//!
//! ```rust,ignore
//! let (actor, client) = upsell_actor::new(localizer, settings, 32);
//! let handle = tokio::spawn(actor.run(host));
//! ```
//!
//! [`UpsellSystem`] does this and also forwards the host's live cart into the actor.
//!
//! ## Unmounting
//!
//! 1. **Stop forwarders** - No new host snapshots reach the actor
//! 2. **Drop the client** - Closes the sender side of the channel
//! 3. **Drain** - Catalog fetches and cart changes already in flight still report back
//! 4. **Await completion** - The actor exits once nothing can reach it any more
//!
//! Nobody observes the widget after step 2, so late results are applied to a state
//! nobody reads.

pub mod tracing;
pub mod upsell_system;

pub use self::tracing::*;
pub use upsell_system::*;
