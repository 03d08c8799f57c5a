//! # Checkout Upsell
//!
//! > **An upsell block for the checkout page, driven by a single actor.**
//!
//! The widget reads up to three product identifiers from merchant settings,
//! fetches their details from the storefront catalog, keeps each product's
//! checkbox in step with the live cart, and adds or removes cart lines when the
//! shopper toggles a product.
//!
//! ## Core Concepts
//!
//! ### One Owner, Many Inputs
//! Settings, the cart, permissions and clicks arrive from the host at any time, and
//! catalog fetches and cart changes complete in any order. All of them become
//! events for one [`ResourceActor`](framework::ResourceActor) that owns the widget
//! state and applies them one at a time. Slow work runs in separate tasks and
//! reports back through the actor's [`Mailbox`](framework::Mailbox), so its result
//! is always applied to the state *as it is then*.
//!
//! ### Stale Work
//! Every batch of catalog fetches carries a generation number. Changing the product
//! list starts a new generation, and a batch from an older one is dropped when it
//! lands. Cart membership picked up while a batch was in flight is kept.
//!
//! ### Views, Not Widgets
//! The actor publishes a [`WidgetSnapshot`](upsell_actor::WidgetSnapshot) with a
//! [`View`](view::View) after every change. Rendering it is the host's business.
//!
//! ## Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! The generic actor loop, client and mock helpers.
//!
//! ### 2. Pure Components ([`config`], [`catalog`], [`cart`], [`view`])
//! Settings resolution, catalog loading, cart synchronization and mutation
//! planning, and view selection. Everything but the loader is a plain function.
//!
//! ### 3. The Host Boundary ([`host`], [`model`])
//! Capability traits the host implements, their wire types, and an in-memory host
//! for the demo and tests.
//!
//! ### 4. The Widget ([`upsell_actor`], [`clients`], [`lifecycle`])
//! The [`ActorEntity`](framework::ActorEntity) implementation, its typed client and
//! the mount/unmount orchestration in [`UpsellSystem`](lifecycle::UpsellSystem).
//!
//! ## Quick Start
//!
//! ```bash
//! # Run the demo against the in-memory host
//! RUST_LOG=info cargo run
//!
//! # Run the tests
//! cargo test
//! ```

pub mod cart;
pub mod catalog;
pub mod clients;
pub mod config;
pub mod framework;
pub mod host;
pub mod lifecycle;
pub mod model;
pub mod upsell_actor;
pub mod view;
