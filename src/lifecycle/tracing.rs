//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered by
//! `RUST_LOG`.
//!
//! ## What Gets Traced
//!
//! - **Actor Lifecycle**: startup and shutdown, tagged with `entity_type`
//! - **Events**: every event the widget handles, at `debug`
//! - **Batches**: start and settle with their `generation`; stale batches at `warn`
//! - **Cart Changes**: applied at `info`, rejected or failed at `warn`
//! - **Catalog Failures**: per item with its `merchandise_id`
//!
//! ## Usage Examples
//!
//! ```bash
//! # Compact logs (default)
//! RUST_LOG=info cargo run
//!
//! # Every event and snapshot publication
//! RUST_LOG=debug cargo run
//!
//! # Only the loader
//! RUST_LOG=checkout_upsell::catalog=debug cargo run
//! ```
//!
//! With `RUST_LOG=info` a mount, load and toggle looks like:
//!
//! ```text
//! INFO Upsell widget mounted capacity=32
//! INFO Actor started entity_type="UpsellWidget"
//! INFO Loading products generation=1 count=2
//! INFO Products loaded generation=1 count=2
//! INFO toggle{merchandise_id=gid://shopify/ProductVariant/1}: Sending toggle to actor
//! INFO Cart change applied merchandise_id=gid://shopify/ProductVariant/1 change=AddCartLine { .. }
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // entity_type identifies the actor
        .compact()
        .init();
}
