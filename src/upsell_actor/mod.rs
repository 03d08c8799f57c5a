//! The upsell widget actor: settings, cart, permissions and user input in, views out.

pub mod entity;
pub mod error;
pub mod events;

pub use entity::*;
pub use error::*;
pub use events::*;

use crate::clients::UpsellClient;
use crate::framework::ResourceActor;
use crate::host::Localizer;
use crate::model::Settings;
use std::sync::Arc;

/// Creates a new widget actor and its client.
///
/// The actor does nothing until it is `run` with a [`Host`](crate::host::Host).
pub fn new(
    localizer: Arc<dyn Localizer>,
    settings: Settings,
    capacity: usize,
) -> (ResourceActor<UpsellWidget>, UpsellClient) {
    let widget = UpsellWidget::new(localizer, settings);
    let (actor, generic_client) = ResourceActor::new(widget, capacity);
    let client = UpsellClient::new(generic_client);

    (actor, client)
}
