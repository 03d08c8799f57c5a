//! Events the upsell widget reacts to.
//!
//! The first four come from the host (settings, cart, permissions, user input).
//! `BatchSettled` and `MutationSettled` are produced by the widget's own async
//! work and arrive through its mailbox.

use crate::cart::ToggleOutcome;
use crate::framework::Response;
use crate::host::TransportError;
use crate::model::{
    CartChangeResult, CartLine, CartLineChange, CartPermissions, MerchandiseId, ProductRecord,
    Settings,
};

#[derive(Debug)]
pub enum UpsellEvent {
    /// A new merchant settings snapshot.
    SettingsChanged(Settings),
    /// The live cart changed.
    CartChanged(Vec<CartLine>),
    /// The host changed what may be done to the cart.
    PermissionsChanged(CartPermissions),
    /// The shopper (un)checked a product.
    Toggle {
        merchandise_id: MerchandiseId,
        checked: bool,
        respond_to: Response<ToggleOutcome>,
    },
    /// Every fetch of the batch tagged `generation` has settled.
    BatchSettled {
        generation: u64,
        records: Vec<ProductRecord>,
    },
    /// The host answered a cart change.
    MutationSettled {
        merchandise_id: MerchandiseId,
        change: CartLineChange,
        result: Result<CartChangeResult, TransportError>,
        respond_to: Response<ToggleOutcome>,
    },
}
