use crate::model::{
    CartChangeResult, CartLineChange, CartMembership, CartPermissions, MerchandiseId, ProductRecord,
};

/// How a toggle request ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// No record has this merchandise id; nothing happened.
    UnknownRecord,
    /// The capability flag is off, or there is no cart line to remove.
    NotPermitted,
    /// The record is already in the requested state; no call was made.
    Unchanged,
    /// The host confirmed the change and the record was updated.
    Applied,
    /// The host did not confirm the change; the record is untouched.
    Rejected,
}

/// What to do for a toggle request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TogglePlan {
    /// Finish immediately with this outcome.
    Skip(ToggleOutcome),
    /// Send this change to the host.
    Dispatch(CartLineChange),
}

/// Decides the cart change for checking (`checked = true`) or unchecking a record.
///
/// Adding needs the add capability. Removing needs the remove capability and
/// a known cart line for the record.
pub fn plan_toggle(
    records: &[ProductRecord],
    merchandise_id: &MerchandiseId,
    checked: bool,
    permissions: CartPermissions,
) -> TogglePlan {
    let Some(record) = records
        .iter()
        .find(|record| record.merchandise_id() == merchandise_id)
    else {
        return TogglePlan::Skip(ToggleOutcome::UnknownRecord);
    };

    if checked {
        if record.is_in_cart() {
            return TogglePlan::Skip(ToggleOutcome::Unchanged);
        }
        if !permissions.can_add_cart_line {
            return TogglePlan::Skip(ToggleOutcome::NotPermitted);
        }
        return TogglePlan::Dispatch(CartLineChange::add(merchandise_id.clone()));
    }

    match &record.membership {
        CartMembership::Absent => TogglePlan::Skip(ToggleOutcome::Unchanged),
        _ if !permissions.can_remove_cart_line => TogglePlan::Skip(ToggleOutcome::NotPermitted),
        CartMembership::Pending => TogglePlan::Skip(ToggleOutcome::NotPermitted),
        CartMembership::InCart(line_id) => {
            TogglePlan::Dispatch(CartLineChange::remove(line_id.clone()))
        }
    }
}

/// Applies a confirmed change to the current record list.
///
/// Always run against the list as it is *now*, not as it was when the change
/// was sent. A non-success result, or a record that no longer exists, leaves the
/// list as it is.
pub fn apply_change_result(
    records: &[ProductRecord],
    merchandise_id: &MerchandiseId,
    change: &CartLineChange,
    result: &CartChangeResult,
) -> (Vec<ProductRecord>, ToggleOutcome) {
    let CartChangeResult::Success { line_id } = result else {
        return (records.to_vec(), ToggleOutcome::Rejected);
    };

    let updated = records
        .iter()
        .map(|record| {
            if record.merchandise_id() != merchandise_id {
                return record.clone();
            }
            let mut record = record.clone();
            record.membership = match (change, line_id) {
                (CartLineChange::RemoveCartLine { .. }, _) => CartMembership::Absent,
                (CartLineChange::AddCartLine { .. }, Some(line_id)) => {
                    CartMembership::InCart(line_id.clone())
                }
                (CartLineChange::AddCartLine { .. }, None) => match record.membership {
                    CartMembership::InCart(existing) => CartMembership::InCart(existing),
                    _ => CartMembership::Pending,
                },
            };
            record
        })
        .collect();
    (updated, ToggleOutcome::Applied)
}
