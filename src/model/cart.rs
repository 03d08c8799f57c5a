use super::record::MerchandiseId;
use serde::{Deserialize, Serialize};

/// Upsell lines are always added and removed one unit at a time.
pub const UPSELL_QUANTITY: u32 = 1;

/// The merchandise a cart line refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Merchandise {
    pub id: MerchandiseId,
}

/// One row of the live cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: String,
    pub merchandise: Merchandise,
}

impl CartLine {
    pub fn new(id: impl Into<String>, merchandise_id: impl Into<MerchandiseId>) -> Self {
        Self {
            id: id.into(),
            merchandise: Merchandise {
                id: merchandise_id.into(),
            },
        }
    }
}

/// Intent sent to the host to change the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CartLineChange {
    #[serde(rename_all = "camelCase")]
    AddCartLine {
        merchandise_id: MerchandiseId,
        quantity: u32,
    },
    RemoveCartLine { id: String, quantity: u32 },
}

impl CartLineChange {
    pub fn add(merchandise_id: MerchandiseId) -> Self {
        CartLineChange::AddCartLine {
            merchandise_id,
            quantity: UPSELL_QUANTITY,
        }
    }

    pub fn remove(line_id: impl Into<String>) -> Self {
        CartLineChange::RemoveCartLine {
            id: line_id.into(),
            quantity: UPSELL_QUANTITY,
        }
    }
}

/// What the host reports after applying a [`CartLineChange`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CartChangeResult {
    Success {
        /// Identifier of the line created by an add, when the host reports it.
        #[serde(default, rename = "lineId", skip_serializing_if = "Option::is_none")]
        line_id: Option<String>,
    },
    Error { message: String },
}

impl CartChangeResult {
    pub fn is_success(&self) -> bool {
        matches!(self, CartChangeResult::Success { .. })
    }
}

/// Host capability flags for mutating the cart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartPermissions {
    #[serde(default)]
    pub can_add_cart_line: bool,
    #[serde(default)]
    pub can_remove_cart_line: bool,
}

impl CartPermissions {
    pub fn new(can_add_cart_line: bool, can_remove_cart_line: bool) -> Self {
        Self {
            can_add_cart_line,
            can_remove_cart_line,
        }
    }

    pub fn all() -> Self {
        Self::new(true, true)
    }

    /// True when at least one kind of cart change is allowed.
    pub fn allows_any(&self) -> bool {
        self.can_add_cart_line || self.can_remove_cart_line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_change_intents_use_host_wire_shape() {
        let add = CartLineChange::add("gid://shopify/ProductVariant/1".into());
        assert_eq!(
            serde_json::to_value(&add).unwrap(),
            json!({
                "type": "addCartLine",
                "merchandiseId": "gid://shopify/ProductVariant/1",
                "quantity": 1
            })
        );

        let remove = CartLineChange::remove("gid://shopify/CartLine/3");
        assert_eq!(
            serde_json::to_value(&remove).unwrap(),
            json!({"type": "removeCartLine", "id": "gid://shopify/CartLine/3", "quantity": 1})
        );
    }

    #[test]
    fn test_change_result_from_host() {
        let ok: CartChangeResult = serde_json::from_value(json!({"type": "success"})).unwrap();
        assert_eq!(ok, CartChangeResult::Success { line_id: None });
        assert!(ok.is_success());

        let failed: CartChangeResult = serde_json::from_value(json!({
            "type": "error",
            "message": "line limit reached"
        }))
        .unwrap();
        assert!(!failed.is_success());
    }

    #[test]
    fn test_cart_line_and_permissions_from_host() {
        let line: CartLine = serde_json::from_value(json!({
            "id": "gid://shopify/CartLine/1",
            "merchandise": {"id": "gid://shopify/ProductVariant/7"}
        }))
        .unwrap();
        assert_eq!(
            line,
            CartLine::new("gid://shopify/CartLine/1", "gid://shopify/ProductVariant/7")
        );

        let permissions: CartPermissions =
            serde_json::from_value(json!({"canAddCartLine": true})).unwrap();
        assert_eq!(permissions, CartPermissions::new(true, false));
        assert!(permissions.allows_any());
        assert!(!CartPermissions::default().allows_any());
    }
}
