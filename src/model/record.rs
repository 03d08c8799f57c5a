use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Opaque, stable key of a purchasable product variant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MerchandiseId(String);

impl MerchandiseId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MerchandiseId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for MerchandiseId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Display for MerchandiseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether a record's merchandise is currently a line in the cart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CartMembership {
    /// No cart line for this merchandise.
    #[default]
    Absent,
    /// An add succeeded but the host did not report the new line yet.
    /// Resolved by the next cart snapshot.
    Pending,
    /// Present in the cart as the given line.
    InCart(String),
}

/// View state of one configured upsell product.
///
/// Created as a placeholder when the identifier list is established, filled in
/// once by the catalog loader, and overlaid with cart membership whenever the
/// cart changes.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    merchandise_id: MerchandiseId,
    pub title: String,
    pub image_url: String,
    pub image_alt: String,
    pub price_label: String,
    pub membership: CartMembership,
    pub loading: bool,
    /// Empty unless the catalog fetch failed or found nothing.
    pub error: String,
}

impl ProductRecord {
    /// A record waiting for its catalog fetch.
    pub fn placeholder(merchandise_id: MerchandiseId) -> Self {
        Self {
            merchandise_id,
            title: String::new(),
            image_url: String::new(),
            image_alt: String::new(),
            price_label: String::new(),
            membership: CartMembership::Absent,
            loading: true,
            error: String::new(),
        }
    }

    pub fn merchandise_id(&self) -> &MerchandiseId {
        &self.merchandise_id
    }

    pub fn is_in_cart(&self) -> bool {
        !matches!(self.membership, CartMembership::Absent)
    }

    pub fn cart_line_id(&self) -> Option<&str> {
        match &self.membership {
            CartMembership::InCart(line_id) => Some(line_id),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        !self.error.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_membership_accessors() {
        let mut record = ProductRecord::placeholder("gid://shopify/ProductVariant/1".into());
        assert!(record.loading);
        assert!(!record.is_in_cart());
        assert_eq!(record.cart_line_id(), None);

        record.membership = CartMembership::Pending;
        assert!(record.is_in_cart());
        assert_eq!(record.cart_line_id(), None);

        record.membership = CartMembership::InCart("gid://shopify/CartLine/9".into());
        assert!(record.is_in_cart());
        assert_eq!(record.cart_line_id(), Some("gid://shopify/CartLine/9"));
    }
}
