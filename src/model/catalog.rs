//! Catalog payloads as returned by the host query transport.
//!
//! Every field is optional: the decoder accepts partial nodes and the loader
//! applies the fallbacks.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Raw result of one catalog query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub data: Option<Value>,
}

impl QueryResponse {
    /// A response whose `node` is the given variant.
    pub fn with_node(node: &VariantNode) -> Self {
        Self {
            data: Some(json!({ "node": node })),
        }
    }

    /// A response that matched nothing (`node: null`).
    pub fn not_found() -> Self {
        Self {
            data: Some(json!({ "node": null })),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageNode {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub alt_text: Option<String>,
}

/// Money amounts come back as decimal strings, but some transports hand out numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Number(f64),
    Text(String),
}

impl Amount {
    pub fn value(&self) -> Option<f64> {
        let value = match self {
            Amount::Number(n) => Some(*n),
            Amount::Text(text) => text.trim().parse::<f64>().ok(),
        };
        value.filter(|n| n.is_finite())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoneyNode {
    #[serde(default)]
    pub amount: Option<Amount>,
    #[serde(default)]
    pub currency_code: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentProduct {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub featured_image: Option<ImageNode>,
}

/// A product variant node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantNode {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub image: Option<ImageNode>,
    #[serde(default)]
    pub price: Option<MoneyNode>,
    #[serde(default)]
    pub product: Option<ParentProduct>,
}

impl VariantNode {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    pub fn titled(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn priced(mut self, amount: impl Into<String>, currency_code: impl Into<String>) -> Self {
        self.price = Some(MoneyNode {
            amount: Some(Amount::Text(amount.into())),
            currency_code: Some(currency_code.into()),
        });
        self
    }

    pub fn with_image(mut self, url: impl Into<String>, alt_text: Option<&str>) -> Self {
        self.image = Some(ImageNode {
            url: Some(url.into()),
            alt_text: alt_text.map(str::to_string),
        });
        self
    }

    pub fn with_parent(mut self, title: Option<&str>, featured_image: Option<ImageNode>) -> Self {
        self.product = Some(ParentProduct {
            title: title.map(str::to_string),
            featured_image,
        });
        self
    }
}
