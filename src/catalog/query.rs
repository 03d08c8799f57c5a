use crate::host::TransportError;
use crate::model::{MerchandiseId, QueryResponse, VariantNode};
use serde_json::{json, Value};

/// Fetches one variant with its parent product as fallback source for title and image.
pub const UPSELL_VARIANT_QUERY: &str = r#"query UpsellVariant($id: ID!) {
  node(id: $id) {
    ... on ProductVariant {
      id
      title
      image {
        url
        altText
      }
      price {
        amount
        currencyCode
      }
      product {
        title
        featuredImage {
          url
          altText
        }
      }
    }
  }
}"#;

pub fn query_variables(id: &MerchandiseId) -> Value {
    json!({ "id": id })
}

/// Extracts `data.node`. `Ok(None)` means the query matched nothing.
pub fn decode_node(response: QueryResponse) -> Result<Option<VariantNode>, TransportError> {
    let node = response
        .data
        .and_then(|mut data| data.get_mut("node").map(Value::take))
        .unwrap_or(Value::Null);
    if node.is_null() {
        return Ok(None);
    }
    serde_json::from_value(node)
        .map(Some)
        .map_err(|e| TransportError::Malformed(e.to_string()))
}
