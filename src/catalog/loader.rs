use super::error::LoadError;
use super::query::{decode_node, query_variables, UPSELL_VARIANT_QUERY};
use crate::host::{CatalogQuery, Localizer};
use crate::model::{ImageNode, MerchandiseId, ProductRecord, VariantNode};
use futures::future::join_all;
use tracing::{debug, instrument, warn};

/// Title used when neither the variant nor its product has one.
pub const DEFAULT_TITLE: &str = "Product";

/// One loading placeholder per identifier, in order.
pub fn placeholders(ids: &[MerchandiseId]) -> Vec<ProductRecord> {
    ids.iter().cloned().map(ProductRecord::placeholder).collect()
}

/// Loads every identifier concurrently and returns the settled records in input order.
///
/// Never fails as a whole: a failed item comes back as a record with `error` set.
/// Cart membership is left `Absent`; merging it in is the caller's job.
#[instrument(skip_all, fields(count = ids.len()))]
pub async fn load_all(
    ids: &[MerchandiseId],
    catalog: &dyn CatalogQuery,
    localizer: &dyn Localizer,
) -> Vec<ProductRecord> {
    if ids.is_empty() {
        return Vec::new();
    }
    let records = join_all(ids.iter().map(|id| load_one(id.clone(), catalog, localizer))).await;
    let failed = records.iter().filter(|record| record.is_error()).count();
    debug!(loaded = records.len() - failed, failed, "Batch settled");
    records
}

/// Loads a single record.
pub async fn load_one(
    id: MerchandiseId,
    catalog: &dyn CatalogQuery,
    localizer: &dyn Localizer,
) -> ProductRecord {
    let result = fetch_variant(&id, catalog).await;
    let mut record = ProductRecord::placeholder(id);
    record.loading = false;
    match result {
        Ok(node) => populate(&mut record, &node, localizer),
        Err(error) => {
            warn!(merchandise_id = %record.merchandise_id(), %error, "Product failed to load");
            record.error = localizer.translate(error.message_key());
        }
    }
    record
}

/// Runs the variant query for `id`.
pub async fn fetch_variant(
    id: &MerchandiseId,
    catalog: &dyn CatalogQuery,
) -> Result<VariantNode, LoadError> {
    debug!(merchandise_id = %id, "Querying variant");
    let response = catalog.query(UPSELL_VARIANT_QUERY, query_variables(id)).await?;
    decode_node(response)?.ok_or_else(|| LoadError::NotFound(id.clone()))
}

/// Fills the display fields of `record` from `node`.
///
/// Title and image prefer the variant's own values and fall back to the parent
/// product. The price label is only built when both amount and currency are usable.
pub fn populate(record: &mut ProductRecord, node: &VariantNode, localizer: &dyn Localizer) {
    let parent = node.product.as_ref();

    let title = non_empty(&node.title)
        .or_else(|| parent.and_then(|product| non_empty(&product.title)))
        .unwrap_or(DEFAULT_TITLE)
        .to_string();

    let image = usable_image(node.image.as_ref())
        .or_else(|| usable_image(parent.and_then(|product| product.featured_image.as_ref())));

    record.image_url = image
        .and_then(|image| non_empty(&image.url))
        .unwrap_or_default()
        .to_string();
    record.image_alt = image
        .and_then(|image| non_empty(&image.alt_text))
        .map(str::to_string)
        .unwrap_or_else(|| title.clone());

    record.price_label = node
        .price
        .as_ref()
        .and_then(|price| {
            let amount = price.amount.as_ref()?.value()?;
            let currency = non_empty(&price.currency_code)?;
            Some(localizer.format_currency(amount, currency))
        })
        .unwrap_or_default();

    record.title = title;
    record.error.clear();
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|text| !text.is_empty())
}

fn usable_image(image: Option<&ImageNode>) -> Option<&ImageNode> {
    image.filter(|image| non_empty(&image.url).is_some())
}
