use crate::host::{Localizer, MessageKey};
use crate::model::{
    MerchandiseId, SettingValue, Settings, NUMBER_OF_PRODUCTS, UPSELL_HEADING, UPSELL_PRODUCT_KEYS,
};
use tracing::warn;

/// Upper bound on upsell slots.
pub const MAX_PRODUCTS: usize = UPSELL_PRODUCT_KEYS.len();

/// Slots shown when the merchant did not pick a usable count.
pub const DEFAULT_PRODUCT_COUNT: usize = 3;

/// What the widget shows, derived from one settings snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Number of slots considered, in `1..=MAX_PRODUCTS`.
    pub display_count: usize,
    /// Configured products in slot order, without blanks or duplicates.
    pub merchandise_ids: Vec<MerchandiseId>,
    pub heading: String,
}

impl ResolvedConfig {
    /// True when `other` configures a different product list, compared by value.
    pub fn products_differ(&self, other: &ResolvedConfig) -> bool {
        self.merchandise_ids != other.merchandise_ids
    }
}

/// Derives the full configuration.
pub fn resolve(settings: &Settings, localizer: &dyn Localizer) -> ResolvedConfig {
    let display_count = display_count(settings);
    ResolvedConfig {
        display_count,
        merchandise_ids: candidate_ids(settings, display_count),
        heading: heading(settings, localizer),
    }
}

/// `number_of_products` clamped to `[1, MAX_PRODUCTS]`.
///
/// Missing, zero or non-numeric values mean [`DEFAULT_PRODUCT_COUNT`].
/// Fractions are truncated after clamping.
pub fn display_count(settings: &Settings) -> usize {
    let requested = settings
        .get(NUMBER_OF_PRODUCTS)
        .and_then(SettingValue::as_number)
        .filter(|n| *n != 0.0 && !n.is_nan())
        .unwrap_or(DEFAULT_PRODUCT_COUNT as f64);
    requested.clamp(1.0, MAX_PRODUCTS as f64) as usize
}

/// The first `count` product slots, keeping only non-empty text and the first
/// occurrence of each identifier.
pub fn candidate_ids(settings: &Settings, count: usize) -> Vec<MerchandiseId> {
    let mut ids: Vec<MerchandiseId> = Vec::with_capacity(count);
    for key in UPSELL_PRODUCT_KEYS.iter().take(count) {
        let id = match settings.get(key) {
            None | Some(SettingValue::Null) => continue,
            Some(SettingValue::Text(text)) if text.is_empty() => continue,
            Some(SettingValue::Text(text)) => MerchandiseId::new(text.as_str()),
            Some(other) => {
                warn!(key, value = ?other, "Ignoring non-text product setting");
                continue;
            }
        };
        if ids.contains(&id) {
            warn!(key, merchandise_id = %id, "Ignoring duplicate product setting");
            continue;
        }
        ids.push(id);
    }
    ids
}

/// Merchant heading override, else the translated default.
pub fn heading(settings: &Settings, localizer: &dyn Localizer) -> String {
    settings
        .get(UPSELL_HEADING)
        .and_then(SettingValue::as_text)
        .map(str::to_string)
        .unwrap_or_else(|| localizer.translate(MessageKey::SectionHeading))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::EnglishLocalizer;

    fn three_products() -> Settings {
        Settings::new()
            .with("upsell_product_1", "p1")
            .with("upsell_product_2", "p2")
            .with("upsell_product_3", "p3")
    }

    fn id_strings(config: &ResolvedConfig) -> Vec<&str> {
        config.merchandise_ids.iter().map(MerchandiseId::as_str).collect()
    }

    #[test]
    fn test_count_defaults_and_clamps() {
        let with_count =
            |value: SettingValue| display_count(&Settings::new().with(NUMBER_OF_PRODUCTS, value));

        assert_eq!(display_count(&Settings::new()), 3);
        assert_eq!(with_count(SettingValue::Number(2.0)), 2);
        assert_eq!(with_count(SettingValue::Number(0.0)), 3);
        assert_eq!(with_count(SettingValue::Number(-4.0)), 1);
        assert_eq!(with_count(SettingValue::Number(12.0)), 3);
        assert_eq!(with_count(SettingValue::Number(2.7)), 2);
        assert_eq!(with_count(SettingValue::from("1")), 1);
        assert_eq!(with_count(SettingValue::from("lots")), 3);
        assert_eq!(with_count(SettingValue::Null), 3);
    }

    #[test]
    fn test_ids_sliced_to_count_in_order() {
        let config = resolve(&three_products().with(NUMBER_OF_PRODUCTS, 2u32), &EnglishLocalizer);

        assert_eq!(config.display_count, 2);
        assert_eq!(id_strings(&config), vec!["p1", "p2"]);
    }

    #[test]
    fn test_blank_slots_are_skipped_after_slicing() {
        let settings = Settings::new()
            .with("upsell_product_1", "")
            .with("upsell_product_2", "p2")
            .with("upsell_product_3", "p3")
            .with(NUMBER_OF_PRODUCTS, 2u32);

        let config = resolve(&settings, &EnglishLocalizer);

        assert_eq!(id_strings(&config), vec!["p2"]);
    }

    #[test]
    fn test_duplicates_and_non_text_are_dropped() {
        let settings = Settings::new()
            .with("upsell_product_1", "p1")
            .with("upsell_product_2", 7u32)
            .with("upsell_product_3", "p1");

        let config = resolve(&settings, &EnglishLocalizer);

        assert_eq!(id_strings(&config), vec!["p1"]);
    }

    #[test]
    fn test_nested_product_setting_is_skipped() {
        let settings = Settings::from_json(
            r#"{
                "upsell_product_1": "gid://shopify/ProductVariant/1",
                "upsell_product_2": {"id": "x"},
                "number_of_products": [2],
                "theme": ["a"]
            }"#,
        )
        .unwrap();

        let config = resolve(&settings, &EnglishLocalizer);

        assert_eq!(config.display_count, 3);
        assert_eq!(id_strings(&config), vec!["gid://shopify/ProductVariant/1"]);
    }

    #[test]
    fn test_no_products_configured() {
        let config = resolve(&Settings::new(), &EnglishLocalizer);

        assert!(config.merchandise_ids.is_empty());
        assert_eq!(config.display_count, 3);
    }

    #[test]
    fn test_heading_override_and_default() {
        let default = resolve(&Settings::new(), &EnglishLocalizer);
        assert_eq!(default.heading, EnglishLocalizer.translate(MessageKey::SectionHeading));

        let blank = resolve(&Settings::new().with(UPSELL_HEADING, ""), &EnglishLocalizer);
        assert_eq!(blank.heading, default.heading);

        let custom = resolve(
            &Settings::new().with(UPSELL_HEADING, "Complete the look"),
            &EnglishLocalizer,
        );
        assert_eq!(custom.heading, "Complete the look");
    }

    #[test]
    fn test_products_compared_by_value() {
        let first = resolve(&three_products(), &EnglishLocalizer);
        let renamed = resolve(&three_products().with(UPSELL_HEADING, "New"), &EnglishLocalizer);
        let fewer = resolve(&three_products().with(NUMBER_OF_PRODUCTS, 1u32), &EnglishLocalizer);

        assert!(!first.products_differ(&renamed));
        assert!(first.products_differ(&fewer));
    }
}
