use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Key holding how many upsell slots to show.
pub const NUMBER_OF_PRODUCTS: &str = "number_of_products";

/// Key holding the merchant's heading override.
pub const UPSELL_HEADING: &str = "upsell_heading";

/// Keys of the candidate product slots, in display order.
pub const UPSELL_PRODUCT_KEYS: [&str; 3] =
    ["upsell_product_1", "upsell_product_2", "upsell_product_3"];

/// One merchant-supplied setting value.
///
/// Settings arrive as loosely typed JSON, so every field is kept as whatever
/// primitive the merchant stored and interpreted by the resolver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    /// Objects, arrays and anything else the widget has no reading for.
    Other(Value),
}

impl SettingValue {
    /// Numeric reading of the value, the way the host scripting runtime coerces it.
    ///
    /// Text is trimmed and parsed; blank or unparseable text yields `None`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            SettingValue::Null => None,
            SettingValue::Bool(flag) => Some(if *flag { 1.0 } else { 0.0 }),
            SettingValue::Number(n) => Some(*n),
            SettingValue::Text(text) => text.trim().parse().ok(),
            SettingValue::Other(_) => None,
        }
    }

    /// Non-empty text, if this value is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            SettingValue::Text(text) if !text.is_empty() => Some(text),
            _ => None,
        }
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        SettingValue::Text(value.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(value: String) -> Self {
        SettingValue::Text(value)
    }
}

impl From<f64> for SettingValue {
    fn from(value: f64) -> Self {
        SettingValue::Number(value)
    }
}

impl From<u32> for SettingValue {
    fn from(value: u32) -> Self {
        SettingValue::Number(f64::from(value))
    }
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self {
        SettingValue::Bool(value)
    }
}

/// Read-only snapshot of the merchant configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Settings {
    values: HashMap<String, SettingValue>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a settings object as delivered by the host.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<SettingValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<SettingValue>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&SettingValue> {
        self.values.get(key)
    }
}
