use std::fmt::Display;

/// The translation keys the widget looks up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    SectionHeading,
    NoProductsConfigured,
    Loading,
    CartCannotBeModified,
    LoadingProduct,
    CouldNotLoadProduct,
    FailedToLoadProduct,
}

impl MessageKey {
    #[cfg(test)]
    pub const ALL: [MessageKey; 7] = [
        MessageKey::SectionHeading,
        MessageKey::NoProductsConfigured,
        MessageKey::Loading,
        MessageKey::CartCannotBeModified,
        MessageKey::LoadingProduct,
        MessageKey::CouldNotLoadProduct,
        MessageKey::FailedToLoadProduct,
    ];

    /// The key as it appears in the locale files.
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKey::SectionHeading => "sectionHeading",
            MessageKey::NoProductsConfigured => "noProductsConfigured",
            MessageKey::Loading => "loading",
            MessageKey::CartCannotBeModified => "cartCannotBeModified",
            MessageKey::LoadingProduct => "loadingProduct",
            MessageKey::CouldNotLoadProduct => "couldNotLoadProduct",
            MessageKey::FailedToLoadProduct => "failedToLoadProduct",
        }
    }
}

impl Display for MessageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Locale-aware strings and currency formatting.
pub trait Localizer: Send + Sync {
    fn translate(&self, key: MessageKey) -> String;

    fn format_currency(&self, amount: f64, currency: &str) -> String;
}

/// Built-in English strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishLocalizer;

impl Localizer for EnglishLocalizer {
    fn translate(&self, key: MessageKey) -> String {
        let text = match key {
            MessageKey::SectionHeading => "You might also like",
            MessageKey::NoProductsConfigured => "No upsell products are configured",
            MessageKey::Loading => "Loading products...",
            MessageKey::CartCannotBeModified => "Your cart cannot be modified right now",
            MessageKey::LoadingProduct => "Loading product...",
            MessageKey::CouldNotLoadProduct => "Could not load product",
            MessageKey::FailedToLoadProduct => "Failed to load product",
        };
        text.to_string()
    }

    fn format_currency(&self, amount: f64, currency: &str) -> String {
        format!("{currency} {amount:.2}")
    }
}
