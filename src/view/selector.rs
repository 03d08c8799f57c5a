use crate::config::ResolvedConfig;
use crate::host::{Localizer, MessageKey};
use crate::model::{CartPermissions, MerchandiseId, ProductRecord};
use std::fmt::{self, Display};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowImage {
    pub url: String,
    pub alt: String,
}

/// One line of the product list, keyed by merchandise id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Row {
    Loading {
        key: MerchandiseId,
        message: String,
    },
    Error {
        key: MerchandiseId,
        message: String,
    },
    Product {
        key: MerchandiseId,
        checked: bool,
        image: Option<RowImage>,
        title: String,
        price: Option<String>,
    },
}

impl Row {
    pub fn key(&self) -> &MerchandiseId {
        match self {
            Row::Loading { key, .. } | Row::Error { key, .. } | Row::Product { key, .. } => key,
        }
    }

    fn from_record(record: &ProductRecord, localizer: &dyn Localizer) -> Self {
        let key = record.merchandise_id().clone();
        if record.loading {
            return Row::Loading {
                key,
                message: localizer.translate(MessageKey::LoadingProduct),
            };
        }
        if record.is_error() {
            return Row::Error {
                key,
                message: record.error.clone(),
            };
        }
        Row::Product {
            key,
            checked: record.is_in_cart(),
            image: (!record.image_url.is_empty()).then(|| RowImage {
                url: record.image_url.clone(),
                alt: record.image_alt.clone(),
            }),
            title: record.title.clone(),
            price: (!record.price_label.is_empty()).then(|| record.price_label.clone()),
        }
    }
}

/// What the host should render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    NoProductsConfigured { message: String },
    Loading { message: String },
    CartCannotBeModified { message: String },
    Products { heading: String, rows: Vec<Row> },
}

impl View {
    pub fn is_loading(&self) -> bool {
        matches!(self, View::Loading { .. })
    }

    pub fn rows(&self) -> &[Row] {
        match self {
            View::Products { rows, .. } => rows,
            _ => &[],
        }
    }

    /// Number of rows showing a checkbox.
    pub fn checkbox_count(&self) -> usize {
        self.rows()
            .iter()
            .filter(|row| matches!(row, Row::Product { .. }))
            .count()
    }
}

/// Everything the selector looks at.
#[derive(Debug, Clone, Copy)]
pub struct ViewInput<'a> {
    pub config: &'a ResolvedConfig,
    pub records: &'a [ProductRecord],
    pub initial_loading: bool,
    pub permissions: CartPermissions,
}

/// Picks the view for the current state. First matching rule wins.
pub fn select_view(input: ViewInput<'_>, localizer: &dyn Localizer) -> View {
    if input.config.merchandise_ids.is_empty() {
        return View::NoProductsConfigured {
            message: localizer.translate(MessageKey::NoProductsConfigured),
        };
    }
    if input.initial_loading {
        return View::Loading {
            message: localizer.translate(MessageKey::Loading),
        };
    }
    if !input.permissions.allows_any() {
        return View::CartCannotBeModified {
            message: localizer.translate(MessageKey::CartCannotBeModified),
        };
    }
    View::Products {
        heading: input.config.heading.clone(),
        rows: input
            .records
            .iter()
            .map(|record| Row::from_record(record, localizer))
            .collect(),
    }
}

impl Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            View::NoProductsConfigured { message }
            | View::Loading { message }
            | View::CartCannotBeModified { message } => write!(f, "[{message}]"),
            View::Products { heading, rows } => {
                write!(f, "{heading}")?;
                for row in rows {
                    let key = row.key();
                    match row {
                        Row::Loading { message, .. } => write!(f, "\n  ... {message} ({key})")?,
                        Row::Error { message, .. } => write!(f, "\n  !!! {message} ({key})")?,
                        Row::Product {
                            checked,
                            title,
                            price,
                            ..
                        } => {
                            let mark = if *checked { "x" } else { " " };
                            write!(f, "\n  [{mark}] {title}")?;
                            if let Some(price) = price {
                                write!(f, " ({price})")?;
                            }
                        }
                    }
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::EnglishLocalizer;
    use crate::model::CartMembership;

    fn config(ids: &[&str]) -> ResolvedConfig {
        ResolvedConfig {
            display_count: 3,
            merchandise_ids: ids.iter().map(|id| MerchandiseId::from(*id)).collect(),
            heading: "Add these".to_string(),
        }
    }

    fn shirt() -> ProductRecord {
        let mut record = ProductRecord::placeholder("shirt".into());
        record.loading = false;
        record.title = "Shirt".to_string();
        record.price_label = "USD 20.00".to_string();
        record.image_url = "https://cdn.example/shirt.png".to_string();
        record.image_alt = "Shirt".to_string();
        record.membership = CartMembership::InCart("l1".into());
        record
    }

    #[test]
    fn test_empty_configuration_wins_over_everything() {
        let config = config(&[]);
        for initial_loading in [true, false] {
            for permissions in [CartPermissions::default(), CartPermissions::all()] {
                let view = select_view(
                    ViewInput {
                        config: &config,
                        records: &[],
                        initial_loading,
                        permissions,
                    },
                    &EnglishLocalizer,
                );
                assert!(matches!(view, View::NoProductsConfigured { .. }));
            }
        }
    }

    #[test]
    fn test_loading_before_permission_check() {
        let config = config(&["shirt"]);
        let records = [ProductRecord::placeholder("shirt".into())];

        let view = select_view(
            ViewInput {
                config: &config,
                records: &records,
                initial_loading: true,
                permissions: CartPermissions::default(),
            },
            &EnglishLocalizer,
        );

        assert!(view.is_loading());
    }

    #[test]
    fn test_no_capabilities_shows_only_notice() {
        let config = config(&["shirt"]);
        let records = [shirt()];

        let view = select_view(
            ViewInput {
                config: &config,
                records: &records,
                initial_loading: false,
                permissions: CartPermissions::new(false, false),
            },
            &EnglishLocalizer,
        );

        assert_eq!(
            view,
            View::CartCannotBeModified {
                message: EnglishLocalizer.translate(MessageKey::CartCannotBeModified)
            }
        );
        assert_eq!(view.checkbox_count(), 0);
    }

    #[test]
    fn test_rows_follow_record_state() {
        let config = config(&["shirt", "socks", "hat"]);
        let mut failed = ProductRecord::placeholder("socks".into());
        failed.loading = false;
        failed.error = "Could not load product".to_string();
        let mut bare = ProductRecord::placeholder("hat".into());
        bare.loading = false;
        bare.title = "Hat".to_string();
        let records = [shirt(), failed, bare];

        let view = select_view(
            ViewInput {
                config: &config,
                records: &records,
                initial_loading: false,
                permissions: CartPermissions::new(true, false),
            },
            &EnglishLocalizer,
        );

        let View::Products { heading, rows } = &view else {
            panic!("expected product rows, got {view:?}");
        };
        assert_eq!(heading, "Add these");
        assert_eq!(
            rows[0],
            Row::Product {
                key: "shirt".into(),
                checked: true,
                image: Some(RowImage {
                    url: "https://cdn.example/shirt.png".into(),
                    alt: "Shirt".into(),
                }),
                title: "Shirt".into(),
                price: Some("USD 20.00".into()),
            }
        );
        assert_eq!(
            rows[1],
            Row::Error {
                key: "socks".into(),
                message: "Could not load product".into(),
            }
        );
        assert!(matches!(&rows[2], Row::Product { image: None, price: None, checked: false, .. }));
        assert_eq!(view.checkbox_count(), 2);
        assert_eq!(
            view.to_string(),
            "Add these\n  [x] Shirt (USD 20.00)\n  !!! Could not load product (socks)\n  [ ] Hat"
        );
    }

    #[test]
    fn test_placeholder_rows_after_first_batch() {
        let config = config(&["shirt"]);
        let records = [ProductRecord::placeholder("shirt".into())];

        let view = select_view(
            ViewInput {
                config: &config,
                records: &records,
                initial_loading: false,
                permissions: CartPermissions::all(),
            },
            &EnglishLocalizer,
        );

        assert_eq!(
            view.rows(),
            &[Row::Loading {
                key: "shirt".into(),
                message: EnglishLocalizer.translate(MessageKey::LoadingProduct),
            }]
        );
        assert_eq!(view.rows()[0].key().as_str(), "shirt");
    }
}
