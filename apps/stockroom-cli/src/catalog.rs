//! # Startup Catalog
//!
//! Builds the store's initial products from JSON, once, at startup.
//!
//! Entries are plain DTOs; every product and promotion is constructed
//! through the validating constructors in `stockroom-core`, so a bad
//! catalog fails loudly instead of producing an invalid product.
//!
//! ## Entry Format
//! ```json
//! {
//!   "name": "Shipping",
//!   "price": "10",              // text or number, at most 2 decimals
//!   "quantity": 250,            // required, except forbidden for non_stocked
//!   "kind": "limited",          // standard (default) | non_stocked | limited
//!   "maximum": 1,               // required for limited
//!   "promotion": { "type": "percent_discount", "name": "30% off!", "percent": 30 }
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use stockroom_core::{Money, Product, Promotion, ValidationError};

/// The catalog shipped with the binary.
pub const DEMO_CATALOG: &str = include_str!("../catalog/demo.json");

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogEntry {
    pub name: String,
    pub price: PriceField,
    pub quantity: Option<i64>,
    #[serde(default)]
    pub kind: EntryKind,
    pub maximum: Option<i64>,
    pub promotion: Option<PromotionEntry>,
}

/// Prices may be written as `"12.50"` or `12.5`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum PriceField {
    Text(String),
    Number(serde_json::Number),
}

#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    #[default]
    Standard,
    NonStocked,
    Limited,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PromotionEntry {
    PercentDiscount { name: String, percent: f64 },
    SecondHalfPrice { name: String },
    ThirdOneFree { name: String },
}

/// Catalog loading failures.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("cannot read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("catalog entry {index} ({name}): {source}")]
    Entry {
        index: usize,
        name: String,
        source: ValidationError,
    },

    #[error("catalog entry {index} ({name}): limited products need a maximum")]
    MissingMaximum { index: usize, name: String },

    #[error("catalog entry {index} ({name}): stocked products need a quantity")]
    MissingQuantity { index: usize, name: String },

    #[error("catalog entry {index} ({name}): non_stocked products take no quantity")]
    UnexpectedQuantity { index: usize, name: String },
}

/// Loads products from `path`, or the built-in catalog when `None`.
pub fn load_catalog(path: Option<&Path>) -> Result<Vec<Product>, CatalogError> {
    match path {
        Some(path) => {
            let json = fs::read_to_string(path).map_err(|source| CatalogError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            parse_catalog(&json)
        }
        None => parse_catalog(DEMO_CATALOG),
    }
}

/// Parses a JSON array of catalog entries into products, in order.
pub fn parse_catalog(json: &str) -> Result<Vec<Product>, CatalogError> {
    let entries: Vec<CatalogEntry> = serde_json::from_str(json)?;

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| build_product(index, entry))
        .collect()
}

fn build_product(index: usize, entry: CatalogEntry) -> Result<Product, CatalogError> {
    let name = entry.name.clone();
    let invalid = |source: ValidationError| CatalogError::Entry {
        index,
        name: name.clone(),
        source,
    };

    let price = match &entry.price {
        PriceField::Text(text) => Money::parse(text),
        PriceField::Number(number) => Money::parse(&number.to_string()),
    }
    .map_err(&invalid)?;

    let stock = || {
        entry.quantity.ok_or_else(|| CatalogError::MissingQuantity {
            index,
            name: name.clone(),
        })
    };

    let mut product = match entry.kind {
        EntryKind::Standard => Product::new(entry.name, price, stock()?),
        EntryKind::NonStocked => {
            if entry.quantity.is_some() {
                return Err(CatalogError::UnexpectedQuantity {
                    index,
                    name: name.clone(),
                });
            }
            Product::non_stocked(entry.name, price)
        }
        EntryKind::Limited => {
            let quantity = stock()?;
            let maximum = entry
                .maximum
                .ok_or_else(|| CatalogError::MissingMaximum {
                    index,
                    name: name.clone(),
                })?;
            Product::limited(entry.name, price, quantity, maximum)
        }
    }
    .map_err(&invalid)?;

    if let Some(promotion) = entry.promotion {
        let promotion = match promotion {
            PromotionEntry::PercentDiscount { name, percent } => {
                Promotion::percent_discount(name, percent).map_err(&invalid)?
            }
            PromotionEntry::SecondHalfPrice { name } => Promotion::second_half_price(name),
            PromotionEntry::ThirdOneFree { name } => Promotion::third_one_free(name),
        };
        product.set_promotion(promotion);
    }

    Ok(product)
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_core::ProductKind;

    #[test]
    fn test_demo_catalog() {
        let products = load_catalog(None).unwrap();
        let names: Vec<_> = products.iter().map(Product::name).collect();

        assert_eq!(
            names,
            [
                "MacBook Air M2",
                "Bose QuietComfort Earbuds",
                "Google Pixel 7",
                "Windows License",
                "Shipping"
            ]
        );
        assert_eq!(products[0].price(), Money::from_cents(145_000));
        assert_eq!(
            products[0].promotion().map(Promotion::name),
            Some("Second Half price!")
        );
        assert_eq!(products[3].kind(), ProductKind::NonStocked);
        assert_eq!(products[3].promotion().map(Promotion::name), Some("30% off!"));
        assert_eq!(products[4].maximum(), Some(1));
        assert!(products[2].promotion().is_none());
    }

    #[test]
    fn test_numeric_prices() {
        let products = parse_catalog(r#"[{ "name": "Cable", "price": 4.5, "quantity": 3 }]"#).unwrap();
        assert_eq!(products[0].price(), Money::from_cents(450));
    }

    #[test]
    fn test_invalid_entries_are_rejected() {
        let err = parse_catalog(r#"[{ "name": "", "price": "1", "quantity": 1 }]"#).unwrap_err();
        assert!(matches!(err, CatalogError::Entry { index: 0, .. }));

        let err = parse_catalog(r#"[{ "name": "A", "price": "-1", "quantity": 1 }]"#).unwrap_err();
        assert!(matches!(err, CatalogError::Entry { .. }));

        let err = parse_catalog(r#"[{ "name": "A", "price": "ten", "quantity": 1 }]"#).unwrap_err();
        assert!(matches!(err, CatalogError::Entry { .. }));

        let err = parse_catalog(r#"[{ "name": "A", "price": "1", "quantity": 1, "kind": "limited" }]"#).unwrap_err();
        assert!(matches!(err, CatalogError::MissingMaximum { .. }));

        let err = parse_catalog(
            r#"[{ "name": "A", "price": "1", "quantity": 1, "promotion": { "type": "percent_discount", "name": "x", "percent": -5 } }]"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CatalogError::Entry {
                source: ValidationError::Negative { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_quantity_must_match_kind() {
        let err = parse_catalog(r#"[{ "name": "Phone", "price": "500" }]"#).unwrap_err();
        assert!(matches!(err, CatalogError::MissingQuantity { index: 0, .. }));

        let err = parse_catalog(r#"[{ "name": "Cap", "price": "1", "kind": "limited", "maximum": 1 }]"#)
            .unwrap_err();
        assert!(matches!(err, CatalogError::MissingQuantity { .. }));

        let err = parse_catalog(
            r#"[{ "name": "License", "price": "125", "kind": "non_stocked", "quantity": 5 }]"#,
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::UnexpectedQuantity { index: 0, .. }));

        // an explicit zero is still a stocked product with no stock
        let products = parse_catalog(r#"[{ "name": "Phone", "price": "500", "quantity": 0 }]"#).unwrap();
        assert_eq!(products[0].quantity(), 0);
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(parse_catalog("{"), Err(CatalogError::Parse(_))));
        assert!(matches!(
            parse_catalog(r#"[{ "name": "A", "price": "1", "colour": "red" }]"#),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = load_catalog(Some(Path::new("/definitely/not/here.json"))).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }
}
