use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A normalized table row: field names trimmed and lowercased, values trimmed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Record {
    pub fields: HashMap<String, String>,
}

impl Record {
    pub fn new(fields: HashMap<String, String>) -> Self {
        Self { fields }
    }

    /// Missing fields are absent values, never errors.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

/// 13-character composite identifier: 10-char item code + 3-char color suffix.
///
/// Construction validates the shape up front so the code/suffix accessors can
/// slice without panicking. Keys of the wrong length (or non-ASCII keys) are
/// rejected; callers drop the offending row instead of truncating.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemColorKey(String);

impl ItemColorKey {
    pub const LEN: usize = 13;
    const CODE_LEN: usize = 10;

    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.len() == Self::LEN && trimmed.is_ascii() {
            Some(Self(trimmed.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First 10 characters: identifies the item/model.
    pub fn item_code(&self) -> &str {
        &self.0[..Self::CODE_LEN]
    }

    /// Last 3 characters: identifies the color variant.
    pub fn color_suffix(&self) -> &str {
        &self.0[Self::CODE_LEN..]
    }
}

impl fmt::Display for ItemColorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One product-color group, collapsed from every listing row sharing its key.
///
/// Scalar fields carry the first-encountered row's raw text; the group is
/// assumed homogeneous and never re-validated. `sizes` is the consolidated,
/// sorted, deduplicated size list (empty when no row supplied one).
#[derive(Debug, Clone)]
pub struct AggregatedProduct {
    pub key: ItemColorKey,
    pub item_model: String,
    pub outlet_full_price: String,
    pub discount: String,
    pub final_outlet_price: String,
    pub sizes: String,
}

/// One row of the pricing reference table.
#[derive(Debug, Clone)]
pub struct PricingEntry {
    pub key: String,
    pub color: String,
    /// Cleaned and parsed retail price; `None` when the raw text did not
    /// survive parsing. Never fatal to the table load.
    pub retail_price: Option<f64>,
}

/// How resolved image filenames become references in the output document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ImageMode {
    /// `{base_url}/{filename}`; a placeholder is substituted when nothing resolves.
    Remote,
    /// `{image_dir}/{filename}`; the image element is omitted when nothing resolves.
    Local,
}

/// Both input tables, fully loaded and normalized.
#[derive(Debug, Clone)]
pub struct SourceTables {
    pub listing: Vec<Record>,
    pub pricing: Vec<Record>,
}

/// Output of the transform stage: aggregated products and their rendered
/// card fragments, in matching (ascending key) order.
#[derive(Debug, Clone)]
pub struct TransformResult {
    pub products: Vec<AggregatedProduct>,
    pub cards: Vec<String>,
}
