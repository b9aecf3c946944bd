use crate::domain::model::{PricingEntry, Record};
use regex::Regex;

/// Lookup table over the pricing reference data. Built once from the loaded
/// rows, read-only afterward.
///
/// Entries keep the table's original order; both query operations resolve
/// ties by returning the first match in that order.
pub struct PricingLookup {
    entries: Vec<PricingEntry>,
}

impl PricingLookup {
    pub fn from_records(records: &[Record]) -> Self {
        // Strip currency symbols and thousands separators before parsing.
        let cleaner = Regex::new(r"[$,\s]").expect("static pattern");

        let mut skipped = 0usize;
        let entries: Vec<PricingEntry> = records
            .iter()
            .filter_map(|record| {
                let key = match record.get("itemcolorkey") {
                    Some(k) if !k.is_empty() => k.to_string(),
                    _ => {
                        skipped += 1;
                        return None;
                    }
                };

                let retail_price = record
                    .get("retailfp")
                    .and_then(|raw| cleaner.replace_all(raw, "").parse::<f64>().ok());

                Some(PricingEntry {
                    key,
                    color: record.get("color").unwrap_or_default().to_string(),
                    retail_price,
                })
            })
            .collect();

        if skipped > 0 {
            tracing::debug!("Skipped {} pricing rows without an item color key", skipped);
        }
        tracing::debug!("Pricing lookup built with {} entries", entries.len());

        Self { entries }
    }

    /// Color name of the first entry whose key ends with the 3-character
    /// color suffix.
    pub fn resolve_color_name(&self, color_suffix: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.key.ends_with(color_suffix))
            .map(|entry| entry.color.as_str())
    }

    /// Retail price of the first entry whose key matches exactly. Entries
    /// whose price text failed to parse resolve as absent.
    pub fn resolve_retail_price(&self, full_key: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|entry| entry.key == full_key)
            .and_then(|entry| entry.retail_price)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
