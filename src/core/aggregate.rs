use crate::domain::model::{AggregatedProduct, ItemColorKey, Record};
use std::collections::{BTreeMap, BTreeSet};

/// Merge raw, possibly comma-delimited size strings into one deduplicated,
/// lexicographically sorted, `", "`-joined list. Pure and total: empty input
/// yields the empty string, and the operation is idempotent.
pub fn consolidate_sizes<'a, I>(raw_sizes: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let tokens: BTreeSet<&str> = raw_sizes
        .into_iter()
        .flat_map(|s| s.split(','))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect();

    tokens.into_iter().collect::<Vec<_>>().join(", ")
}

/// A row survives unless its `woodbury` field is numerically zero. Missing or
/// non-numeric values keep the row: the flag only ever opts a row out.
fn woodbury_enabled(record: &Record) -> bool {
    match record.get("woodbury").map(|v| v.trim().parse::<f64>()) {
        Some(Ok(value)) => value != 0.0,
        _ => true,
    }
}

/// Partition listing rows by composite key and collapse each group into one
/// `AggregatedProduct`.
///
/// Scalar fields take the first row of the group in original order; sizes are
/// consolidated across the whole group. Emission order is ascending key
/// order, so repeated runs over the same inputs produce identical output.
/// Rows filtered by the woodbury flag or carrying a malformed key never reach
/// a group.
pub fn aggregate_products(records: &[Record]) -> Vec<AggregatedProduct> {
    let mut groups: BTreeMap<ItemColorKey, Vec<&Record>> = BTreeMap::new();
    let mut filtered = 0usize;
    let mut malformed = 0usize;

    for record in records {
        if !woodbury_enabled(record) {
            filtered += 1;
            continue;
        }

        let raw_key = record.get("itemcolorkey").unwrap_or_default();
        let Some(key) = ItemColorKey::parse(raw_key) else {
            malformed += 1;
            tracing::warn!("Skipping row with malformed item color key: '{}'", raw_key);
            continue;
        };

        groups.entry(key).or_default().push(record);
    }

    if filtered > 0 {
        tracing::debug!("Filtered out {} rows with woodbury = 0", filtered);
    }
    if malformed > 0 {
        tracing::warn!("Skipped {} rows with malformed keys", malformed);
    }

    groups
        .into_iter()
        .map(|(key, rows)| {
            let first = |field: &str| -> String {
                rows.iter()
                    .find_map(|r| r.get(field))
                    .unwrap_or_default()
                    .to_string()
            };

            let sizes = consolidate_sizes(rows.iter().filter_map(|r| r.get("size")));

            AggregatedProduct {
                item_model: first("itemmodel"),
                outlet_full_price: first("outletfullprice"),
                discount: first("discount"),
                final_outlet_price: first("finaloutletprice"),
                sizes,
                key,
            }
        })
        .collect()
}
