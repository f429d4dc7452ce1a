//! Category breakdown
//!
//! Folds rows into buckets keyed by category display name. Buckets keep
//! first-seen order until the final stable sort by total, so equal totals
//! stay in the order their categories first appeared.

use std::collections::HashMap;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::row::ExpenseRow;
use crate::config::FallbackCategory;
use crate::models::money::decimal;
use crate::models::Money;

/// What to do with rows whose category could not be resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Uncategorized {
    /// Aggregate them under the fallback bucket
    Fallback,
    /// Leave them out entirely
    Skip,
}

/// Aggregates for a single category bucket
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBucket {
    #[serde(with = "decimal")]
    pub total: Money,
    pub count: usize,
    pub color: String,
    pub percentage: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// Ordered mapping from category name to its bucket
///
/// Serializes as a JSON object whose keys follow the bucket order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryBreakdown {
    entries: Vec<(String, CategoryBucket)>,
}

impl CategoryBreakdown {
    /// Fold rows into name-keyed buckets and derive their percentages
    pub(crate) fn fold<'a, I>(
        rows: I,
        fallback: &FallbackCategory,
        uncategorized: Uncategorized,
        with_icons: bool,
    ) -> Self
    where
        I: IntoIterator<Item = &'a ExpenseRow>,
    {
        let mut entries: Vec<(String, CategoryBucket)> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for row in rows {
            if row.category.is_none() && uncategorized == Uncategorized::Skip {
                continue;
            }

            let label = row.label(fallback);
            let amount = row.amount_or_zero();

            match index.get(label.name) {
                Some(&i) => {
                    let bucket = &mut entries[i].1;
                    bucket.total += amount;
                    bucket.count += 1;
                }
                None => {
                    index.insert(label.name.to_string(), entries.len());
                    entries.push((
                        label.name.to_string(),
                        CategoryBucket {
                            total: amount,
                            count: 1,
                            color: label.color.to_string(),
                            percentage: 0.0,
                            icon: with_icons.then(|| label.icon.to_string()),
                        },
                    ));
                }
            }
        }

        let grand_total: Money = entries.iter().map(|(_, b)| b.total).sum();
        for (_, bucket) in &mut entries {
            bucket.percentage = bucket.total.percent_of(grand_total);
        }

        // Vec::sort_by is stable
        entries.sort_by(|(_, a), (_, b)| b.total.cmp(&a.total));

        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&CategoryBucket> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, bucket)| bucket)
    }

    /// Buckets in display order (largest total first)
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CategoryBucket)> {
        self.entries.iter().map(|(name, bucket)| (name.as_str(), bucket))
    }

    /// Sum of all bucket totals
    pub fn total(&self) -> Money {
        self.entries.iter().map(|(_, b)| b.total).sum()
    }
}

impl Serialize for CategoryBreakdown {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, bucket) in &self.entries {
            map.serialize_entry(name, bucket)?;
        }
        map.end()
    }
}
