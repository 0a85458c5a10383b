//! Group-by aggregates over exploded rows.
//!
//! Every aggregate refuses to run on an empty input and reports [`NoData`]
//! instead, so no caller ever charts an empty table or divides by zero.

use std::collections::{BTreeSet, HashMap};

use indexmap::IndexMap;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("No data after processing")]
pub struct NoData;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryMean {
    pub category: String,
    pub mean: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// Mean rating per category, highest mean first.
///
/// Equal means keep the order in which their categories were first seen.
pub fn mean_by_category<'a, I>(rows: I) -> Result<Vec<CategoryMean>, NoData>
where
    I: IntoIterator<Item = (&'a str, f64)>,
{
    let mut acc: IndexMap<&str, (f64, usize)> = IndexMap::new();
    for (category, rating) in rows {
        let slot = acc.entry(category).or_insert((0.0, 0));
        slot.0 += rating;
        slot.1 += 1;
    }
    if acc.is_empty() {
        return Err(NoData);
    }

    let mut out: Vec<CategoryMean> = acc
        .into_iter()
        .map(|(category, (sum, count))| CategoryMean {
            category: category.to_string(),
            mean: sum / count as f64,
            count,
        })
        .collect();
    // sort_by is stable
    out.sort_by(|a, b| b.mean.total_cmp(&a.mean));
    Ok(out)
}

/// Row count per category, largest first; ties keep first-seen order.
pub fn count_by_category<'a, I>(categories: I) -> Result<Vec<CategoryCount>, NoData>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut acc: IndexMap<&str, usize> = IndexMap::new();
    for category in categories {
        *acc.entry(category).or_insert(0) += 1;
    }
    if acc.is_empty() {
        return Err(NoData);
    }

    let mut out: Vec<CategoryCount> = acc
        .into_iter()
        .map(|(category, count)| CategoryCount {
            category: category.to_string(),
            count,
        })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count));
    Ok(out)
}

/// Five-number summary plus outliers for one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxStats {
    pub category: String,
    pub count: usize,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    /// Smallest observation within 1.5 IQR below `q1`.
    pub whisker_low: f64,
    /// Largest observation within 1.5 IQR above `q3`.
    pub whisker_high: f64,
    pub outliers: Vec<f64>,
}

impl BoxStats {
    /// Summarise a non-empty sample. Returns `None` for an empty one.
    pub fn from_values(category: impl Into<String>, values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let q1 = quantile(&sorted, 0.25);
        let median = quantile(&sorted, 0.5);
        let q3 = quantile(&sorted, 0.75);
        let iqr = q3 - q1;
        let low_fence = q1 - 1.5 * iqr;
        let high_fence = q3 + 1.5 * iqr;

        let inside: Vec<f64> = sorted
            .iter()
            .copied()
            .filter(|v| (low_fence..=high_fence).contains(v))
            .collect();
        let whisker_low = inside.first().copied().unwrap_or(q1);
        let whisker_high = inside.last().copied().unwrap_or(q3);
        let outliers = sorted
            .iter()
            .copied()
            .filter(|v| !(low_fence..=high_fence).contains(v))
            .collect();

        Some(Self {
            category: category.into(),
            count: sorted.len(),
            q1,
            median,
            q3,
            whisker_low,
            whisker_high,
            outliers,
        })
    }
}

/// Linear-interpolated quantile of an ascending, non-empty slice.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Rating distribution per category.
///
/// Boxes come out in descending row-count order (ties first-seen), matching
/// [`count_by_category`].
pub fn distribution_by_category<'a, I>(rows: I) -> Result<Vec<BoxStats>, NoData>
where
    I: IntoIterator<Item = (&'a str, f64)>,
{
    let mut samples: IndexMap<&str, Vec<f64>> = IndexMap::new();
    for (category, rating) in rows {
        samples.entry(category).or_default().push(rating);
    }
    if samples.is_empty() {
        return Err(NoData);
    }

    let mut out: Vec<BoxStats> = samples
        .into_iter()
        .filter_map(|(category, values)| BoxStats::from_values(category, &values))
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count));
    Ok(out)
}

/// Sparse mean-rating table keyed by (row label, column label).
///
/// Row and column labels are sorted ascending. Cells without observations are
/// absent, never zero.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RatingGrid {
    pub rows: Vec<String>,
    pub columns: Vec<String>,
    cells: HashMap<(usize, usize), f64>,
}

impl RatingGrid {
    pub fn get(&self, row: usize, column: usize) -> Option<f64> {
        self.cells.get(&(row, column)).copied()
    }

    /// Lookup by labels instead of indices.
    pub fn value(&self, row: &str, column: &str) -> Option<f64> {
        let r = self.rows.iter().position(|l| l == row)?;
        let c = self.columns.iter().position(|l| l == column)?;
        self.get(r, c)
    }

    /// Number of populated cells.
    pub fn filled(&self) -> usize {
        self.cells.len()
    }

    /// Smallest and largest cell value.
    pub fn range(&self) -> Option<(f64, f64)> {
        self.cells.values().fold(None, |acc, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }
}

/// Pivot (row, column, rating) observations into a [`RatingGrid`] of means.
pub fn mean_grid<'a, I>(rows: I) -> Result<RatingGrid, NoData>
where
    I: IntoIterator<Item = (&'a str, &'a str, f64)>,
{
    let mut acc: HashMap<(&str, &str), (f64, usize)> = HashMap::new();
    let mut row_labels = BTreeSet::new();
    let mut column_labels = BTreeSet::new();
    for (row, column, rating) in rows {
        row_labels.insert(row);
        column_labels.insert(column);
        let slot = acc.entry((row, column)).or_insert((0.0, 0));
        slot.0 += rating;
        slot.1 += 1;
    }
    if acc.is_empty() {
        return Err(NoData);
    }

    let rows: Vec<String> = row_labels.into_iter().map(str::to_string).collect();
    let columns: Vec<String> = column_labels.into_iter().map(str::to_string).collect();
    let mut cells = HashMap::with_capacity(acc.len());
    for ((row, column), (sum, count)) in acc {
        // both labels were inserted above
        let (Some(r), Some(c)) = (
            rows.iter().position(|l| l == row),
            columns.iter().position(|l| l == column),
        ) else {
            continue;
        };
        cells.insert((r, c), sum / count as f64);
    }

    Ok(RatingGrid {
        rows,
        columns,
        cells,
    })
}
