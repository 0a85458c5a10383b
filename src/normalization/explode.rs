use super::labels::{canonical_tokens, CategoryMapping};

/// One per-category copy of a source record.
#[derive(Debug, Clone, PartialEq)]
pub struct ExplodedRow<R> {
    /// Canonical category token this copy stands for.
    pub token: String,
    pub record: R,
}

/// Fan each record out into one row per canonical token of the selected field.
///
/// Records whose field normalizes to nothing are left out entirely; that is
/// the inclusion rule for every aggregate built on top of this.
pub fn expand<R, F>(records: &[R], field: F, mapping: &CategoryMapping) -> Vec<ExplodedRow<R>>
where
    R: Clone,
    F: Fn(&R) -> Option<&str>,
{
    records
        .iter()
        .flat_map(|record| {
            canonical_tokens(field(record), mapping)
                .into_iter()
                .map(move |token| ExplodedRow {
                    token,
                    record: record.clone(),
                })
        })
        .collect()
}
