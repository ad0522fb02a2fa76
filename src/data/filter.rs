//! Predicate filtering

use crate::models::{Dataset, FilteredView, FilterPredicate};

/// Records of `dataset` passing `predicate`, in dataset order.
///
/// Empty selections and inverted date ranges yield an empty view.
pub fn filter(dataset: &Dataset, predicate: &FilterPredicate) -> FilteredView {
    if predicate.is_unsatisfiable() {
        tracing::debug!("Predicate cannot match any record, skipping scan");
        return FilteredView::default();
    }

    let records = dataset
        .records()
        .iter()
        .filter(|record| predicate.matches(record))
        .cloned()
        .collect();

    FilteredView::new(records)
}
