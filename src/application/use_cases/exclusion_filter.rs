// ============================================================
// EXCLUSION FILTER USE CASE
// ============================================================
// Drop rows whose leading identifier is on the exclusion list

use crate::application::use_cases::column_resolver::username_column;
use crate::domain::dataset::TabularDataset;
use crate::domain::mapping::ExclusionList;
use crate::infrastructure::persistence::lookup_store::LookupStore;
use std::sync::Arc;
use tracing::info;

pub struct ExclusionFilterUseCase {
    exclusion_store: Arc<LookupStore<ExclusionList>>,
}

#[derive(Debug)]
pub struct FilterOutcome {
    pub original_count: usize,
    pub surviving_count: usize,
    pub removed_count: usize,
}

impl ExclusionFilterUseCase {
    pub fn new(exclusion_store: Arc<LookupStore<ExclusionList>>) -> Self {
        Self { exclusion_store }
    }

    /// Remove rows whose first-column value, lowercased, is on the
    /// exclusion list. Rows with a blank identifier are always kept,
    /// and surviving rows keep their order.
    pub async fn filter(&self, dataset: &mut TabularDataset) -> FilterOutcome {
        let original_count = dataset.row_count();

        let excluded = self.exclusion_store.load().await;
        let column = username_column(dataset);

        if let (Some(column), false) = (column, excluded.is_empty()) {
            dataset.retain(|row| {
                let value = row.get(&column).unwrap_or("");
                if value.is_empty() {
                    return true;
                }
                !excluded.contains(&value.to_lowercase())
            });
        }

        let surviving_count = dataset.row_count();
        let removed_count = original_count - surviving_count;
        if removed_count > 0 {
            info!(removed_count, surviving_count, "excluded users filtered out");
        }

        FilterOutcome {
            original_count,
            surviving_count,
            removed_count,
        }
    }
}
