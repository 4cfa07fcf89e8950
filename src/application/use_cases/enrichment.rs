// ============================================================
// ENRICHMENT USE CASE
// ============================================================
// Fill derived company columns from the address table and
// accumulate customer→company observations

use crate::application::use_cases::column_resolver::ResolvedColumns;
use crate::domain::dataset::TabularDataset;
use crate::domain::error::Result;
use crate::domain::mapping::{
    AddressTable, CustomerCompanyTable, COMPANY_COLUMN, COMPANY_NAME_COLUMN,
    LIFESTYLE_STAGE_COLUMN, WORKER_TAG,
};
use crate::infrastructure::persistence::lookup_store::{LookupStore, WriteOutcome};
use std::sync::Arc;
use tracing::info;

pub struct EnrichmentUseCase {
    address_store: Arc<LookupStore<AddressTable>>,
    customer_company_store: Arc<LookupStore<CustomerCompanyTable>>,
}

/// Per-run enrichment counters and the customer-company write result,
/// when one happened
#[derive(Debug)]
pub struct EnrichmentOutcome {
    pub matched: usize,
    pub unmatched: usize,
    pub customer_company_write: Option<WriteOutcome>,
}

impl EnrichmentUseCase {
    pub fn new(
        address_store: Arc<LookupStore<AddressTable>>,
        customer_company_store: Arc<LookupStore<CustomerCompanyTable>>,
    ) -> Self {
        Self {
            address_store,
            customer_company_store,
        }
    }

    /// Enrich every row in place. The three derived columns are inserted
    /// immediately after the address column (once; re-runs reuse them)
    /// and filled on every row: a mapping hit sets company id, company
    /// name and the worker tag, a miss sets all three to empty strings
    /// so the schema stays uniform.
    ///
    /// Observed (customer id, company name) pairs are merged into the
    /// customer-company table; at most one store write happens per run,
    /// and none when the merged table equals the loaded snapshot.
    pub async fn enrich(
        &self,
        dataset: &mut TabularDataset,
        columns: &ResolvedColumns,
    ) -> Result<EnrichmentOutcome> {
        dataset.insert_columns_after(
            &columns.address_column,
            &[COMPANY_COLUMN, COMPANY_NAME_COLUMN, LIFESTYLE_STAGE_COLUMN],
        );

        let mappings = self.address_store.load().await;
        let snapshot = self.customer_company_store.load().await;
        let mut merged = snapshot.clone();

        let mut matched = 0;
        for row in dataset.rows_mut() {
            let address = row
                .get(&columns.address_column)
                .unwrap_or("")
                .trim()
                .to_string();

            match mappings.get(&address) {
                Some(mapping) => {
                    matched += 1;
                    row.set(COMPANY_COLUMN, mapping.company.clone());
                    row.set(COMPANY_NAME_COLUMN, mapping.company_name.clone());
                    row.set(LIFESTYLE_STAGE_COLUMN, WORKER_TAG);

                    if let Some(customer_id_column) = &columns.customer_id_column {
                        let customer_id = row.get(customer_id_column).unwrap_or("");
                        if !customer_id.is_empty() && !mapping.company_name.is_empty() {
                            merged.insert(customer_id.to_string(), mapping.company_name.clone());
                        }
                    }
                }
                None => {
                    row.set(COMPANY_COLUMN, "");
                    row.set(COMPANY_NAME_COLUMN, "");
                    row.set(LIFESTYLE_STAGE_COLUMN, "");
                }
            }
        }

        let customer_company_write = if merged != snapshot {
            let message = format!("Update customer-company mappings ({} entries)", merged.len());
            Some(self.customer_company_store.write(merged, &message).await)
        } else {
            None
        };

        let unmatched = dataset.row_count() - matched;
        info!(
            matched,
            unmatched,
            wrote_customer_company = customer_company_write.is_some(),
            "enrichment complete"
        );

        Ok(EnrichmentOutcome {
            matched,
            unmatched,
            customer_company_write,
        })
    }
}
