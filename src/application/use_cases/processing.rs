// ============================================================
// PROCESSING USE CASE
// ============================================================
// Full pipeline over an uploaded dataset: resolve columns,
// enrich, then filter excluded users

use crate::application::use_cases::column_resolver::resolve_columns;
use crate::application::use_cases::enrichment::EnrichmentUseCase;
use crate::application::use_cases::exclusion_filter::ExclusionFilterUseCase;
use crate::domain::dataset::TabularDataset;
use crate::domain::error::{AppError, Result};
use crate::infrastructure::persistence::lookup_store::WriteOutcome;
use tracing::info;

pub struct ProcessingUseCase {
    enrichment: EnrichmentUseCase,
    exclusion_filter: ExclusionFilterUseCase,
}

/// Summary of one processing run
#[derive(Debug)]
pub struct ProcessingReport {
    pub address_column: String,
    pub original_rows: usize,
    pub matched: usize,
    pub unmatched: usize,
    pub removed_rows: usize,
    pub surviving_rows: usize,
    pub customer_company_write: Option<WriteOutcome>,
}

impl ProcessingUseCase {
    pub fn new(enrichment: EnrichmentUseCase, exclusion_filter: ExclusionFilterUseCase) -> Self {
        Self {
            enrichment,
            exclusion_filter,
        }
    }

    /// Run the pipeline in place. Enrichment happens before filtering, so
    /// the customer-company table accumulates from every row, including
    /// ones the exclusion filter then drops.
    pub async fn process(&self, dataset: &mut TabularDataset) -> Result<ProcessingReport> {
        if dataset.is_empty() {
            return Err(AppError::EmptyDataset);
        }

        let columns = resolve_columns(dataset)?;
        let original_rows = dataset.row_count();

        let enrichment = self.enrichment.enrich(dataset, &columns).await?;
        let filter = self.exclusion_filter.filter(dataset).await;

        info!(
            address_column = %columns.address_column,
            original_rows,
            matched = enrichment.matched,
            removed_rows = filter.removed_count,
            "processing complete"
        );

        Ok(ProcessingReport {
            address_column: columns.address_column,
            original_rows,
            matched: enrichment.matched,
            unmatched: enrichment.unmatched,
            removed_rows: filter.removed_count,
            surviving_rows: filter.surviving_count,
            customer_company_write: enrichment.customer_company_write,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dataset::{Cell, Row};
    use crate::infrastructure::persistence::github::RemoteStore;
    use crate::infrastructure::persistence::lookup_store::LookupStore;
    use crate::infrastructure::persistence::testing::FakeRemote;
    use crate::infrastructure::persistence::{
        ADDRESS_MAPPINGS_REMOTE_PATH, CUSTOMER_COMPANY_REMOTE_PATH, EXCLUDED_NAMES_REMOTE_PATH,
    };
    use std::sync::Arc;

    const MAPPINGS_JSON: &str = r#"{"123 Main St":{"Company":"987","Company Name":"Acme"}}"#;

    fn row(username: &str, address: &str) -> Row {
        Row::new(vec![
            Cell::new("Username", username),
            Cell::new("AddressStreet", address),
            Cell::new("UnitCustomerID", "C-1"),
        ])
    }

    fn pipeline(remote: Arc<FakeRemote>) -> ProcessingUseCase {
        let address_store = Arc::new(LookupStore::new(
            "address_mappings",
            ADDRESS_MAPPINGS_REMOTE_PATH,
            Some(remote.clone() as Arc<dyn RemoteStore>),
            None,
        ));
        let customer_company_store = Arc::new(LookupStore::new(
            "customer_company",
            CUSTOMER_COMPANY_REMOTE_PATH,
            Some(remote.clone() as Arc<dyn RemoteStore>),
            None,
        ));
        let exclusion_store = Arc::new(LookupStore::new(
            "excluded_names",
            EXCLUDED_NAMES_REMOTE_PATH,
            Some(remote as Arc<dyn RemoteStore>),
            None,
        ));
        ProcessingUseCase::new(
            EnrichmentUseCase::new(address_store, customer_company_store),
            ExclusionFilterUseCase::new(exclusion_store),
        )
    }

    #[tokio::test]
    async fn test_empty_dataset_is_rejected_up_front() {
        let pipeline = pipeline(Arc::new(FakeRemote::default()));
        let mut dataset = TabularDataset::default();
        let err = pipeline.process(&mut dataset).await.unwrap_err();
        assert!(matches!(err, AppError::EmptyDataset));
    }

    #[tokio::test]
    async fn test_missing_address_column_fails_before_any_mutation() {
        let pipeline = pipeline(Arc::new(FakeRemote::default()));
        let mut dataset = TabularDataset::new(vec![Row::new(vec![Cell::new("Username", "alice")])]);

        let err = pipeline.process(&mut dataset).await.unwrap_err();
        assert!(matches!(err, AppError::SchemaError(_)));
        assert_eq!(dataset.columns(), vec!["Username"]);
    }

    #[tokio::test]
    async fn test_full_run_enriches_then_filters() {
        let remote = Arc::new(FakeRemote::with_file(
            ADDRESS_MAPPINGS_REMOTE_PATH,
            MAPPINGS_JSON,
        ));
        remote.set_file(EXCLUDED_NAMES_REMOTE_PATH, r#"["bob"]"#);
        let pipeline = pipeline(remote);

        let mut dataset = TabularDataset::new(vec![
            row("alice", "123 Main St"),
            row("bob", "123 Main St"),
            row("carol", "1 Nowhere Ln"),
        ]);

        let report = pipeline.process(&mut dataset).await.unwrap();
        assert_eq!(report.address_column, "AddressStreet");
        assert_eq!(report.original_rows, 3);
        assert_eq!(report.matched, 2);
        assert_eq!(report.unmatched, 1);
        assert_eq!(report.removed_rows, 1);
        assert_eq!(report.surviving_rows, 2);
        assert_eq!(dataset.row_count(), 2);
        assert_eq!(dataset.rows()[0].get("Company Name"), Some("Acme"));
    }

    #[tokio::test]
    async fn test_excluded_rows_still_feed_customer_company_table() {
        let remote = Arc::new(FakeRemote::with_file(
            ADDRESS_MAPPINGS_REMOTE_PATH,
            MAPPINGS_JSON,
        ));
        remote.set_file(EXCLUDED_NAMES_REMOTE_PATH, r#"["bob"]"#);
        let pipeline = pipeline(remote.clone());

        let mut dataset = TabularDataset::new(vec![row("bob", "123 Main St")]);
        let report = pipeline.process(&mut dataset).await.unwrap();

        assert_eq!(dataset.row_count(), 0);
        assert!(report.customer_company_write.is_some());
        let stored = remote.content(CUSTOMER_COMPANY_REMOTE_PATH).unwrap();
        assert!(stored.contains("\"C-1\""));
    }
}
