// ============================================================
// MAPPING ADMIN USE CASE
// ============================================================
// CRUD over the persisted address→company table

use crate::domain::error::{AppError, Result};
use crate::domain::mapping::{AddressTable, CompanyMapping};
use crate::infrastructure::persistence::lookup_store::LookupStore;
use std::sync::Arc;
use tracing::info;

pub struct MappingAdminUseCase {
    store: Arc<LookupStore<AddressTable>>,
}

/// Result of a successful admin mutation. `durable` is false when the
/// change only reached the session (in-process cache and, at best, the
/// local fallback file).
#[derive(Debug)]
pub struct AdminOutcome {
    pub total: usize,
    pub durable: bool,
    pub warning: Option<String>,
}

impl MappingAdminUseCase {
    pub fn new(store: Arc<LookupStore<AddressTable>>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> AddressTable {
        self.store.load().await
    }

    /// Add a mapping. All three fields are required and trimmed before
    /// storage; an address that already exists (after trim) fails with
    /// `DuplicateKey` and leaves the table untouched.
    pub async fn add(
        &self,
        address: &str,
        company: &str,
        company_name: &str,
    ) -> Result<AdminOutcome> {
        let address = address.trim();
        let company = company.trim();
        let company_name = company_name.trim();

        if address.is_empty() || company.is_empty() || company_name.is_empty() {
            return Err(AppError::ValidationError(
                "Address, company and company name are all required".to_string(),
            ));
        }

        let mut table = self.store.load().await;
        if table.contains_key(address) {
            return Err(AppError::DuplicateKey(format!(
                "Mapping already exists for \"{}\"",
                address
            )));
        }

        table.insert(
            address.to_string(),
            CompanyMapping::new(company, company_name),
        );

        let message = format!("Update address mappings ({} mappings)", table.len());
        let total = table.len();
        let write = self.store.write(table, &message).await;

        info!(address, durable = write.durable, "mapping added");
        Ok(AdminOutcome {
            total,
            durable: write.durable,
            warning: write.warning,
        })
    }

    /// Remove a mapping; `NotFound` when the trimmed address is absent.
    pub async fn remove(&self, address: &str) -> Result<AdminOutcome> {
        let address = address.trim();

        let mut table = self.store.load().await;
        if table.remove(address).is_none() {
            return Err(AppError::NotFound(format!(
                "No mapping found for \"{}\"",
                address
            )));
        }

        let message = format!("Update address mappings ({} mappings)", table.len());
        let total = table.len();
        let write = self.store.write(table, &message).await;

        info!(address, durable = write.durable, "mapping removed");
        Ok(AdminOutcome {
            total,
            durable: write.durable,
            warning: write.warning,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::persistence::github::RemoteStore;
    use crate::infrastructure::persistence::testing::FakeRemote;
    use crate::infrastructure::persistence::ADDRESS_MAPPINGS_REMOTE_PATH;

    fn fixture(remote: Arc<FakeRemote>) -> MappingAdminUseCase {
        MappingAdminUseCase::new(Arc::new(LookupStore::new(
            "address_mappings",
            ADDRESS_MAPPINGS_REMOTE_PATH,
            Some(remote as Arc<dyn RemoteStore>),
            None,
        )))
    }

    #[tokio::test]
    async fn test_add_trims_and_persists() {
        let remote = Arc::new(FakeRemote::with_file(ADDRESS_MAPPINGS_REMOTE_PATH, "{}"));
        let admin = fixture(remote.clone());

        let outcome = admin.add("  123 Main St ", " 987 ", " Acme ").await.unwrap();
        assert!(outcome.durable);
        assert_eq!(outcome.total, 1);

        let stored = remote.content(ADDRESS_MAPPINGS_REMOTE_PATH).unwrap();
        assert!(stored.contains("\"123 Main St\""));
        assert!(stored.contains("\"Acme\""));
    }

    #[tokio::test]
    async fn test_duplicate_address_fails_and_leaves_store_unchanged() {
        let remote = Arc::new(FakeRemote::with_file(
            ADDRESS_MAPPINGS_REMOTE_PATH,
            r#"{"123 Main St":{"Company":"987","Company Name":"Acme"}}"#,
        ));
        let admin = fixture(remote.clone());

        // Same key modulo surrounding whitespace
        let err = admin.add(" 123 Main St ", "1", "Other").await.unwrap_err();
        assert!(matches!(err, AppError::DuplicateKey(_)));

        let table = admin.list().await;
        assert_eq!(table.len(), 1);
        assert_eq!(table["123 Main St"].company_name, "Acme");
        assert_eq!(remote.write_count(ADDRESS_MAPPINGS_REMOTE_PATH), 1);
    }

    #[tokio::test]
    async fn test_blank_fields_are_rejected() {
        let admin = fixture(Arc::new(FakeRemote::with_file(
            ADDRESS_MAPPINGS_REMOTE_PATH,
            "{}",
        )));
        let err = admin.add("   ", "987", "Acme").await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[tokio::test]
    async fn test_remove_missing_address_is_not_found() {
        let admin = fixture(Arc::new(FakeRemote::with_file(
            ADDRESS_MAPPINGS_REMOTE_PATH,
            "{}",
        )));
        let err = admin.remove("123 Main St").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_failed_remote_write_reports_session_only() {
        let remote = Arc::new(FakeRemote::with_file(ADDRESS_MAPPINGS_REMOTE_PATH, "{}"));
        remote.set_fail_writes(true);
        let admin = fixture(remote);

        let outcome = admin.add("123 Main St", "987", "Acme").await.unwrap();
        assert!(!outcome.durable);
        assert!(outcome.warning.is_some());

        // The session still sees the mutation
        assert_eq!(admin.list().await.len(), 1);
    }
}
