pub mod github;
pub mod local;
pub mod lookup_store;

#[cfg(test)]
pub(crate) mod testing;

use crate::domain::error::Result;
use crate::domain::mapping::{AddressTable, CustomerCompanyTable, ExclusionList};
use crate::infrastructure::config::PersistenceConfig;
use github::{GitHubStore, RemoteStore};
use local::LocalStore;
use lookup_store::LookupStore;
use std::sync::Arc;

/// Fixed paths inside the remote repository
pub const ADDRESS_MAPPINGS_REMOTE_PATH: &str = "web-app/data/address_mappings.json";
pub const CUSTOMER_COMPANY_REMOTE_PATH: &str = "web-app/data/customer_company.json";
pub const EXCLUDED_NAMES_REMOTE_PATH: &str = "web-app/names.json";

/// The three process-scoped lookup stores, created once at startup and
/// injected into the pipeline and admin use cases.
pub struct StoreSet {
    pub addresses: Arc<LookupStore<AddressTable>>,
    pub customer_companies: Arc<LookupStore<CustomerCompanyTable>>,
    pub exclusions: Arc<LookupStore<ExclusionList>>,
}

impl StoreSet {
    pub fn from_config(config: &PersistenceConfig) -> Result<Self> {
        let remote: Option<Arc<dyn RemoteStore>> = match &config.remote {
            Some(remote_config) => Some(Arc::new(GitHubStore::new(remote_config.clone())?)),
            None => None,
        };

        let local = |file: &str| {
            config
                .data_dir
                .as_ref()
                .map(|dir| LocalStore::new(dir.join(file)))
        };

        Ok(Self {
            addresses: Arc::new(LookupStore::new(
                "address_mappings",
                ADDRESS_MAPPINGS_REMOTE_PATH,
                remote.clone(),
                local("address_mappings.json"),
            )),
            customer_companies: Arc::new(LookupStore::new(
                "customer_company",
                CUSTOMER_COMPANY_REMOTE_PATH,
                remote.clone(),
                local("customer_company.json"),
            )),
            exclusions: Arc::new(LookupStore::new(
                "excluded_names",
                EXCLUDED_NAMES_REMOTE_PATH,
                remote,
                local("names.json"),
            )),
        })
    }
}
