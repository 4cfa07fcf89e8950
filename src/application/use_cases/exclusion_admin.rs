// ============================================================
// EXCLUSION ADMIN USE CASE
// ============================================================
// Manage the persisted list of excluded usernames

use crate::application::use_cases::mapping_admin::AdminOutcome;
use crate::domain::error::{AppError, Result};
use crate::domain::mapping::ExclusionList;
use crate::infrastructure::persistence::lookup_store::LookupStore;
use std::sync::Arc;
use tracing::info;

pub struct ExclusionAdminUseCase {
    store: Arc<LookupStore<ExclusionList>>,
}

impl ExclusionAdminUseCase {
    pub fn new(store: Arc<LookupStore<ExclusionList>>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> ExclusionList {
        self.store.load().await
    }

    /// Add a username. Names are normalized to trimmed lowercase before
    /// storage, so membership checks against the list stay
    /// case-insensitive. The list is kept sorted and duplicate-free.
    pub async fn add(&self, username: &str) -> Result<AdminOutcome> {
        let username = normalize(username)?;

        let mut list = self.store.load().await;
        if list.contains(&username) {
            return Err(AppError::DuplicateKey(format!(
                "\"{}\" is already excluded",
                username
            )));
        }

        list.push(username.clone());
        list.sort();

        let message = format!("Update excluded usernames list ({} usernames)", list.len());
        let total = list.len();
        let write = self.store.write(list, &message).await;

        info!(username = %username, durable = write.durable, "username excluded");
        Ok(AdminOutcome {
            total,
            durable: write.durable,
            warning: write.warning,
        })
    }

    /// Remove a username; `NotFound` when the normalized name is absent.
    pub async fn remove(&self, username: &str) -> Result<AdminOutcome> {
        let username = normalize(username)?;

        let mut list = self.store.load().await;
        let before = list.len();
        list.retain(|name| name != &username);
        if list.len() == before {
            return Err(AppError::NotFound(format!(
                "\"{}\" is not on the exclusion list",
                username
            )));
        }

        let message = format!("Update excluded usernames list ({} usernames)", list.len());
        let total = list.len();
        let write = self.store.write(list, &message).await;

        info!(username = %username, durable = write.durable, "username re-included");
        Ok(AdminOutcome {
            total,
            durable: write.durable,
            warning: write.warning,
        })
    }
}

fn normalize(username: &str) -> Result<String> {
    let username = username.trim().to_lowercase();
    if username.is_empty() {
        return Err(AppError::ValidationError(
            "Username is required".to_string(),
        ));
    }
    Ok(username)
}
