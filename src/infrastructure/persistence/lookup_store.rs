// ============================================================
// LOOKUP STORE
// ============================================================
// Generic persisted key→value table with three-tier resolution
// (remote → local file → in-process cache) and best-effort
// write propagation

use crate::infrastructure::persistence::local::LocalStore;
use crate::infrastructure::persistence::github::RemoteStore;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

/// Result of a `write`: the logical mutation always succeeds, but it may
/// not have reached durable storage.
#[derive(Debug, Clone)]
pub struct WriteOutcome {
    /// True when the remote store accepted the update
    pub durable: bool,

    /// Why the write is session-only, when it is
    pub warning: Option<String>,
}

impl WriteOutcome {
    pub fn durable() -> Self {
        Self {
            durable: true,
            warning: None,
        }
    }

    pub fn session_only(warning: impl Into<String>) -> Self {
        Self {
            durable: false,
            warning: Some(warning.into()),
        }
    }
}

/// One persisted lookup table. The in-process cache is authoritative for
/// the rest of the process's life once populated; tier failures during
/// `load` silently fall through, and `write` never fails the caller.
pub struct LookupStore<T> {
    name: &'static str,
    remote_path: &'static str,
    remote: Option<Arc<dyn RemoteStore>>,
    local: Option<LocalStore>,
    cache: Mutex<Option<T>>,
}

impl<T> LookupStore<T>
where
    T: Serialize + DeserializeOwned + Clone + Default + Send,
{
    pub fn new(
        name: &'static str,
        remote_path: &'static str,
        remote: Option<Arc<dyn RemoteStore>>,
        local: Option<LocalStore>,
    ) -> Self {
        Self {
            name,
            remote_path,
            remote,
            local,
            cache: Mutex::new(None),
        }
    }

    /// Resolve the table in priority order: remote store, local file,
    /// in-process cache, empty. No tier failure is fatal.
    pub async fn load(&self) -> T {
        if let Some(remote) = &self.remote {
            match remote.get_file(self.remote_path).await {
                Ok(Some(file)) => match serde_json::from_str::<T>(&file.content) {
                    Ok(table) => {
                        debug!(store = self.name, "loaded table from remote store");
                        self.commit(table.clone());
                        return table;
                    }
                    Err(e) => {
                        warn!(store = self.name, error = %e, "remote table is malformed, falling back")
                    }
                },
                Ok(None) => debug!(store = self.name, "remote table not found, falling back"),
                Err(e) => warn!(store = self.name, error = %e, "remote read failed, falling back"),
            }
        }

        if let Some(local) = &self.local {
            match local.read() {
                Ok(content) => match serde_json::from_str::<T>(&content) {
                    Ok(table) => {
                        debug!(store = self.name, path = %local.path().display(), "loaded table from local file");
                        self.commit(table.clone());
                        return table;
                    }
                    Err(e) => {
                        warn!(store = self.name, error = %e, "local table is malformed, falling back")
                    }
                },
                Err(e) => debug!(store = self.name, error = %e, "no local table, falling back"),
            }
        }

        if let Some(cached) = self.cached() {
            debug!(store = self.name, "using in-process table");
            return cached;
        }

        debug!(store = self.name, "no table found, starting empty");
        T::default()
    }

    /// Commit a new table. The in-process cache is updated first and
    /// unconditionally; local and remote propagation are best-effort.
    /// A stale remote version token is reported, never retried.
    pub async fn write(&self, table: T, message: &str) -> WriteOutcome {
        let content = match serde_json::to_string_pretty(&table) {
            Ok(content) => content,
            Err(e) => {
                self.commit(table);
                return WriteOutcome::session_only(format!("Failed to serialize table: {}", e));
            }
        };
        self.commit(table);

        if let Some(local) = &self.local {
            if let Err(e) = local.write(&content) {
                warn!(store = self.name, error = %e, "local table write failed");
            }
        }

        let Some(remote) = &self.remote else {
            return WriteOutcome::session_only("Remote persistence not configured");
        };

        // Fetch the current version token; absent file means create
        let previous = match remote.get_file(self.remote_path).await {
            Ok(file) => file.map(|f| f.version),
            Err(e) => {
                warn!(store = self.name, error = %e, "could not read current remote version");
                return WriteOutcome::session_only(format!(
                    "Could not read current remote version: {}",
                    e
                ));
            }
        };

        match remote
            .put_file(self.remote_path, &content, previous.as_deref(), message)
            .await
        {
            Ok(version) => {
                debug!(store = self.name, version = %version, "remote table updated");
                WriteOutcome::durable()
            }
            Err(e) => {
                warn!(store = self.name, error = %e, "remote table write rejected");
                WriteOutcome::session_only(format!("Remote save failed: {}", e))
            }
        }
    }

    /// Current in-process snapshot, if one exists
    pub fn cached(&self) -> Option<T> {
        self.cache.lock().unwrap().clone()
    }

    fn commit(&self, table: T) {
        *self.cache.lock().unwrap() = Some(table);
    }
}
