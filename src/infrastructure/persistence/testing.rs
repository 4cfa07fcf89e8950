// In-memory remote store double used across persistence and use-case tests

use crate::domain::error::{AppError, Result};
use crate::infrastructure::persistence::github::{RemoteFile, RemoteStore};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// Honors the conditional-put protocol: a put must carry the current
/// version token (or none for a create) or it is rejected.
#[derive(Default)]
pub(crate) struct FakeRemote {
    files: Mutex<HashMap<String, (String, u64)>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl FakeRemote {
    pub(crate) fn with_file(path: &str, content: &str) -> Self {
        let remote = Self::default();
        remote
            .files
            .lock()
            .unwrap()
            .insert(path.to_string(), (content.to_string(), 1));
        remote
    }

    pub(crate) fn set_file(&self, path: &str, content: &str) {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_string(), (content.to_string(), 1));
    }

    pub(crate) fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn content(&self, path: &str) -> Option<String> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .map(|(content, _)| content.clone())
    }

    pub(crate) fn write_count(&self, path: &str) -> u64 {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .map(|(_, version)| *version)
            .unwrap_or(0)
    }
}

#[async_trait]
impl RemoteStore for FakeRemote {
    async fn get_file(&self, path: &str) -> Result<Option<RemoteFile>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(AppError::StorageError("network down".to_string()));
        }
        Ok(self
            .files
            .lock()
            .unwrap()
            .get(path)
            .map(|(content, version)| RemoteFile {
                content: content.clone(),
                version: version.to_string(),
            }))
    }

    async fn put_file(
        &self,
        path: &str,
        content: &str,
        previous_version: Option<&str>,
        _message: &str,
    ) -> Result<String> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::StorageError("permission denied".to_string()));
        }
        let mut files = self.files.lock().unwrap();
        let current = files.get(path).map(|(_, version)| *version);
        match (current, previous_version) {
            (Some(version), Some(token)) if token == version.to_string() => {
                files.insert(path.to_string(), (content.to_string(), version + 1));
                Ok((version + 1).to_string())
            }
            (None, None) => {
                files.insert(path.to_string(), (content.to_string(), 1));
                Ok("1".to_string())
            }
            _ => Err(AppError::StorageError("version conflict".to_string())),
        }
    }
}
