use crate::domain::error::{AppError, Result};
use crate::infrastructure::config::RemoteConfig;
use async_trait::async_trait;
use base64::Engine as _;
use serde_json::json;

const GITHUB_API_BASE: &str = "https://api.github.com";
const USER_AGENT: &str = "address-mapper";

/// A file fetched from the remote store, with its version token
#[derive(Debug, Clone)]
pub struct RemoteFile {
    pub content: String,
    pub version: String,
}

/// Durable remote store contract: get a file by path, put a file with an
/// optional expected previous version token.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Fetch a file. Ok(None) means the file does not exist yet.
    async fn get_file(&self, path: &str) -> Result<Option<RemoteFile>>;

    /// Create or update a file. `previous_version` must be the token from
    /// the last `get_file` for an update, or None for a create; a stale
    /// token makes the put fail rather than overwrite. Returns the new
    /// version token.
    async fn put_file(
        &self,
        path: &str,
        content: &str,
        previous_version: Option<&str>,
        message: &str,
    ) -> Result<String>;
}

/// GitHub contents-API implementation. The file's blob SHA is the
/// version token; content travels base64-encoded.
pub struct GitHubStore {
    client: reqwest::Client,
    config: RemoteConfig,
}

impl GitHubStore {
    pub fn new(config: RemoteConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::StorageError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    fn contents_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            GITHUB_API_BASE, self.config.owner, self.config.repo, path
        )
    }
}

#[async_trait]
impl RemoteStore for GitHubStore {
    async fn get_file(&self, path: &str) -> Result<Option<RemoteFile>> {
        let response = self
            .client
            .get(self.contents_url(path))
            .bearer_auth(&self.config.token)
            .header("Accept", "application/vnd.github.v3+json")
            .header("User-Agent", USER_AGENT)
            .query(&[("ref", self.config.branch.as_str())])
            .send()
            .await
            .map_err(|e| AppError::StorageError(format!("Request failed: {}", e)))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::StorageError(format!(
                "API error ({}): {}",
                status, text
            )));
        }

        let file: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AppError::StorageError(format!("Failed to parse JSON: {}", e)))?;

        let version = file["sha"]
            .as_str()
            .ok_or_else(|| AppError::StorageError("Invalid response format: missing sha".to_string()))?
            .to_string();

        // The API wraps base64 bodies at 60 columns
        let encoded: String = file["content"]
            .as_str()
            .unwrap_or_default()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();

        let bytes = base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .map_err(|e| AppError::StorageError(format!("Failed to decode content: {}", e)))?;

        Ok(Some(RemoteFile {
            content: String::from_utf8_lossy(&bytes).to_string(),
            version,
        }))
    }

    async fn put_file(
        &self,
        path: &str,
        content: &str,
        previous_version: Option<&str>,
        message: &str,
    ) -> Result<String> {
        let encoded = base64::engine::general_purpose::STANDARD.encode(content);

        let mut body = json!({
            "message": message,
            "content": encoded,
            "branch": self.config.branch,
        });
        if let Some(sha) = previous_version {
            body["sha"] = json!(sha);
        }

        let response = self
            .client
            .put(self.contents_url(path))
            .bearer_auth(&self.config.token)
            .header("Accept", "application/vnd.github.v3+json")
            .header("User-Agent", USER_AGENT)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::StorageError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::StorageError(format!(
                "API error ({}): {}",
                status, text
            )));
        }

        let result: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AppError::StorageError(format!("Failed to parse JSON: {}", e)))?;

        result["content"]["sha"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| AppError::StorageError("Invalid response format: missing sha".to_string()))
    }
}
