// ============================================================
// PERSISTENCE CONFIG
// ============================================================
// Environment-driven configuration, built once at startup and
// injected into the stores (never read ambiently at call time)

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Credentials and target for the durable remote store
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    pub token: String,
    pub owner: String,
    pub repo: String,
    pub branch: String,
    pub timeout: Duration,
}

/// Where each persistence tier lives for this process
#[derive(Debug, Clone, Default)]
pub struct PersistenceConfig {
    /// Remote version-controlled store; None disables the tier
    pub remote: Option<RemoteConfig>,

    /// Directory for local JSON fallback files; None disables the tier
    /// (serverless deployments have no writable working directory)
    pub data_dir: Option<PathBuf>,
}

impl PersistenceConfig {
    /// Build from environment variables. Remote sync requires
    /// ENABLE_GITHUB_PERSISTENCE=true plus token, owner and repo.
    pub fn from_env() -> Self {
        let remote_enabled = env::var("ENABLE_GITHUB_PERSISTENCE")
            .map(|v| v == "true")
            .unwrap_or(false);

        let remote = if remote_enabled {
            match (
                env::var("GITHUB_TOKEN"),
                env::var("GITHUB_OWNER"),
                env::var("GITHUB_REPO"),
            ) {
                (Ok(token), Ok(owner), Ok(repo)) => Some(RemoteConfig {
                    token,
                    owner,
                    repo,
                    branch: env::var("GITHUB_BRANCH").unwrap_or_else(|_| "main".to_string()),
                    timeout: Duration::from_secs(10),
                }),
                _ => {
                    tracing::warn!("GitHub persistence enabled but not fully configured");
                    None
                }
            }
        } else {
            None
        };

        let data_dir = if Self::is_serverless() {
            None
        } else {
            Some(PathBuf::from(
                env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string()),
            ))
        };

        Self { remote, data_dir }
    }

    /// In-process cache only; useful for tests
    pub fn disabled() -> Self {
        Self::default()
    }

    fn is_serverless() -> bool {
        env::var("VERCEL").is_ok()
            || env::var("AWS_LAMBDA_FUNCTION_NAME").is_ok()
            || env::var("NETLIFY").is_ok()
    }
}
