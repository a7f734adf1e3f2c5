use crate::config::QueryConfig;
use crate::error::{GeminiError, Result};
use crate::orchestrator::{RetryPolicy, orchestrate};
use crate::process::find_gemini_in_path;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Entry point for orchestrated Gemini CLI queries.
#[derive(Debug, Clone)]
pub struct Client {
    gemini_path: PathBuf,
    policy: RetryPolicy,
}

impl Client {
    /// Create a new client by finding gemini in PATH
    pub async fn new() -> Result<Self> {
        let gemini_path = find_gemini_in_path().await?;
        Ok(Self {
            gemini_path,
            policy: RetryPolicy::default(),
        })
    }

    /// Create a new client with a specific gemini path
    pub async fn with_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !fs::try_exists(path).await.unwrap_or(false) {
            return Err(GeminiError::GeminiNotFoundAtPath {
                path: path.to_path_buf(),
            });
        }
        Ok(Self {
            gemini_path: path.to_path_buf(),
            policy: RetryPolicy::default(),
        })
    }

    /// Replace the retry policy (e.g. zero delay in tests)
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn gemini_path(&self) -> &Path {
        &self.gemini_path
    }

    /// Run one orchestrated query.
    ///
    /// Never fails: every failure mode, including invalid configuration,
    /// is encoded into the returned text.
    pub async fn run_query(&self, config: &QueryConfig) -> String {
        if let Err(e) = config.validate() {
            return format!("Error: {e}");
        }
        debug!(
            model = config.model.as_deref().unwrap_or("default"),
            "Running query via {}",
            self.gemini_path.display()
        );
        orchestrate(&self.gemini_path, &self.policy, config).await
    }
}

/// Resolve the gemini executable and run one orchestrated query.
///
/// A missing executable is reported in the returned string with zero
/// attempts made; like [`Client::run_query`], this never fails.
pub async fn run_query(config: &QueryConfig) -> String {
    match find_gemini_in_path().await {
        Ok(gemini_path) => {
            let client = Client {
                gemini_path,
                policy: RetryPolicy::default(),
            };
            client.run_query(config).await
        }
        Err(e) => format!("Error: {e}"),
    }
}
