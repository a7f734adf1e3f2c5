use crate::error::{GeminiError, Result};
use std::time::Duration;

/// Default per-attempt timeout for the Gemini CLI.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Configuration for one orchestrated Gemini query.
#[derive(Debug, Clone)]
pub struct QueryConfig {
    /// The instruction/question for Gemini.
    pub prompt: String,

    /// Rendered file context, piped to the CLI via stdin when non-empty.
    /// Context never travels as a command-line argument (length/escaping
    /// limits).
    pub context: String,

    /// Single pinned model, used with no fallback. Wins over `models` when
    /// both are set.
    pub model: Option<String>,

    /// Ordered fallback list of models to try. First success wins.
    pub models: Option<Vec<String>>,

    /// Per-attempt timeout.
    pub timeout: Duration,

    /// Session ID resuming a previous conversation. A session ID is scoped
    /// to the backend that issued it and is never replayed to another one.
    pub session_id: Option<String>,

    /// Number of files the context assembler skipped, reported in the
    /// metadata footer.
    pub skipped_files: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            prompt: String::new(),
            context: String::new(),
            model: None,
            models: None,
            timeout: DEFAULT_TIMEOUT,
            session_id: None,
            skipped_files: 0,
        }
    }
}

impl QueryConfig {
    pub fn builder(prompt: impl Into<String>) -> QueryConfigBuilder {
        QueryConfigBuilder::new(prompt)
    }

    pub fn validate(&self) -> Result<()> {
        if self.prompt.is_empty() {
            return Err(GeminiError::InvalidConfiguration {
                message: "Prompt cannot be empty".to_string(),
            });
        }
        if self.timeout.is_zero() {
            return Err(GeminiError::InvalidConfiguration {
                message: "Timeout must be non-zero".to_string(),
            });
        }
        Ok(())
    }

    /// Candidate models in the order they will be tried. A pinned model
    /// wins over the fallback list; neither set means a single implicit
    /// "let the CLI choose" entry.
    pub(crate) fn candidates(&self) -> Vec<Option<String>> {
        if let Some(ref model) = self.model {
            vec![Some(model.clone())]
        } else if let Some(ref models) = self.models {
            models.iter().cloned().map(Some).collect()
        } else {
            vec![None]
        }
    }
}

/// Builder for QueryConfig with fluent API
pub struct QueryConfigBuilder {
    config: QueryConfig,
}

impl QueryConfigBuilder {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            config: QueryConfig {
                prompt: prompt.into(),
                ..Default::default()
            },
        }
    }

    /// Set the rendered file context to pipe via stdin
    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.config.context = context.into();
        self
    }

    /// Pin a single model (used with no fallback)
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = Some(model.into());
        self
    }

    /// Set the ordered fallback list of models to try
    pub fn models(mut self, models: Vec<String>) -> Self {
        self.config.models = Some(models);
        self
    }

    /// Set the per-attempt timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Resume a previous conversation (maps to -r)
    pub fn session_id(mut self, id: impl Into<String>) -> Self {
        self.config.session_id = Some(id.into());
        self
    }

    /// Report this many context-assembler skips in the metadata footer
    pub fn skipped_files(mut self, count: usize) -> Self {
        self.config.skipped_files = count;
        self
    }

    /// Build the QueryConfig, validating all settings
    pub fn build(self) -> Result<QueryConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_empty_prompt() {
        let config = QueryConfig::builder("").build();
        assert!(config.is_err());
        assert!(
            config
                .unwrap_err()
                .to_string()
                .contains("Prompt cannot be empty")
        );
    }

    #[test]
    fn test_validation_zero_timeout() {
        let config = QueryConfig::builder("test")
            .timeout(Duration::ZERO)
            .build();
        assert!(config.is_err());
        assert!(
            config
                .unwrap_err()
                .to_string()
                .contains("Timeout must be non-zero")
        );
    }

    #[test]
    fn test_builder_defaults() {
        let config = QueryConfig::builder("test query").build().unwrap();
        assert_eq!(config.prompt, "test query");
        assert_eq!(config.context, "");
        assert!(config.model.is_none());
        assert!(config.models.is_none());
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert!(config.session_id.is_none());
        assert_eq!(config.skipped_files, 0);
    }

    #[test]
    fn test_builder_sets_fields() {
        let config = QueryConfig::builder("q")
            .context("<file path=\"a.rs\">fn main() {}</file>")
            .model("gemini-2.5-pro")
            .timeout(Duration::from_secs(30))
            .session_id("sess-1")
            .skipped_files(3)
            .build()
            .unwrap();

        assert_eq!(config.model.as_deref(), Some("gemini-2.5-pro"));
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.session_id.as_deref(), Some("sess-1"));
        assert_eq!(config.skipped_files, 3);
    }

    #[test]
    fn test_candidates_pinned_model_wins() {
        let config = QueryConfig {
            prompt: "q".to_string(),
            model: Some("pinned".to_string()),
            models: Some(vec!["a".to_string(), "b".to_string()]),
            ..Default::default()
        };
        assert_eq!(config.candidates(), vec![Some("pinned".to_string())]);
    }

    #[test]
    fn test_candidates_fallback_list_in_order() {
        let config = QueryConfig {
            prompt: "q".to_string(),
            models: Some(vec!["a".to_string(), "b".to_string()]),
            ..Default::default()
        };
        assert_eq!(
            config.candidates(),
            vec![Some("a".to_string()), Some("b".to_string())]
        );
    }

    #[test]
    fn test_candidates_default_is_single_unpinned_entry() {
        let config = QueryConfig {
            prompt: "q".to_string(),
            ..Default::default()
        };
        assert_eq!(config.candidates(), vec![None]);
    }

    #[test]
    fn test_candidates_empty_list_stays_empty() {
        let config = QueryConfig {
            prompt: "q".to_string(),
            models: Some(vec![]),
            ..Default::default()
        };
        assert!(config.candidates().is_empty());
    }
}
