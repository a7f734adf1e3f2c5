use serde::Deserialize;
use std::collections::BTreeMap;

use crate::error::GeminiError;

/// The JSON envelope the Gemini CLI prints in `-o json` mode.
///
/// Only `response` is load-bearing; everything else is optional and
/// tolerated when absent.
#[derive(Debug, Clone, Deserialize)]
pub struct CliPayload {
    pub response: Option<String>,

    pub session_id: Option<String>,

    #[serde(default)]
    pub stats: CliStats,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CliStats {
    #[serde(default)]
    pub models: BTreeMap<String, ModelUsage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModelUsage {
    #[serde(default)]
    pub tokens: TokenCounts,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenCounts {
    #[serde(default)]
    pub input: u64,

    #[serde(default)]
    pub candidates: u64,
}

/// Token usage attributed to the model that actually produced the answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageStats {
    pub model: String,
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub session_id: Option<String>,
}

impl UsageStats {
    /// Extract usage from a parsed CLI payload.
    ///
    /// The CLI may report several model entries (an internal routing model
    /// plus the answering model). The entry with the most output tokens is
    /// the one that produced the answer; routing models report near-zero
    /// output and are excluded from attribution. An empty map yields `None`.
    pub fn from_payload(payload: &CliPayload) -> Option<Self> {
        let (name, usage) = payload
            .stats
            .models
            .iter()
            .max_by_key(|(_, usage)| usage.tokens.candidates)?;

        Some(UsageStats {
            model: name.clone(),
            input_tokens: usage.tokens.input,
            output_tokens: usage.tokens.candidates,
            session_id: payload.session_id.clone(),
        })
    }
}

/// Result of running the Gemini CLI once. Created fresh per attempt and
/// never mutated afterwards.
#[derive(Debug, Clone)]
pub struct AttemptOutcome {
    pub succeeded: bool,

    /// The answer on success, a human-readable error description otherwise.
    pub text: String,

    pub stats: Option<UsageStats>,
}

impl AttemptOutcome {
    pub fn success(text: impl Into<String>, stats: Option<UsageStats>) -> Self {
        Self {
            succeeded: true,
            text: text.into(),
            stats,
        }
    }

    pub fn failure(error: GeminiError) -> Self {
        Self {
            succeeded: false,
            text: format!("Error: {error}"),
            stats: None,
        }
    }
}
