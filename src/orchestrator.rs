use crate::classify::classify_failure;
use crate::config::QueryConfig;
use crate::invoke::invoke_once;
use crate::report::{format_fallback_warning, format_metadata};
use crate::types::AttemptOutcome;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};

/// Retry/fallback knobs, injected so tests can run with zero delay instead
/// of relying on process-global constants.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Retries per candidate on transient failures (total attempts per
    /// candidate = retries + 1).
    pub max_retries: u32,

    /// Fixed delay between attempts on the same candidate.
    pub retry_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            retry_delay: Duration::from_secs(3),
        }
    }
}

impl RetryPolicy {
    /// Default retry counts with no inter-attempt delay.
    pub fn no_delay() -> Self {
        Self {
            retry_delay: Duration::ZERO,
            ..Self::default()
        }
    }
}

/// Drive the candidate list to one final answer string.
///
/// Candidates are tried strictly in order. Transient failures are retried
/// on the same model before falling back; permanent and unrecognized
/// failures fall back immediately. When every candidate is exhausted, the
/// last failure text is returned verbatim.
pub(crate) async fn orchestrate(
    gemini_path: &Path,
    policy: &RetryPolicy,
    config: &QueryConfig,
) -> String {
    let candidates = config.candidates();
    let mut failures: Vec<(String, String)> = Vec::new();

    for (candidate_index, model) in candidates.iter().enumerate() {
        // The session ID is scoped to the backend that issued it: it rides
        // only on the very first attempt of the very first candidate and is
        // never replayed elsewhere.
        let session_id = if candidate_index == 0 {
            config.session_id.as_deref()
        } else {
            None
        };

        let outcome = try_candidate(gemini_path, policy, config, model.as_deref(), session_id).await;
        if outcome.succeeded {
            return compose_success(&outcome, model.as_deref(), &failures, config.skipped_files);
        }

        warn!(
            model = model.as_deref().unwrap_or("default"),
            "Candidate failed: {}", outcome.text
        );
        failures.push((
            model.clone().unwrap_or_else(|| "default".to_string()),
            outcome.text,
        ));
    }

    match failures.last() {
        Some((_, text)) => text.clone(),
        None => "Error: no models to try".to_string(),
    }
}

/// Try one candidate, retrying transient failures up to the policy's limit.
async fn try_candidate(
    gemini_path: &Path,
    policy: &RetryPolicy,
    config: &QueryConfig,
    model: Option<&str>,
    session_id: Option<&str>,
) -> AttemptOutcome {
    let mut attempt = 0;
    loop {
        let token = if attempt == 0 { session_id } else { None };
        let outcome = invoke_once(
            gemini_path,
            &config.prompt,
            &config.context,
            model,
            config.timeout,
            token,
        )
        .await;

        if outcome.succeeded {
            return outcome;
        }

        let class = classify_failure(&outcome.text);
        if !class.is_transient() || attempt >= policy.max_retries {
            debug!("Giving up on candidate ({class:?}): {}", outcome.text);
            return outcome;
        }

        warn!(
            "Transient failure (attempt {} of {}), retrying in {:?}: {}",
            attempt + 1,
            policy.max_retries + 1,
            policy.retry_delay,
            outcome.text
        );
        tokio::time::sleep(policy.retry_delay).await;
        attempt += 1;
    }
}

fn compose_success(
    outcome: &AttemptOutcome,
    used_model: Option<&str>,
    failures: &[(String, String)],
    skipped_files: usize,
) -> String {
    let mut parts = Vec::new();
    if !failures.is_empty() {
        parts.push(format_fallback_warning(failures, used_model));
    }
    parts.push(outcome.text.clone());
    if let Some(ref stats) = outcome.stats {
        let fallback_from = failures.first().map(|(model, _)| model.as_str());
        parts.push(format_metadata(stats, fallback_from, skipped_files));
    }
    parts.join("\n\n")
}
