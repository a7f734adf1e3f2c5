use crate::types::UsageStats;

/// Build the warning block describing which models failed before one
/// succeeded.
pub(crate) fn format_fallback_warning(
    failures: &[(String, String)],
    used_model: Option<&str>,
) -> String {
    let mut lines = vec![format!(
        "[WARNING: Fell back to {}]",
        used_model.unwrap_or("default")
    )];
    for (model, error) in failures {
        // Keep only the error detail, not the full "Error: gemini CLI
        // exited..." prefix.
        let short = error.splitn(3, ": ").last().unwrap_or(error);
        lines.push(format!("  - {model}: {short}"));
    }
    lines.join("\n")
}

/// Format extracted usage into the metadata footer.
pub(crate) fn format_metadata(
    stats: &UsageStats,
    fallback_from: Option<&str>,
    skipped_files: usize,
) -> String {
    let mut model_line = format!("Model: {}", stats.model);
    if let Some(from) = fallback_from {
        model_line.push_str(&format!(" (fallback from {from})"));
    }

    let mut lines = vec![
        "---".to_string(),
        model_line,
        format!(
            "Tokens: {} input / {} output",
            stats.input_tokens, stats.output_tokens
        ),
    ];
    if let Some(ref session_id) = stats.session_id {
        lines.push(format!("Session ID: {session_id}"));
    }
    if skipped_files > 0 {
        lines.push(format!("Skipped: {skipped_files} binary/junk files"));
    }
    lines.join("\n")
}
