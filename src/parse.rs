use crate::types::{CliPayload, UsageStats};

/// Tagged outcome of parsing the CLI's stdout.
#[derive(Debug, Clone)]
pub enum ParsedStdout {
    /// A JSON envelope was found; `answer` is its `response` field (or the
    /// whole raw output when that field is absent).
    Structured {
        answer: String,
        stats: Option<UsageStats>,
    },
    /// No JSON object anywhere; the raw trimmed output is the best-effort
    /// answer.
    PlainText(String),
}

/// Parse the CLI's stdout.
///
/// The CLI may emit advisory or warning lines ahead of its single JSON
/// result line, so a failed direct parse falls back to scanning lines from
/// the last one backward for the first that parses as a JSON object. When
/// no line parses, the whole trimmed output is treated as a plain-text
/// answer with no statistics.
pub fn parse_cli_stdout(stdout: &str) -> ParsedStdout {
    let trimmed = stdout.trim();

    if let Some(parsed) = parse_payload(trimmed, trimmed) {
        return parsed;
    }

    for line in trimmed.lines().rev() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(parsed) = parse_payload(line, trimmed) {
            return parsed;
        }
    }

    ParsedStdout::PlainText(trimmed.to_string())
}

fn parse_payload(candidate: &str, full_output: &str) -> Option<ParsedStdout> {
    let payload: CliPayload = serde_json::from_str(candidate).ok()?;
    let stats = UsageStats::from_payload(&payload);
    let answer = payload
        .response
        .unwrap_or_else(|| full_output.to_string());
    Some(ParsedStdout::Structured { answer, stats })
}
