use regex::Regex;
use std::sync::LazyLock;

/// How a failed attempt should be treated by the retry/fallback loop.
///
/// Derived purely from the failure text, never from exit codes alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// Could succeed if retried against the same model after a short delay.
    Transient,
    /// This model cannot serve the request; fall back to the next one.
    Permanent,
    /// Unrecognized error text. Treated like `Permanent`: fall back rather
    /// than retrying blindly.
    Unknown,
}

impl FailureClass {
    pub fn is_transient(self) -> bool {
        matches!(self, FailureClass::Transient)
    }
}

// Patterns indicating a transient error that could succeed on retry with
// the same model. Checked first, so they win when both sets match.
static TRANSIENT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?:^|[\s:])429(?:\s|$)",
        r"(?i)rate.?limit",
        r"(?i)quota",
        r"(?i)resource.?exhausted",
        r"(?i)overloaded",
        r"(?i)too many requests",
        r"(?:^|[\s:])503(?:\s|$)",
        r"(?i)temporarily unavailable",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("transient pattern must compile"))
    .collect()
});

// Patterns indicating the model itself is unavailable or doesn't exist.
static PERMANENT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)model.*not found",
        r"(?i)model.*does not exist",
        r"(?i)model.*unavailable",
        r"(?:^|[\s:])404(?:\s|$)",
        r"(?i)not supported",
        r"(?i)deprecated",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("permanent pattern must compile"))
    .collect()
});

/// Classify a failed attempt's error text.
pub fn classify_failure(text: &str) -> FailureClass {
    if TRANSIENT_PATTERNS.iter().any(|p| p.is_match(text)) {
        return FailureClass::Transient;
    }
    if PERMANENT_PATTERNS.iter().any(|p| p.is_match(text)) {
        return FailureClass::Permanent;
    }
    FailureClass::Unknown
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        for text in [
            "Error: gemini CLI exited with code 1: 429 Too Many Requests",
            "rate limit exceeded",
            "rate-limited, slow down",
            "Quota exceeded for quota metric",
            "RESOURCE_EXHAUSTED: try again later",
            "the model is overloaded",
            "HTTP 503 Service Unavailable",
            "service temporarily unavailable",
        ] {
            assert_eq!(classify_failure(text), FailureClass::Transient, "{text}");
        }
    }

    #[test]
    fn test_permanent_classification() {
        for text in [
            "Error: model gemini-1.0-ultra not found",
            "the model does not exist",
            "requested model is unavailable in this region",
            "got 404 from backend",
            "this operation is not supported",
            "gemini-1.0-pro has been deprecated",
        ] {
            assert_eq!(classify_failure(text), FailureClass::Permanent, "{text}");
        }
    }

    #[test]
    fn test_unrecognized_text_is_unknown() {
        let class = classify_failure("something inexplicable happened");
        assert_eq!(class, FailureClass::Unknown);
        assert!(!class.is_transient());
    }

    #[test]
    fn test_transient_wins_when_both_sets_match() {
        // Precedence rule: transient indicators are checked first.
        let class = classify_failure("model deprecated and also rate limit hit");
        assert_eq!(class, FailureClass::Transient);
    }

    #[test]
    fn test_status_codes_require_word_boundaries() {
        // "14290" or "x404y" must not trigger the numeric patterns.
        assert_eq!(classify_failure("request id 14290"), FailureClass::Unknown);
        assert_eq!(classify_failure("hash x404y"), FailureClass::Unknown);
        assert_eq!(classify_failure("status: 429 returned"), FailureClass::Transient);
        assert_eq!(classify_failure("status: 404 returned"), FailureClass::Permanent);
    }
}
