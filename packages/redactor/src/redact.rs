//! Literal substitution of detected strings.

use std::collections::HashMap;

/// Replace every occurrence of each detected string, in order.
///
/// Each replacement runs against the text produced by the previous one, so a
/// later entry can match a token inserted by an earlier one, and when two
/// entries overlap the one listed first takes the text. Matching is literal and
/// case-sensitive. An empty entry matches at every character boundary, so its
/// token is inserted between every character of the text.
pub fn apply_redactions<S, F>(text: &str, detected: &[S], replace: F) -> String
where
    S: AsRef<str>,
    F: Fn(&str) -> String,
{
    let mut redacted = text.to_string();

    for d in detected.iter().map(AsRef::as_ref) {
        redacted = redacted.replace(d, &replace(d));
    }

    redacted
}

/// Per-string replacements with a fallback token.
///
/// ```rust,ignore
/// let table = ReplacementTable::new("<<<REDACTED>>>")
///     .with("John Doe", "<<<NAME>>>")
///     .with("+1 123 456 7890", "<<<PHONE>>>");
///
/// let redacted = redactor.redact_func(text, |d| table.replacement(d)).await?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReplacementTable {
    entries: HashMap<String, String>,
    default: String,
}

impl ReplacementTable {
    pub fn new(default: impl Into<String>) -> Self {
        Self {
            entries: HashMap::new(),
            default: default.into(),
        }
    }

    pub fn with(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.entries.insert(from.into(), to.into());
        self
    }

    /// Replacement for `detected`, or the default token.
    pub fn replacement(&self, detected: &str) -> String {
        self.entries
            .get(detected)
            .unwrap_or(&self.default)
            .clone()
    }
}
