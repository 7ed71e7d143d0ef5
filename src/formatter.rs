//! Output formatters for suggestion lists.
//!
//! Trait-based rendering split between a formatting trait and several
//! small implementors, one per output shape.

use crate::types::Suggestion;

/// Renders a suggestion list to a displayable string.
pub trait Formatter {
    /// Format one suggestion line.
    fn format_suggestion(&self, index: usize, suggestion: &Suggestion) -> String;

    /// Format the complete list.
    ///
    /// Default implementation joins [`Self::format_suggestion`] output
    /// with newlines.
    fn format_list(&self, word: &str, suggestions: &[Suggestion]) -> String {
        let mut parts = vec![self.format_header(word)];
        for (i, s) in suggestions.iter().enumerate() {
            parts.push(self.format_suggestion(i, s));
        }
        parts.join("\n")
    }

    /// Format the header line naming the typed word.
    fn format_header(&self, word: &str) -> String;
}

/// Human-readable output.
#[derive(Debug, Clone, Default)]
pub struct HumanFormatter {
    /// Include normalized score and exact-match marker.
    pub verbose: bool,
}

impl Formatter for HumanFormatter {
    fn format_header(&self, word: &str) -> String {
        format!("Suggestions for \"{word}\":")
    }

    fn format_suggestion(&self, index: usize, s: &Suggestion) -> String {
        if self.verbose {
            format!(
                "  {}. {} (freq={}, score={:.3}, kind={:?}{})",
                index + 1,
                s.word,
                s.frequency,
                s.normalized_score,
                s.kind,
                if s.exact_match { ", exact" } else { "" }
            )
        } else {
            format!("  {}. {}", index + 1, s.word)
        }
    }
}

/// Machine-readable JSON output.
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format_header(&self, _word: &str) -> String {
        String::new()
    }

    fn format_suggestion(&self, _index: usize, s: &Suggestion) -> String {
        serde_json::to_string(s).unwrap_or_default()
    }

    fn format_list(&self, word: &str, suggestions: &[Suggestion]) -> String {
        #[derive(serde::Serialize)]
        struct Payload<'a> {
            word: &'a str,
            suggestions: &'a [Suggestion],
        }
        serde_json::to_string_pretty(&Payload { word, suggestions }).unwrap_or_default()
    }
}

/// Compact one-line-per-word output, no framing.
#[derive(Debug, Clone, Default)]
pub struct ShortFormatter;

impl Formatter for ShortFormatter {
    fn format_header(&self, _word: &str) -> String {
        String::new()
    }

    fn format_suggestion(&self, _index: usize, s: &Suggestion) -> String {
        s.word.clone()
    }

    fn format_list(&self, _word: &str, suggestions: &[Suggestion]) -> String {
        suggestions
            .iter()
            .map(|s| s.word.clone())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
