//! Exact-match lookup over the FAQ corpus.

use super::types::FaqEntry;

/// Holds the FAQ corpus in list order and answers exact (normalized) matches.
///
/// Lookup is a linear scan; the corpus is small and static.
#[derive(Debug, Clone)]
pub struct FaqMatcher {
    entries: Vec<FaqEntry>,
}

impl FaqMatcher {
    pub fn new(entries: Vec<FaqEntry>) -> Self {
        Self { entries }
    }

    /// Entries in list order.
    pub fn entries(&self) -> &[FaqEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Answer of the first entry whose normalized question equals the normalized input.
    pub fn exact_match(&self, text: &str) -> Option<&str> {
        let needle = normalize(text);
        self.entries
            .iter()
            .find(|entry| normalize(&entry.question) == needle)
            .map(|entry| entry.answer.as_str())
    }
}

/// Lower-case and trim surrounding whitespace.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}
