//! Keyword exclusion filter
//!
//! Screens candidate domains against a fixed set of forbidden substrings
//! before they ever reach the trie. Built on an Aho-Corasick automaton so a
//! query costs O(len(candidate)) regardless of how many keywords are loaded;
//! with large curated keyword sets this runs once per candidate over
//! hundreds of thousands of domains.

use aho_corasick::AhoCorasick;

/// Error raised when a [`KeywordFilter`] is constructed from a degenerate
/// pattern set. An empty pattern would match every candidate, so it must be
/// rejected up front rather than silently producing a filter-everything set.
#[derive(Debug, thiserror::Error)]
pub enum KeywordError {
    #[error("keyword set is empty")]
    EmptySet,
    #[error("keyword set contains an empty pattern")]
    EmptyPattern,
    #[error("failed to build keyword automaton: {0}")]
    Build(String),
}

/// Multi-pattern substring matcher over normalized (lowercased, trimmed)
/// domain strings. Matching is case-sensitive; normalization is the
/// caller's contract.
#[derive(Debug)]
pub struct KeywordFilter {
    automaton: AhoCorasick,
    pattern_count: usize,
}

impl KeywordFilter {
    /// Build a filter from a fixed keyword set.
    pub fn new<I, P>(keywords: I) -> Result<Self, KeywordError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<str>,
    {
        let patterns: Vec<String> = keywords
            .into_iter()
            .map(|p| p.as_ref().to_string())
            .collect();

        if patterns.is_empty() {
            return Err(KeywordError::EmptySet);
        }
        if patterns.iter().any(|p| p.is_empty()) {
            return Err(KeywordError::EmptyPattern);
        }

        let automaton = AhoCorasick::new(&patterns)
            .map_err(|e| KeywordError::Build(e.to_string()))?;

        Ok(Self {
            automaton,
            pattern_count: patterns.len(),
        })
    }

    /// True iff `candidate` contains any keyword as a contiguous substring.
    #[inline]
    pub fn matches(&self, candidate: &str) -> bool {
        self.automaton.is_match(candidate)
    }

    /// Number of keywords the filter was built from.
    #[must_use]
    pub fn pattern_count(&self) -> usize {
        self.pattern_count
    }
}
