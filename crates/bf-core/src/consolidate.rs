//! Batch consolidation pipeline
//!
//! The single entry point collaborators call once all sources have been
//! fetched, parsed, and merged: keyword screen, trie fill, whitelist marks,
//! covering-set extraction, map building, stable sort, stats. Synchronous,
//! single-threaded, and owning all of its working structures for the
//! duration of one run.

use std::collections::HashSet;

use log::info;

use crate::keyword::{KeywordError, KeywordFilter};
use crate::psl::RootResolver;
use crate::sort::{build_domain_maps, sort_domains};
use crate::stats::{aggregate, RootCount};
use crate::trie::DomainTrie;

/// Immutable snapshot of everything the merge step produced.
#[derive(Debug, Default)]
pub struct ConsolidateInput {
    /// Candidate blocklist entries (normalized, exact-string deduplicated).
    pub candidates: HashSet<String>,
    /// Domains that must never appear in output, nor any of their
    /// subdomains.
    pub whitelist: HashSet<String>,
    /// Keyword exclusion tokens. Empty means no keyword screening.
    pub keywords: Vec<String>,
}

/// Final ordered ruleset plus derived statistics and recovery counters.
#[derive(Debug)]
pub struct ConsolidateOutput {
    /// Minimal covering set in presentation order.
    pub domains: Vec<String>,
    /// Per-root counts above the noise threshold.
    pub stats: Vec<RootCount>,
    /// Candidates removed by the keyword screen.
    pub keyword_excluded: usize,
    /// Candidates skipped as malformed (empty labels and the like).
    pub malformed: usize,
    /// Survivors with no resolvable registrable root (kept in `domains`,
    /// absent from `stats`).
    pub unresolved_roots: usize,
}

/// Fatal pipeline errors. Per-entry conditions are recovered locally and
/// surface only as counters on the output.
#[derive(Debug, thiserror::Error)]
pub enum ConsolidateError {
    #[error("invalid keyword set: {0}")]
    InvalidKeywords(#[from] KeywordError),
}

/// Run one full consolidation batch.
///
/// Keyword exclusion is applied to candidate insertion only, before the
/// trie ever sees an entry; whitelist marks are applied unconditionally.
/// A whitelisted domain containing a keyword is therefore filtered before
/// whitelist logic would otherwise matter.
pub fn consolidate(
    input: &ConsolidateInput,
    resolver: &RootResolver,
) -> Result<ConsolidateOutput, ConsolidateError> {
    let filter = if input.keywords.is_empty() {
        None
    } else {
        Some(KeywordFilter::new(&input.keywords)?)
    };

    let mut trie = DomainTrie::new();
    let mut keyword_excluded = 0usize;
    let mut malformed = 0usize;

    for candidate in &input.candidates {
        if filter.as_ref().is_some_and(|f| f.matches(candidate)) {
            keyword_excluded += 1;
            continue;
        }
        if !trie.add(candidate) {
            malformed += 1;
        }
    }

    for entry in &input.whitelist {
        if !trie.whitelist(entry) {
            malformed += 1;
        }
    }

    let mut domains = trie.covering_set();
    let maps = build_domain_maps(&domains, resolver);
    let unresolved_roots = maps.unresolved(&domains);
    sort_domains(&mut domains, &maps);
    let stats = aggregate(&domains, &maps);

    info!(
        "consolidated {} candidates into {} rules ({} keyword-excluded, {} malformed)",
        input.candidates.len(),
        domains.len(),
        keyword_excluded,
        malformed
    );

    Ok(ConsolidateOutput {
        domains,
        stats,
        keyword_excluded,
        malformed,
        unresolved_roots,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(candidates: &[&str], whitelist: &[&str], keywords: &[&str]) -> ConsolidateInput {
        ConsolidateInput {
            candidates: candidates.iter().map(|s| s.to_string()).collect(),
            whitelist: whitelist.iter().map(|s| s.to_string()).collect(),
            keywords: keywords.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_empty_batch() {
        let resolver = RootResolver::bundled();
        let out = consolidate(&input(&[], &[], &[]), &resolver).unwrap();
        assert!(out.domains.is_empty());
        assert!(out.stats.is_empty());
    }

    #[test]
    fn test_empty_keyword_set_means_no_screening() {
        // An empty keyword list disables the filter; it must not be treated
        // as a degenerate pattern set.
        let resolver = RootResolver::bundled();
        let out = consolidate(&input(&["example.com"], &[], &[]), &resolver).unwrap();
        assert_eq!(out.domains, vec!["example.com"]);
        assert_eq!(out.keyword_excluded, 0);
    }

    #[test]
    fn test_degenerate_keyword_is_fatal() {
        let resolver = RootResolver::bundled();
        let result = consolidate(&input(&["example.com"], &[], &[""]), &resolver);
        assert!(matches!(result, Err(ConsolidateError::InvalidKeywords(_))));
    }

    #[test]
    fn test_keyword_screen_precedes_insertion() {
        let resolver = RootResolver::bundled();
        let out = consolidate(
            &input(&["pornhub.com", "example.com"], &[], &["porn"]),
            &resolver,
        )
        .unwrap();
        assert_eq!(out.domains, vec!["example.com"]);
        assert_eq!(out.keyword_excluded, 1);
    }

    #[test]
    fn test_malformed_candidates_counted_not_fatal() {
        let resolver = RootResolver::bundled();
        let out = consolidate(&input(&["example.com", "a..b.com", ""], &[], &[]), &resolver)
            .unwrap();
        assert_eq!(out.domains, vec!["example.com"]);
        assert_eq!(out.malformed, 2);
    }

    #[test]
    fn test_unresolved_root_kept_in_output() {
        let resolver = RootResolver::bundled();
        let out = consolidate(&input(&["localhost", "example.com"], &[], &[]), &resolver)
            .unwrap();
        assert_eq!(out.domains.len(), 2);
        assert!(out.domains.contains(&"localhost".to_string()));
        assert_eq!(out.unresolved_roots, 1);
        assert!(out.stats.is_empty());
    }
}
