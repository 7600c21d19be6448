//! Local `TYPE,VALUE` ruleset parsing
//!
//! The curated local rules file drives the keyword filter and contributes
//! suffix/exact entries to the candidate set:
//!
//! ```text
//! DOMAIN-KEYWORD,adserver
//! DOMAIN-SUFFIX,tracking.example
//! DOMAIN,exact.example.com
//! ```
//!
//! Unknown types are skipped with a warning so the file format can grow
//! without breaking older builds.

use log::warn;

use crate::hosts::normalize_domain;

/// Parsed local rules, split by type.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct LocalRules {
    /// `DOMAIN-KEYWORD` tokens for the keyword exclusion filter.
    pub keywords: Vec<String>,
    /// `DOMAIN-SUFFIX` entries, in leading-dot suffix form.
    pub suffixes: Vec<String>,
    /// `DOMAIN` exact entries.
    pub domains: Vec<String>,
}

impl LocalRules {
    /// Total parsed rule count across all types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keywords.len() + self.suffixes.len() + self.domains.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Parse `TYPE,VALUE` ruleset text.
pub fn parse_ruleset(text: &str) -> LocalRules {
    let mut rules = LocalRules::default();

    for raw_line in text.lines() {
        let line = match raw_line.find('#') {
            Some(pos) => &raw_line[..pos],
            None => raw_line,
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let Some((rule_type, value)) = line.split_once(',') else {
            warn!("skipping ruleset line without a type field: {line:?}");
            continue;
        };
        let value = value.trim();
        if value.is_empty() {
            warn!("skipping ruleset line with empty value: {line:?}");
            continue;
        }

        match rule_type.trim() {
            "DOMAIN-KEYWORD" => rules.keywords.push(value.to_ascii_lowercase()),
            "DOMAIN-SUFFIX" => match normalize_domain(value) {
                Some(domain) => {
                    let suffix = if domain.starts_with('.') {
                        domain
                    } else {
                        format!(".{domain}")
                    };
                    rules.suffixes.push(suffix);
                }
                None => warn!("skipping malformed DOMAIN-SUFFIX value: {value:?}"),
            },
            "DOMAIN" => match normalize_domain(value) {
                Some(domain) => rules.domains.push(domain),
                None => warn!("skipping malformed DOMAIN value: {value:?}"),
            },
            other => warn!("skipping unknown ruleset type {other:?}"),
        }
    }

    rules
}
