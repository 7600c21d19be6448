//! Plain domain-per-line lists
//!
//! The simplest feed format: one domain per line, `#` or `!` comments,
//! optional leading-dot suffix-form entries. Phishing feeds use the same
//! shape. Bad lines are skipped, not fatal; one rotten line in a
//! half-million-line feed must not sink the run.

use log::debug;

use crate::hosts::normalize_domain;

/// Parse a plain domain list into normalized entries. Leading-dot
/// suffix-form entries are preserved as-is.
pub fn parse_domain_list(text: &str) -> Vec<String> {
    let mut domains = Vec::new();

    for raw_line in text.lines() {
        let line = match raw_line.find(['#', '!']) {
            Some(0) => continue,
            Some(pos) => &raw_line[..pos],
            None => raw_line,
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match normalize_domain(line) {
            Some(domain) => domains.push(domain),
            None => debug!("skipping malformed domain list entry: {line:?}"),
        }
    }

    domains
}

/// Parse a phishing feed, emitting each entry in suffix form: phishing
/// hosts churn through throwaway subdomains, so the whole label subtree is
/// blocked.
pub fn parse_phishing_feed(text: &str) -> Vec<String> {
    parse_domain_list(text)
        .into_iter()
        .map(|d| {
            if d.starts_with('.') {
                d
            } else {
                format!(".{d}")
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_list() {
        let text = "ads.example.com\ntracker.example.net\n";
        assert_eq!(
            parse_domain_list(text),
            vec!["ads.example.com", "tracker.example.net"]
        );
    }

    #[test]
    fn test_comments_and_blanks() {
        let text = "\
# full-line comment
! adblock-style comment

ads.example.com  # trailing
";
        assert_eq!(parse_domain_list(text), vec!["ads.example.com"]);
    }

    #[test]
    fn test_suffix_form_preserved() {
        let text = ".example.com\nplain.example.org";
        assert_eq!(
            parse_domain_list(text),
            vec![".example.com", "plain.example.org"]
        );
    }

    #[test]
    fn test_malformed_lines_skipped() {
        let text = "good.example.com\nnot a domain\na..b.com\n";
        assert_eq!(parse_domain_list(text), vec!["good.example.com"]);
    }

    #[test]
    fn test_phishing_feed_suffix_form() {
        let text = "scam.example.com\n.already.suffixed.net";
        assert_eq!(
            parse_phishing_feed(text),
            vec![".scam.example.com", ".already.suffixed.net"]
        );
    }
}
