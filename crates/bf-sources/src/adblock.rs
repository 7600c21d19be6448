//! Adblock filter-rule parsing
//!
//! Extracts the domain payload from ABP/uBO-style filter lists. blockforge
//! only consumes network rules whose pattern is a whole hostname: host
//! anchors (`||example.com^`), hosts-style lines embedded in filter lists,
//! and plain domain lines. Cosmetic rules, rules with path/option syntax,
//! and anything else that cannot be reduced to a domain are skipped.
//!
//! `@@` exception rules land on the white side; everything else on the
//! black side.

use crate::hosts::normalize_domain;

/// Domains extracted from one filter list, split by rule polarity.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct AdblockDomains {
    /// Block-side domains.
    pub block: Vec<String>,
    /// Exception-side (`@@`) domains.
    pub unblock: Vec<String>,
}

/// Parse adblock filter text into its block/unblock domain sides.
pub fn parse_adblock(text: &str) -> AdblockDomains {
    let mut out = AdblockDomains::default();

    for raw_line in text.lines() {
        let mut line = raw_line.trim();
        if line.is_empty() || is_comment_line(line) {
            continue;
        }

        // Cosmetic and scriptlet rules carry no network domain payload.
        if line.contains("##") || line.contains("#@#") || line.contains("#?#") {
            continue;
        }

        let mut exception = false;
        if let Some(rest) = line.strip_prefix("@@") {
            exception = true;
            line = rest.trim_start();
        }

        // Options would narrow the rule to request types or parties;
        // a narrowed rule is not a whole-domain block.
        let (pattern, options) = split_rule_options(line);
        if options.is_some_and(|o| !o.trim().is_empty()) {
            continue;
        }

        let Some(domain) = extract_rule_domain(pattern.trim()) else {
            continue;
        };

        if exception {
            out.unblock.push(domain);
        } else {
            out.block.push(domain);
        }
    }

    out
}

fn is_comment_line(line: &str) -> bool {
    line.starts_with('!') || line.starts_with('[') || line.starts_with('#')
}

fn split_rule_options(line: &str) -> (&str, Option<&str>) {
    match line.find('$') {
        Some(pos) => (&line[..pos], Some(&line[pos + 1..])),
        None => (line, None),
    }
}

/// Reduce one rule pattern to a domain, or reject it.
fn extract_rule_domain(pattern: &str) -> Option<String> {
    if let Some(domain) = parse_host_anchor_rule(pattern) {
        return Some(domain);
    }
    if let Some(domain) = parse_hosts_style_line(pattern) {
        return Some(domain);
    }
    // Plain domain line (common in domain-only filter lists). Any pattern
    // metacharacter means this is a URL rule we do not consume.
    if pattern.contains(['/', '*', '^', '|', '?', ':', '=']) {
        return None;
    }
    normalize_domain(pattern)
}

/// `||example.com^` / `||example.com` / `||.example.com^` host anchors.
fn parse_host_anchor_rule(pattern: &str) -> Option<String> {
    let rest = pattern.strip_prefix("||")?;
    let rest = rest.strip_prefix('.').unwrap_or(rest);

    let mut end = rest.len();
    for (i, ch) in rest.char_indices() {
        if ch == '^' || ch == '|' {
            end = i;
            break;
        }
        if ch == '/' || ch == '?' || ch == '#' || ch == ':' || ch == '*' {
            return None;
        }
    }

    // The anchor must end at the separator, not continue into a path.
    let tail = &rest[end..];
    if !(tail.is_empty() || tail == "^" || tail == "|") {
        return None;
    }

    normalize_domain(&rest[..end])
}

/// Hosts-style lines (`0.0.0.0 ads.example.com`) inside filter lists.
fn parse_hosts_style_line(pattern: &str) -> Option<String> {
    let mut parts = pattern.split_whitespace();
    let first = parts.next()?;
    let second = parts.next()?;

    if first.parse::<std::net::IpAddr>().is_ok() && second.parse::<std::net::IpAddr>().is_err() {
        return normalize_domain(second);
    }
    None
}
