//! Hosts-file parsing
//!
//! Extracts normalized block domains from classic hosts files
//! (`0.0.0.0 ads.example.com`). The IP column is routing noise here; a
//! second column that is itself an IP literal is dropped, as are the
//! loopback names every hosts file carries.

use std::net::IpAddr;

/// Names that appear in virtually every hosts file and are never block
/// rules.
const LOCAL_NAMES: &[&str] = &[
    "localhost",
    "localhost.localdomain",
    "local",
    "broadcasthost",
    "ip6-localhost",
    "ip6-loopback",
    "ip6-localnet",
    "ip6-mcastprefix",
    "ip6-allnodes",
    "ip6-allrouters",
    "ip6-allhosts",
];

/// Parse hosts-file text into normalized block domains.
pub fn parse_hosts(text: &str) -> Vec<String> {
    let mut domains = Vec::new();

    for raw_line in text.lines() {
        let line = match raw_line.find('#') {
            Some(pos) => &raw_line[..pos],
            None => raw_line,
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut parts = line.split_whitespace();
        let (Some(first), Some(second)) = (parts.next(), parts.next()) else {
            continue;
        };

        // Only lines whose first column is an IP are hosts entries.
        if first.parse::<IpAddr>().is_err() {
            continue;
        }
        // IP-literal block entries are routed elsewhere upstream.
        if second.parse::<IpAddr>().is_ok() {
            continue;
        }

        let Some(domain) = normalize_domain(second) else {
            continue;
        };
        if LOCAL_NAMES.contains(&domain.as_str()) {
            continue;
        }
        domains.push(domain);
    }

    domains
}

/// Lowercase and validate a bare hostname. Leading-dot suffix entries keep
/// their dot; interior structure must be clean ASCII hostname bytes.
pub(crate) fn normalize_domain(host: &str) -> Option<String> {
    let trimmed = host.trim().trim_end_matches('.');
    let (prefix, body) = match trimmed.strip_prefix('.') {
        Some(rest) => (".", rest),
        None => ("", trimmed),
    };

    if body.is_empty() || body.split('.').any(str::is_empty) {
        return None;
    }
    if !body
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'.' || b == b'-' || b == b'_')
    {
        return None;
    }

    Some(format!("{prefix}{}", body.to_ascii_lowercase()))
}
