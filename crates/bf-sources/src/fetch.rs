//! Source descriptors and the fetch layer
//!
//! Each source is described by an explicit [`SourceSpec`] (no hidden global
//! registry) and yields an immutable [`SourceResult`]. The caller fans
//! sources out concurrently, joins them, and folds the results; a failed
//! source contributes an empty result, which union-merges as a no-op.
//!
//! The diagnostic "debug domain" sentinel is evaluated here, per source,
//! and travels back as a plain field on the result; the caller ORs the
//! flags after the join instead of sharing a mutable flag across tasks.

use std::path::PathBuf;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::adblock::parse_adblock;
use crate::domainlist::{parse_domain_list, parse_phishing_feed};
use crate::hosts::parse_hosts;

/// Wire format a source is parsed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceFormat {
    /// Classic hosts file (`0.0.0.0 domain`).
    Hosts,
    /// One domain per line, optionally in leading-dot suffix form.
    DomainList,
    /// Domain-per-line phishing feed; entries become suffix rules.
    PhishingFeed,
    /// ABP/uBO filter list; `@@` rules land on the white side.
    Adblock,
}

/// One configured source: where it lives and how to parse it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSpec {
    pub name: String,
    /// Remote location; mutually exclusive with `path`.
    #[serde(default)]
    pub url: Option<String>,
    /// Local file location; mutually exclusive with `url`.
    #[serde(default)]
    pub path: Option<PathBuf>,
    pub format: SourceFormat,
    /// Fold BOTH sides of this source into the whitelist set. Used for the
    /// dedicated exceptions/exclusions filter feeds.
    #[serde(default)]
    pub fold_into_whitelist: bool,
}

/// Immutable result of fetching and parsing one source.
#[derive(Debug, Default, Clone)]
pub struct SourceResult {
    /// Candidate block entries.
    pub block: Vec<String>,
    /// Whitelist entries.
    pub unblock: Vec<String>,
    /// The debug sentinel domain appeared in this source.
    pub debug_found: bool,
}

/// Fetch/parse failure for one source. The merge tolerates the resulting
/// empty contribution; propagation policy belongs to the caller.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("source '{name}' has neither url nor path")]
    NoLocation { name: String },
    #[error("fetching '{name}': {source}")]
    Http {
        name: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("reading '{name}': {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

/// Fetch a source's raw text and parse it.
pub async fn load_source(
    client: &reqwest::Client,
    spec: &SourceSpec,
    debug_marker: Option<&str>,
) -> Result<SourceResult, SourceError> {
    let text = match (&spec.url, &spec.path) {
        (Some(url), _) => {
            debug!("fetching {} from {url}", spec.name);
            let response = client
                .get(url)
                .send()
                .await
                .and_then(reqwest::Response::error_for_status)
                .map_err(|source| SourceError::Http {
                    name: spec.name.clone(),
                    source,
                })?;
            response.text().await.map_err(|source| SourceError::Http {
                name: spec.name.clone(),
                source,
            })?
        }
        (None, Some(path)) => {
            std::fs::read_to_string(path).map_err(|source| SourceError::Io {
                name: spec.name.clone(),
                source,
            })?
        }
        (None, None) => {
            return Err(SourceError::NoLocation {
                name: spec.name.clone(),
            })
        }
    };

    Ok(process_text(spec, &text, debug_marker))
}

/// Parse already-fetched source text according to the spec's format.
pub fn process_text(spec: &SourceSpec, text: &str, debug_marker: Option<&str>) -> SourceResult {
    let mut result = match spec.format {
        SourceFormat::Hosts => SourceResult {
            block: parse_hosts(text),
            ..SourceResult::default()
        },
        SourceFormat::DomainList => SourceResult {
            block: parse_domain_list(text),
            ..SourceResult::default()
        },
        SourceFormat::PhishingFeed => SourceResult {
            block: parse_phishing_feed(text),
            ..SourceResult::default()
        },
        SourceFormat::Adblock => {
            let parsed = parse_adblock(text);
            SourceResult {
                block: parsed.block,
                unblock: parsed.unblock,
                debug_found: false,
            }
        }
    };

    if let Some(marker) = debug_marker {
        result.debug_found =
            contains_marker(&result.block, marker) || contains_marker(&result.unblock, marker);
        if result.debug_found {
            info!("debug domain {marker:?} found in source '{}'", spec.name);
        }
    }

    if spec.fold_into_whitelist {
        // Exceptions feeds: both sides are overrides.
        let mut unblock = std::mem::take(&mut result.block);
        unblock.append(&mut result.unblock);
        result.unblock = unblock;
    }

    info!(
        "source '{}': {} block, {} unblock entries",
        spec.name,
        result.block.len(),
        result.unblock.len()
    );
    result
}

/// Exact match or subdomain-of-marker, tolerating suffix-form entries.
fn contains_marker(domains: &[String], marker: &str) -> bool {
    domains.iter().any(|d| {
        let d = d.strip_prefix('.').unwrap_or(d);
        d == marker || d.strip_suffix(marker).is_some_and(|head| head.ends_with('.'))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(format: SourceFormat, fold: bool) -> SourceSpec {
        SourceSpec {
            name: "test".to_string(),
            url: None,
            path: None,
            format,
            fold_into_whitelist: fold,
        }
    }

    #[test]
    fn test_hosts_source() {
        let result = process_text(
            &spec(SourceFormat::Hosts, false),
            "0.0.0.0 ads.example.com",
            None,
        );
        assert_eq!(result.block, vec!["ads.example.com"]);
        assert!(result.unblock.is_empty());
    }

    #[test]
    fn test_adblock_source_splits_sides() {
        let result = process_text(
            &spec(SourceFormat::Adblock, false),
            "||ads.example.com^\n@@||cdn.example.com^",
            None,
        );
        assert_eq!(result.block, vec!["ads.example.com"]);
        assert_eq!(result.unblock, vec!["cdn.example.com"]);
    }

    #[test]
    fn test_fold_into_whitelist_merges_both_sides() {
        let result = process_text(
            &spec(SourceFormat::Adblock, true),
            "||excluded.example.com^\n@@||also.example.com^",
            None,
        );
        assert!(result.block.is_empty());
        assert_eq!(
            result.unblock,
            vec!["excluded.example.com", "also.example.com"]
        );
    }

    #[test]
    fn test_phishing_feed_suffix_entries() {
        let result = process_text(
            &spec(SourceFormat::PhishingFeed, false),
            "scam.example.com",
            None,
        );
        assert_eq!(result.block, vec![".scam.example.com"]);
    }

    #[test]
    fn test_debug_marker_exact() {
        let result = process_text(
            &spec(SourceFormat::DomainList, false),
            "probe.invalid\nother.example.com",
            Some("probe.invalid"),
        );
        assert!(result.debug_found);
    }

    #[test]
    fn test_debug_marker_subdomain() {
        let result = process_text(
            &spec(SourceFormat::DomainList, false),
            "deep.probe.invalid",
            Some("probe.invalid"),
        );
        assert!(result.debug_found);
    }

    #[test]
    fn test_debug_marker_no_false_positive() {
        let result = process_text(
            &spec(SourceFormat::DomainList, false),
            "notprobe.invalid\nprobe.invalid.example.com",
            Some("probe.invalid"),
        );
        assert!(!result.debug_found);
    }

    #[test]
    fn test_debug_marker_suffix_form_entry() {
        let result = process_text(
            &spec(SourceFormat::DomainList, false),
            ".probe.invalid",
            Some("probe.invalid"),
        );
        assert!(result.debug_found);
    }

    #[tokio::test]
    async fn test_missing_location_errors() {
        let client = reqwest::Client::new();
        let result = load_source(&client, &spec(SourceFormat::Hosts, false), None).await;
        assert!(matches!(result, Err(SourceError::NoLocation { .. })));
    }

    #[tokio::test]
    async fn test_local_file_source() {
        use std::io::Write;
        let dir = std::env::temp_dir().join("bf_sources_test");
        let _ = std::fs::create_dir_all(&dir);
        let file_path = dir.join("local_hosts.txt");
        let mut f = std::fs::File::create(&file_path).unwrap();
        writeln!(f, "0.0.0.0 local.example.com").unwrap();
        drop(f);

        let client = reqwest::Client::new();
        let mut s = spec(SourceFormat::Hosts, false);
        s.path = Some(file_path.clone());
        let result = load_source(&client, &s, None).await.unwrap();
        assert_eq!(result.block, vec!["local.example.com"]);

        let _ = std::fs::remove_file(&file_path);
        let _ = std::fs::remove_dir(&dir);
    }
}
