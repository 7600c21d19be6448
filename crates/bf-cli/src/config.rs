//! Build configuration
//!
//! The whole source roster is an explicit JSON value handed to the build
//! command (which feeds to fetch, which parser each one needs, which feeds
//! fold into the whitelist) rather than a constant table baked into the
//! binary.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use bf_sources::SourceSpec;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("reading config '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing config '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// One build run's configuration.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Remote and local sources contributing block/whitelist entries.
    pub sources: Vec<SourceSpec>,
    /// Static whitelist entries applied on top of source contributions.
    #[serde(default)]
    pub whitelist: Vec<String>,
    /// Local `TYPE,VALUE` ruleset path (keywords, suffix rules, exacts).
    #[serde(default)]
    pub ruleset: Option<PathBuf>,
    /// Local curated domain list folded into the candidate set.
    #[serde(default)]
    pub local_domains: Option<PathBuf>,
    /// Full public-suffix list file; the bundled snapshot is used when
    /// unset. Required for correct stats grouping under multi-level
    /// suffixes the snapshot omits.
    #[serde(default)]
    pub psl: Option<PathBuf>,
    /// Diagnostic sentinel: when this domain shows up in any source, the
    /// run finishes, reports, and exits non-zero.
    #[serde(default)]
    pub debug_domain: Option<String>,
}

impl BuildConfig {
    /// Load a configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }
}
