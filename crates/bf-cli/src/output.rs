//! Ruleset and report writers
//!
//! Every surviving entry is a covering rule, so the plain ruleset renders
//! each one in suffix form (leading dot) and the Clash rendition uses the
//! equivalent `+.` wildcard.

use std::fs;
use std::io::Write;
use std::path::Path;

use bf_core::RootCount;

#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("writing '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

fn write_file(path: &Path, contents: &str) -> Result<(), OutputError> {
    let map_err = |source| OutputError::Io {
        path: path.display().to_string(),
        source,
    };
    let mut file = fs::File::create(path).map_err(map_err)?;
    file.write_all(contents.as_bytes()).map_err(map_err)
}

/// Write the plain ruleset: one suffix-form rule per line.
pub fn write_ruleset(path: &Path, domains: &[String]) -> Result<(), OutputError> {
    let mut out = String::new();
    for domain in domains {
        out.push('.');
        out.push_str(domain);
        out.push('\n');
    }
    write_file(path, &out)
}

/// Write the Clash-style rendition: a `payload:` header with one
/// `+.domain` entry per covering rule.
pub fn write_clash(path: &Path, domains: &[String]) -> Result<(), OutputError> {
    let mut out = String::from("payload:\n");
    for domain in domains {
        out.push_str("  - '+.");
        out.push_str(domain);
        out.push_str("'\n");
    }
    write_file(path, &out)
}

/// Write the per-root statistics report.
pub fn write_stats(path: &Path, stats: &[RootCount]) -> Result<(), OutputError> {
    write_file(path, &bf_core::render_report(stats))
}
