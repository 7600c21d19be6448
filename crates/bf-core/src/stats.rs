//! Per-root-domain statistics
//!
//! Counts surviving domains per registrable root, drops low-count noise,
//! and renders the fixed-width report consumed by the build output.

use std::collections::HashMap;

use crate::sort::DomainMaps;

/// Roots with this many surviving domains or fewer are noise and excluded
/// from the report.
pub const NOISE_THRESHOLD: usize = 9;

/// Column the count starts at in a rendered report line.
const REPORT_PAD_WIDTH: usize = 100;

/// One report entry: a registrable root and how many surviving domains
/// share it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootCount {
    pub root: String,
    pub count: usize,
}

/// Count surviving domains per root, discard roots at or below
/// [`NOISE_THRESHOLD`], and order by count descending with ascending
/// lexicographic root as the tie-break. Domains with no resolved root are
/// ignored here; they already soft-failed in the map builder.
#[must_use]
pub fn aggregate(domains: &[String], maps: &DomainMaps) -> Vec<RootCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for domain in domains {
        if let Some(root) = maps.root.get(domain) {
            *counts.entry(root).or_insert(0) += 1;
        }
    }

    let mut entries: Vec<RootCount> = counts
        .into_iter()
        .filter(|&(_, count)| count > NOISE_THRESHOLD)
        .map(|(root, count)| RootCount {
            root: root.to_string(),
            count,
        })
        .collect();

    entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.root.cmp(&b.root)));
    entries
}

/// Render the report: one line per root, root right-padded with spaces to a
/// fixed column width, followed by the count.
#[must_use]
pub fn render_report(entries: &[RootCount]) -> String {
    let mut out = String::new();
    for entry in entries {
        out.push_str(&format!(
            "{:<width$}{}\n",
            entry.root,
            entry.count,
            width = REPORT_PAD_WIDTH
        ));
    }
    out
}
