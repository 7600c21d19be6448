//! Domain trie and covering-set extraction
//!
//! Domains are stored as label paths read TLD-first, so `ads.example.com`
//! occupies the path `com -> example -> ads`. Each node carries a terminal
//! flag (a block rule ends here) and a whitelisted flag (an override rule
//! ends here). Neither flag is resolved against the other at insertion time:
//! rules arrive from thousands of sources in no meaningful order, so
//! precedence is decided once, top-down, during extraction.
//!
//! Nodes live in an arena indexed by integer handles; child maps are
//! `BTreeMap` keyed by label so traversal order is deterministic for
//! identical input.

use std::collections::BTreeMap;

const ROOT: usize = 0;

#[derive(Debug, Default)]
struct Node {
    children: BTreeMap<String, usize>,
    terminal: bool,
    whitelisted: bool,
}

/// Suffix-aware trie over domain labels.
#[derive(Debug)]
pub struct DomainTrie {
    nodes: Vec<Node>,
    rule_count: usize,
}

impl Default for DomainTrie {
    fn default() -> Self {
        Self::new()
    }
}

impl DomainTrie {
    /// Create an empty trie containing only the root node. The root itself
    /// is never a valid terminal: an all-domains rule is not representable.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::default()],
            rule_count: 0,
        }
    }

    /// Insert a block rule for `domain` (and, by suffix coverage, all of its
    /// subdomains). Leading-dot suffix form and bare form collapse to the
    /// same stored rule. Idempotent.
    ///
    /// Returns `false` when the entry is malformed (empty, or containing an
    /// empty label); one bad source line must not invalidate the batch, so
    /// malformed entries are skipped rather than raised.
    pub fn add(&mut self, domain: &str) -> bool {
        let Some(node) = self.walk_path(domain) else {
            return false;
        };
        if !self.nodes[node].terminal {
            self.nodes[node].terminal = true;
            self.rule_count += 1;
        }
        true
    }

    /// Mark `domain` as a whitelist boundary, suppressing the node and every
    /// descendant from extraction. Takes precedence over terminal flags at or
    /// below it, and may be applied before or after the matching `add` calls
    /// with an identical end result.
    pub fn whitelist(&mut self, domain: &str) -> bool {
        let Some(node) = self.walk_path(domain) else {
            return false;
        };
        self.nodes[node].whitelisted = true;
        true
    }

    /// Number of distinct block rules inserted so far.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rule_count
    }

    /// Extract the minimal covering domain set.
    ///
    /// Emits every terminal node that is not dominated by a whitelist
    /// boundary and not a strict descendant of another surviving terminal:
    /// the broader rule subsumes the narrower one. Output order is the
    /// trie's natural traversal order, which is deterministic but not the
    /// presentation order; the stable sorter owns that.
    #[must_use]
    pub fn covering_set(&self) -> Vec<String> {
        let mut out = Vec::new();
        let mut labels: Vec<&str> = Vec::new();
        self.collect(ROOT, &mut labels, &mut out);
        out
    }

    fn collect<'a>(&'a self, node: usize, labels: &mut Vec<&'a str>, out: &mut Vec<String>) {
        for (label, &child) in &self.nodes[node].children {
            let n = &self.nodes[child];
            if n.whitelisted {
                // Whitelist wins over any terminal at or below this point.
                continue;
            }
            labels.push(label);
            if n.terminal {
                // Shallowest terminal on this path: everything deeper is
                // already covered by suffix semantics.
                out.push(join_labels(labels));
            } else {
                self.collect(child, labels, out);
            }
            labels.pop();
        }
    }

    /// Walk (and create) the label path for `domain`, returning the final
    /// node handle, or `None` for malformed input.
    fn walk_path(&mut self, domain: &str) -> Option<usize> {
        let normalized = normalize(domain)?;
        let mut node = ROOT;
        for label in normalized.rsplit('.') {
            node = match self.nodes[node].children.get(label) {
                Some(&child) => child,
                None => {
                    let child = self.nodes.len();
                    self.nodes.push(Node::default());
                    self.nodes[node]
                        .children
                        .insert(label.to_string(), child);
                    child
                }
            };
        }
        Some(node)
    }
}

/// Strip the suffix-form leading dot and any trailing dot, lowercase, and
/// reject entries with empty labels.
fn normalize(domain: &str) -> Option<String> {
    let trimmed = domain.trim();
    let trimmed = trimmed.strip_prefix('.').unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix('.').unwrap_or(trimmed);
    if trimmed.is_empty() || trimmed.split('.').any(str::is_empty) {
        return None;
    }
    Some(trimmed.to_ascii_lowercase())
}

fn join_labels(labels: &[&str]) -> String {
    // Labels were collected TLD-first; presentation order is leaf-first.
    let mut s = String::with_capacity(labels.iter().map(|l| l.len() + 1).sum());
    for label in labels.iter().rev() {
        if !s.is_empty() {
            s.push('.');
        }
        s.push_str(label);
    }
    s
}
