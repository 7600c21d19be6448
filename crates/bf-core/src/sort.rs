//! Domain map building and stable presentation ordering
//!
//! The deduplicated array comes out of the trie in traversal order; this
//! module derives the root/subdomain maps and produces the final
//! presentation ordering: grouped by registrable root, bare root first
//! within its group, locale-independent, and byte-identical across runs.

use std::cmp::Ordering;
use std::collections::HashMap;

use log::debug;

use crate::psl::RootResolver;

/// Root and subdomain keys for every surviving domain. A domain whose root
/// could not be resolved is absent from both maps; it is still sorted (as
/// its own group) and written out, but excluded from stats.
#[derive(Debug, Default)]
pub struct DomainMaps {
    /// domain -> registrable root
    pub root: HashMap<String, String>,
    /// domain -> label remainder relative to the root (empty for a bare root)
    pub subdomain: HashMap<String, String>,
}

impl DomainMaps {
    /// Number of domains with no resolved root, given the array the maps
    /// were built from.
    #[must_use]
    pub fn unresolved(&self, domains: &[String]) -> usize {
        domains.len() - self.root.len()
    }
}

/// Parse each domain into (root, subdomain remainder).
///
/// Root resolution failure is soft: the entry is logged and skipped in the
/// maps, never dropped from `domains`.
#[must_use]
pub fn build_domain_maps(domains: &[String], resolver: &RootResolver) -> DomainMaps {
    let mut maps = DomainMaps::default();
    for domain in domains {
        match resolver.split(domain) {
            Some(split) => {
                maps.root.insert(domain.clone(), split.root);
                maps.subdomain.insert(domain.clone(), split.subdomain);
            }
            None => {
                debug!("no registrable root for {domain}, excluded from stats");
            }
        }
    }
    maps
}

/// Sort `domains` into the final presentation order.
///
/// Ordering contract:
/// - groups ordered lexicographically by root domain (a domain with no
///   resolved root groups under its own full string);
/// - within a group, the bare root sorts before any subdomain, then
///   subdomains by lexicographic remainder comparison;
/// - last-resort tie-break on the full string, so the order is total.
///
/// The sort is stable (`sort_by`), so entries with equal keys (possible
/// only through the soft-fail path) retain their pre-sort relative order.
pub fn sort_domains(domains: &mut [String], maps: &DomainMaps) {
    domains.sort_by(|a, b| compare_domains(a, b, maps));
}

fn compare_domains(a: &str, b: &str, maps: &DomainMaps) -> Ordering {
    let group_a = maps.root.get(a).map_or(a, String::as_str);
    let group_b = maps.root.get(b).map_or(b, String::as_str);

    group_a
        .cmp(group_b)
        .then_with(|| {
            // Empty remainder (the bare root) sorts ahead of every
            // subdomain under the plain byte comparison.
            let sub_a = maps.subdomain.get(a).map_or(a, String::as_str);
            let sub_b = maps.subdomain.get(b).map_or(b, String::as_str);
            sub_a.cmp(sub_b)
        })
        .then_with(|| a.cmp(b))
}
