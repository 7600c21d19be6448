//! Registrable-root resolution
//!
//! Splits a domain into its registrable root (longest matching public
//! suffix plus one label) and the subdomain remainder, using a bundled
//! public-suffix snapshot. Resolution failure is soft by design: a domain
//! whose root cannot be determined stays in the deduplicated output, it
//! just loses its stats/grouping keys.

use publicsuffix::{List, Psl};

/// Public-suffix snapshot compiled into the crate.
const BUNDLED_PSL: &str = include_str!("../data/public_suffix_list.dat");

/// A domain split into registrable root and subdomain remainder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootSplit {
    /// Registrable root, e.g. `example.com` for `a.b.example.com`.
    pub root: String,
    /// Label remainder relative to the root, e.g. `a.b`; empty for a bare
    /// root domain.
    pub subdomain: String,
}

/// Resolver over a parsed public-suffix list.
pub struct RootResolver {
    list: List,
}

impl RootResolver {
    /// Resolver backed by the bundled snapshot.
    ///
    /// The snapshot is a compile-time constant, so a parse failure is a
    /// build defect rather than a runtime condition.
    #[must_use]
    pub fn bundled() -> Self {
        Self {
            list: BUNDLED_PSL
                .parse()
                .expect("bundled public suffix snapshot is valid"),
        }
    }

    /// Resolver from caller-supplied public-suffix data (e.g. a full
    /// upstream snapshot).
    pub fn from_psl_data(data: &str) -> Result<Self, publicsuffix::Error> {
        Ok(Self {
            list: data.parse()?,
        })
    }

    /// Split `domain` into root and subdomain remainder.
    ///
    /// Returns `None` when no registrable root exists (single label, bare
    /// public suffix, malformed input). Callers treat that as the soft
    /// root-resolution failure: keep the domain, drop its stats keys.
    #[must_use]
    pub fn split(&self, domain: &str) -> Option<RootSplit> {
        let domain = domain.trim().trim_end_matches('.');
        if domain.is_empty() {
            return None;
        }

        let parsed = self.list.domain(domain.as_bytes())?;
        let root = std::str::from_utf8(parsed.as_bytes()).ok()?;
        if root.len() > domain.len() || !domain.ends_with(root) {
            return None;
        }

        let subdomain = domain[..domain.len() - root.len()]
            .trim_end_matches('.')
            .to_string();

        Some(RootSplit {
            root: root.to_string(),
            subdomain,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_root() {
        let resolver = RootResolver::bundled();
        let split = resolver.split("sub.example.com").unwrap();
        assert_eq!(split.root, "example.com");
        assert_eq!(split.subdomain, "sub");
    }

    #[test]
    fn test_bare_root_has_empty_remainder() {
        let resolver = RootResolver::bundled();
        let split = resolver.split("example.com").unwrap();
        assert_eq!(split.root, "example.com");
        assert_eq!(split.subdomain, "");
    }

    #[test]
    fn test_multi_label_remainder() {
        let resolver = RootResolver::bundled();
        let split = resolver.split("a.b.example.com").unwrap();
        assert_eq!(split.root, "example.com");
        assert_eq!(split.subdomain, "a.b");
    }

    #[test]
    fn test_two_part_public_suffix() {
        let resolver = RootResolver::bundled();
        let split = resolver.split("shop.example.co.uk").unwrap();
        assert_eq!(split.root, "example.co.uk");
        assert_eq!(split.subdomain, "shop");
    }

    #[test]
    fn test_wildcard_rule() {
        // *.ck: every label under ck is itself a public suffix.
        let resolver = RootResolver::bundled();
        let split = resolver.split("a.b.ck").unwrap();
        assert_eq!(split.root, "a.b.ck");
    }

    #[test]
    fn test_exception_rule() {
        // !www.ck carves www.ck back out of the *.ck wildcard.
        let resolver = RootResolver::bundled();
        let split = resolver.split("sub.www.ck").unwrap();
        assert_eq!(split.root, "www.ck");
        assert_eq!(split.subdomain, "sub");
    }

    #[test]
    fn test_country_second_level_suffix_keeps_sites_distinct() {
        let resolver = RootResolver::bundled();
        let a = resolver.split("walla.co.il").unwrap();
        assert_eq!(a.root, "walla.co.il");
        assert_eq!(a.subdomain, "");

        let b = resolver.split("news.ynet.co.il").unwrap();
        assert_eq!(b.root, "ynet.co.il");
        assert_eq!(b.subdomain, "news");
        assert_ne!(a.root, b.root);
    }

    #[test]
    fn test_caller_supplied_data_covers_snapshot_gaps() {
        // A suffix absent from the bundled snapshot resolves correctly
        // when the caller loads it from their own list data.
        let resolver = RootResolver::from_psl_data("zz\nco.zz\n").unwrap();
        let split = resolver.split("shop.example.co.zz").unwrap();
        assert_eq!(split.root, "example.co.zz");
        assert_eq!(split.subdomain, "shop");
    }

    #[test]
    fn test_single_label_soft_fails() {
        let resolver = RootResolver::bundled();
        assert!(resolver.split("localhost").is_none());
    }

    #[test]
    fn test_bare_public_suffix_soft_fails() {
        let resolver = RootResolver::bundled();
        assert!(resolver.split("co.uk").is_none());
        assert!(resolver.split("com").is_none());
    }

    #[test]
    fn test_empty_input_soft_fails() {
        let resolver = RootResolver::bundled();
        assert!(resolver.split("").is_none());
        assert!(resolver.split(".").is_none());
    }

    #[test]
    fn test_private_suffix() {
        let resolver = RootResolver::bundled();
        let split = resolver.split("project.pages.github.io").unwrap();
        assert_eq!(split.root, "pages.github.io");
        assert_eq!(split.subdomain, "project");
    }
}
