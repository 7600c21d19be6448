//! blockforge Core Library
//!
//! The domain consolidation engine: merges candidate blocklist entries from
//! many overlapping sources into one minimal, deterministic covering set,
//! plus per-root-domain statistics.
//!
//! # Architecture
//!
//! The engine is synchronous and runs once per batch, after all concurrent
//! source producers have completed and handed over immutable snapshots.
//! Three independent exclusion mechanisms are reconciled:
//!
//! - keyword exclusion (pre-insertion, [`keyword`])
//! - suffix coverage deduplication (extraction-time, [`trie`])
//! - whitelist override (extraction-time, wins over everything, [`trie`])
//!
//! # Modules
//!
//! - `keyword`: multi-pattern substring exclusion filter
//! - `trie`: label trie with whitelist marks and covering-set extraction
//! - `psl`: registrable-root resolution over a public-suffix snapshot
//! - `sort`: root/subdomain maps and the stable presentation ordering
//! - `stats`: per-root counts and the fixed-width report
//! - `consolidate`: the batch pipeline tying the above together

pub mod consolidate;
pub mod keyword;
pub mod psl;
pub mod sort;
pub mod stats;
pub mod trie;

// Re-export commonly used types
pub use consolidate::{consolidate, ConsolidateError, ConsolidateInput, ConsolidateOutput};
pub use keyword::{KeywordError, KeywordFilter};
pub use psl::{RootResolver, RootSplit};
pub use sort::{build_domain_maps, sort_domains, DomainMaps};
pub use stats::{aggregate, render_report, RootCount, NOISE_THRESHOLD};
pub use trie::DomainTrie;
