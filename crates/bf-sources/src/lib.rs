//! blockforge Source Layer
//!
//! Parsers for every feed format blockforge consumes (hosts files,
//! adblock-style filter lists, plain domain lists, phishing feeds, and the
//! local `TYPE,VALUE` ruleset) plus the fetch layer that turns a
//! [`SourceSpec`] into an immutable [`SourceResult`] for the merge step.

pub mod adblock;
pub mod domainlist;
pub mod fetch;
pub mod hosts;
pub mod ruleset;

pub use adblock::{parse_adblock, AdblockDomains};
pub use domainlist::{parse_domain_list, parse_phishing_feed};
pub use fetch::{load_source, process_text, SourceError, SourceFormat, SourceResult, SourceSpec};
pub use hosts::parse_hosts;
pub use ruleset::{parse_ruleset, LocalRules};
