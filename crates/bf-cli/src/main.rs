//! blockforge CLI
//!
//! Fetches every configured source concurrently, merges the contributions,
//! runs the consolidation engine, and writes the ruleset, Clash, and stats
//! outputs.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Parser, Subcommand};
use log::warn;
use tokio::task::JoinSet;

use bf_core::{consolidate, ConsolidateInput, ConsolidateOutput, RootResolver};
use bf_sources::{load_source, parse_domain_list, parse_ruleset, LocalRules, SourceResult};

mod config;
mod output;

use config::BuildConfig;
use output::{write_clash, write_ruleset, write_stats};

#[derive(Parser)]
#[command(name = "bf-cli")]
#[command(about = "blockforge domain blocklist builder")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch all sources, consolidate, and write the ruleset outputs
    Build {
        /// Build configuration (JSON)
        #[arg(short, long)]
        config: PathBuf,

        /// Output directory for reject.conf, reject-clash.txt, stats.txt
        #[arg(short, long, default_value = "dist")]
        out_dir: PathBuf,
    },

    /// Parse a local TYPE,VALUE ruleset and report per-type counts
    Check {
        /// Ruleset file to validate
        #[arg(short, long)]
        rules: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let exit_code = match cli.command {
        Commands::Build { config, out_dir } => match cmd_build(&config, &out_dir).await {
            Ok(code) => code,
            Err(e) => {
                eprintln!("Error: {e}");
                1
            }
        },
        Commands::Check { rules } => match cmd_check(&rules) {
            Ok(()) => 0,
            Err(e) => {
                eprintln!("Error: {e}");
                1
            }
        },
    };

    std::process::exit(exit_code);
}

#[derive(Debug, thiserror::Error)]
enum BuildError {
    #[error(transparent)]
    Config(#[from] config::ConfigError),
    #[error(transparent)]
    Consolidate(#[from] bf_core::ConsolidateError),
    #[error(transparent)]
    Output(#[from] output::OutputError),
    #[error("reading '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing public suffix list '{path}': {source}")]
    Psl {
        path: String,
        #[source]
        source: publicsuffix::Error,
    },
}

async fn cmd_build(config_path: &Path, out_dir: &Path) -> Result<i32, BuildError> {
    let start = Instant::now();
    let config = BuildConfig::load(config_path)?;

    let (merged, debug_found) = gather_sources(&config).await;
    let local = load_local_inputs(&config)?;

    let mut candidates: HashSet<String> = merged.block.into_iter().collect();
    candidates.extend(local.suffixes.iter().cloned());
    candidates.extend(local.domains.iter().cloned());

    let mut whitelist: HashSet<String> = merged.unblock.into_iter().collect();
    whitelist.extend(config.whitelist.iter().cloned());

    let imported = candidates.len();
    let input = ConsolidateInput {
        candidates,
        whitelist,
        keywords: local.keywords,
    };

    let resolver = load_resolver(&config)?;
    let result = consolidate(&input, &resolver)?;

    fs::create_dir_all(out_dir).map_err(|source| BuildError::Io {
        path: out_dir.display().to_string(),
        source,
    })?;
    write_ruleset(&out_dir.join("reject.conf"), &result.domains)?;
    write_clash(&out_dir.join("reject-clash.txt"), &result.domains)?;
    write_stats(&out_dir.join("stats.txt"), &result.stats)?;

    print_report(&result, imported, start);

    if debug_found {
        eprintln!("debug domain detected during source processing");
        return Ok(1);
    }
    Ok(0)
}

/// Fan out one task per source, join them all, and fold the immutable
/// results into one contribution. A failed source is reported and merges
/// as an empty set; the per-source debug flags reduce by logical OR.
async fn gather_sources(config: &BuildConfig) -> (SourceResult, bool) {
    let client = reqwest::Client::new();
    let mut tasks: JoinSet<Result<SourceResult, bf_sources::SourceError>> = JoinSet::new();

    for spec in config.sources.clone() {
        let client = client.clone();
        let marker = config.debug_domain.clone();
        tasks.spawn(async move { load_source(&client, &spec, marker.as_deref()).await });
    }

    let mut merged = SourceResult::default();
    let mut debug_found = false;

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(Ok(result)) => {
                debug_found |= result.debug_found;
                merged.block.extend(result.block);
                merged.unblock.extend(result.unblock);
            }
            Ok(Err(e)) => warn!("source failed, contributing nothing: {e}"),
            Err(e) => warn!("source task panicked: {e}"),
        }
    }

    (merged, debug_found)
}

/// Build the root resolver, preferring a caller-supplied public-suffix
/// list over the bundled snapshot. A full list matters for stats grouping:
/// a multi-level suffix the snapshot omits would otherwise be taken for a
/// registrable root and collapse unrelated sites into one stats row.
fn load_resolver(config: &BuildConfig) -> Result<RootResolver, BuildError> {
    match &config.psl {
        Some(path) => {
            let text = fs::read_to_string(path).map_err(|source| BuildError::Io {
                path: path.display().to_string(),
                source,
            })?;
            RootResolver::from_psl_data(&text).map_err(|source| BuildError::Psl {
                path: path.display().to_string(),
                source,
            })
        }
        None => Ok(RootResolver::bundled()),
    }
}

fn load_local_inputs(config: &BuildConfig) -> Result<LocalRules, BuildError> {
    let mut rules = match &config.ruleset {
        Some(path) => {
            let text = fs::read_to_string(path).map_err(|source| BuildError::Io {
                path: path.display().to_string(),
                source,
            })?;
            parse_ruleset(&text)
        }
        None => LocalRules::default(),
    };

    if let Some(path) = &config.local_domains {
        let text = fs::read_to_string(path).map_err(|source| BuildError::Io {
            path: path.display().to_string(),
            source,
        })?;
        rules.domains.extend(parse_domain_list(&text));
    }

    Ok(rules)
}

fn print_report(result: &ConsolidateOutput, imported: usize, start: Instant) {
    println!("Imported:   {imported}");
    println!(
        "Final:      {} ({} keyword-excluded, {} malformed, {} without root)",
        result.domains.len(),
        result.keyword_excluded,
        result.malformed,
        result.unresolved_roots
    );
    println!("Stats rows: {}", result.stats.len());
    println!("Time:       {:.1}ms", start.elapsed().as_secs_f64() * 1000.0);
}

#[derive(Debug, thiserror::Error)]
enum CheckError {
    #[error("reading '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

fn cmd_check(rules_path: &Path) -> Result<(), CheckError> {
    let text = fs::read_to_string(rules_path).map_err(|source| CheckError::Io {
        path: rules_path.display().to_string(),
        source,
    })?;
    let rules = parse_ruleset(&text);

    println!("Keywords:   {}", rules.keywords.len());
    println!("Suffixes:   {}", rules.suffixes.len());
    println!("Domains:    {}", rules.domains.len());
    println!("Total:      {}", rules.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_configured_psl_file_drives_root_resolution() {
        let dir = std::env::temp_dir().join("bf_cli_test");
        let _ = std::fs::create_dir_all(&dir);
        let file_path = dir.join("psl.dat");
        let mut f = std::fs::File::create(&file_path).unwrap();
        writeln!(f, "zz\nco.zz").unwrap();
        drop(f);

        let config = BuildConfig {
            psl: Some(file_path.clone()),
            ..Default::default()
        };
        let resolver = load_resolver(&config).unwrap();
        let split = resolver.split("tracker.example.co.zz").unwrap();
        assert_eq!(split.root, "example.co.zz");
        assert_eq!(split.subdomain, "tracker");

        let _ = std::fs::remove_file(&file_path);
        let _ = std::fs::remove_dir(&dir);
    }

    #[test]
    fn test_missing_psl_file_errors() {
        let config = BuildConfig {
            psl: Some(PathBuf::from("/nonexistent/psl.dat")),
            ..Default::default()
        };
        assert!(matches!(
            load_resolver(&config),
            Err(BuildError::Io { .. })
        ));
    }

    #[test]
    fn test_unset_psl_falls_back_to_bundled() {
        let resolver = load_resolver(&BuildConfig::default()).unwrap();
        assert!(resolver.split("example.com").is_some());
    }
}
