//! pmtrie CLI - command line driver for the Patricia Merkle trie
//!
//! Keeps a trie in a snapshot file between invocations and can replay the
//! reference insertion scenario.

use clap::{Parser, Subcommand};
use pmtrie::{BranchStore, PatriciaTrie, TrieConfig};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pmtrie")]
#[command(about = "A path-compressed Merkle radix trie with lazily loaded subtrees")]
#[command(version)]
struct Cli {
    /// Path to the snapshot file
    #[arg(short, long, default_value = "trie.pmt")]
    snapshot: PathBuf,

    /// JSON trie configuration, used when creating a new snapshot
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format (json or text)
    #[arg(short, long, default_value = "json")]
    format: OutputFormat,

    /// Treat keys and values as hex-encoded bytes
    #[arg(long)]
    hex: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[derive(Subcommand)]
enum Commands {
    /// Insert or overwrite a record
    Insert {
        /// The key
        key: String,
        /// The value
        value: String,
    },

    /// Print the trie structure
    Dump,

    /// List every record with its rebuilt key
    Records,

    /// Show store statistics
    Stat,

    /// Replay the reference scenario on a fresh in-memory trie
    Demo,
}

/// The reference scenario: an update, prefix splits, and a sibling fork
const DEMO_INSERTS: &[(&str, &str)] = &[
    ("eran", "lerer"),
    ("eran", "lereron"),
    ("eranit", "lerer"),
    ("er", "lerer"),
    ("moshe", "lerer"),
    ("mosho", "lerer"),
];

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Insert { ref key, ref value } => {
            let key_bytes = decode_arg(key, cli.hex)?;
            let value_bytes = decode_arg(value, cli.hex)?;

            let mut trie = open_trie(&cli.snapshot, cli.config.as_deref())?;
            trie.insert(&key_bytes, &value_bytes)?;
            trie.save(&cli.snapshot)?;

            output(
                &cli.format,
                &serde_json::json!({
                    "status": "ok",
                    "key": key,
                    "hash": pmtrie::Hash::record(&key_bytes, &value_bytes).to_hex(),
                    "branches": trie.store().len()
                }),
            );
        }

        Commands::Dump => {
            let trie = open_trie(&cli.snapshot, cli.config.as_deref())?;
            let dump = trie.dump()?;
            match cli.format {
                OutputFormat::Text => println!("{}", dump),
                OutputFormat::Json => output(&cli.format, &serde_json::json!({ "dump": dump })),
            }
        }

        Commands::Records => {
            let trie = open_trie(&cli.snapshot, cli.config.as_deref())?;
            output(&cli.format, &records_json(&trie)?);
        }

        Commands::Stat => {
            let trie = open_trie(&cli.snapshot, cli.config.as_deref())?;
            let paths: Vec<_> = trie
                .store()
                .paths()
                .iter()
                .map(|path| path.escape_ascii().to_string())
                .collect();
            output(
                &cli.format,
                &serde_json::json!({
                    "snapshot": cli.snapshot.display().to_string(),
                    "branching_factor": trie.config().branching_factor,
                    "branches": paths.len(),
                    "paths": paths
                }),
            );
        }

        Commands::Demo => {
            let config = match &cli.config {
                Some(path) => TrieConfig::load(path)?,
                None => TrieConfig::default(),
            };
            let mut trie = PatriciaTrie::new(config)?;
            for (key, value) in DEMO_INSERTS {
                tracing::info!(key, value, "demo insert");
                trie.insert(key.as_bytes(), value.as_bytes())?;
            }
            match cli.format {
                OutputFormat::Text => println!("{}", trie.dump()?),
                OutputFormat::Json => output(&cli.format, &records_json(&trie)?),
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn open_trie(snapshot: &Path, config: Option<&Path>) -> anyhow::Result<PatriciaTrie> {
    let config = match config {
        Some(path) => TrieConfig::load(path)?,
        None => TrieConfig::default(),
    };
    Ok(PatriciaTrie::load_or_create(snapshot, config)?)
}

fn decode_arg(arg: &str, hex: bool) -> anyhow::Result<Vec<u8>> {
    if hex {
        hex::decode(arg).map_err(|e| anyhow::anyhow!("Invalid hex argument {}: {}", arg, e))
    } else {
        Ok(arg.as_bytes().to_vec())
    }
}

fn records_json(trie: &PatriciaTrie) -> anyhow::Result<serde_json::Value> {
    let items: Vec<_> = trie
        .records()?
        .iter()
        .map(|(key, hash)| {
            serde_json::json!({
                "key": key.escape_ascii().to_string(),
                "hash": hash.to_hex()
            })
        })
        .collect();
    Ok(serde_json::json!({
        "count": items.len(),
        "records": items
    }))
}

fn output(format: &OutputFormat, value: &serde_json::Value) {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string(value).unwrap());
        }
        OutputFormat::Text => {
            println!("{}", serde_json::to_string_pretty(value).unwrap());
        }
    }
}
