//! CLI parse: clap types for asset. No behavior; definitions only.

use crate::transfer::TransferMode;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// asset CLI - Track shared files and directories as aliased, taggable assets
#[derive(Parser, Debug)]
#[command(name = "asset", version)]
#[command(about = "Track shared files and directories as a forest of aliased, taggable assets")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides default config loading)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (default: off)
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Disable colored listings
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create an empty asset collection file
    Init {
        /// Collection file to create
        path: PathBuf,
        /// Store root for transferred items (items are recorded in place when omitted)
        store: Option<PathBuf>,
        /// Overwrite an existing collection file
        #[arg(long)]
        force: bool,
        /// Create missing directories
        #[arg(long)]
        mkdir: bool,
    },
    /// List assets as trees
    Avail(ListArgs),
    /// List assets with full details
    Spider(ListArgs),
    /// Print the item location of an asset
    Pull {
        /// Search path, e.g. genomes/human:ucsc/hg38
        search: String,
    },
    /// Add an asset to the first collection
    Add(AssetArgs),
    /// Modify an existing asset
    Mod {
        /// Search path of the asset to modify
        search: String,
        #[command(flatten)]
        asset: AssetArgs,
    },
    /// Delete an asset
    Del {
        /// Search path of the asset to delete
        search: String,
        /// Also delete every descendant
        #[arg(short, long)]
        recursive: bool,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Search path; lists everything when omitted
    pub search: Option<String>,
    /// Disable the fuzzy fallback
    #[arg(long)]
    pub exact: bool,
    /// Output format (text or json)
    #[arg(long, default_value = "text", value_parser = ["text", "json"])]
    pub format: String,
}

#[derive(Args, Debug, Clone, Default)]
pub struct AssetArgs {
    /// Alias(es) of the asset
    #[arg(short, long, num_args = 1..)]
    pub alias: Vec<String>,
    /// Tag(s) distinguishing assets that share an alias
    #[arg(short, long, num_args = 1..)]
    pub tag: Vec<String>,
    /// Search path of the parent asset
    #[arg(short, long)]
    pub parent: Option<String>,
    /// Free-text description
    #[arg(short, long)]
    pub description: Option<String>,
    /// File or directory to track
    #[arg(short, long)]
    pub item: Option<PathBuf>,
    /// How the item reaches the store (default from config: copy)
    #[arg(short, long, value_enum)]
    pub mode: Option<TransferMode>,
    /// Name the stored item after the parent asset
    #[arg(long)]
    pub inherit: bool,
    /// Command line that produced the item
    #[arg(long)]
    pub cli: Option<String>,
    /// Skip the md5 digest
    #[arg(long)]
    pub nodigest: bool,
}
