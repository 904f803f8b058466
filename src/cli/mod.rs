//! Command-line interface for chunkproof

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;
pub mod context;

pub use context::CliContext;

/// chunkproof - chunk files into segments and prove segment integrity
#[derive(Parser, Debug)]
#[command(
    name = "chunkproof",
    version,
    about = "Split files into fixed-size segments and verify them with merkle proofs",
    long_about = "chunkproof splits files into fixed-size segments, records a merkle root over the \
                  segment digests and produces or verifies inclusion proofs for single segments."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Directory holding segments (overrides paths.segments_dir)
    #[arg(long, global = true, env = "CHUNKPROOF_SEGMENTS_DIR")]
    pub segments_dir: Option<PathBuf>,

    /// Segment size in bytes (overrides core.chunk_size)
    #[arg(long, global = true, allow_negative_numbers = true)]
    pub chunk_size: Option<i64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Split a file into segments and record its merkle root
    Split {
        /// File to split
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the stored root digest of a file
    Root {
        /// File identifier (the base name it was split from)
        file_id: String,
    },

    /// List chunked files
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate an inclusion proof for one segment
    Prove {
        /// File identifier
        file_id: String,

        /// Segment index
        index: usize,

        /// Write the proof to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Verify a segment inclusion proof
    Verify {
        /// Proof file (JSON)
        proof: PathBuf,

        /// Segment file to hash and use as the leaf
        #[arg(long)]
        segment: Option<PathBuf>,

        /// Trusted root digest (default: the locally stored root)
        #[arg(long)]
        root: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Concatenate a file's segments back into the original file
    Merge {
        /// File identifier
        file_id: String,

        /// Directory to read segments from (default: the segments directory)
        #[arg(long)]
        from: Option<PathBuf>,

        /// Output file (default: <downloads_dir>/merged/<file_id>)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Check segments against the stored root before merging
        #[arg(long)]
        verify: bool,

        /// Remove segments after merging
        #[arg(long)]
        cleanup: bool,
    },

    /// Delete a file's segments, root and manifest
    Delete {
        /// File identifier
        file_id: String,
    },

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show all configuration values
    Show,

    /// Print one configuration value
    Get {
        /// Key, e.g. core.chunk_size
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Key, e.g. core.chunk_size
        key: String,

        /// New value
        value: String,
    },
}

/// Dispatch a parsed command line
pub fn run(cli: Cli) -> anyhow::Result<()> {
    let ctx = CliContext::from_cli(&cli)?;

    match cli.command {
        Commands::Split { file, json } => commands::split::execute(&ctx, file, json),
        Commands::Root { file_id } => commands::root::execute(&ctx, file_id),
        Commands::List { json } => commands::list::execute(&ctx, json),
        Commands::Prove {
            file_id,
            index,
            output,
        } => commands::prove::execute(&ctx, file_id, index, output),
        Commands::Verify {
            proof,
            segment,
            root,
            json,
        } => commands::verify::execute(&ctx, proof, segment, root, json),
        Commands::Merge {
            file_id,
            from,
            output,
            verify,
            cleanup,
        } => commands::merge::execute(&ctx, file_id, from, output, verify, cleanup),
        Commands::Delete { file_id } => commands::delete::execute(&ctx, file_id),
        Commands::Config { action } => commands::config::execute(&ctx, action),
    }
}
