use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tubeprep")]
#[command(author, version, about = "Normalize downloaded videos for media library import")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert every video in a directory to the normalized layout
    Convert {
        /// Directory to convert
        #[arg(required = true)]
        dir: PathBuf,

        /// Skip the confirmation prompts
        #[arg(short, long)]
        yes: bool,

        /// Show what would be done without executing
        #[arg(long)]
        dry_run: bool,
    },

    /// Group the files in a directory by video and classify them
    Scan {
        /// Directory to scan
        #[arg(required = true)]
        dir: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Report videos that are not ready for import
    Check {
        /// Directory to check
        #[arg(required = true)]
        dir: PathBuf,
    },

    /// Check that every media file in a directory can be decoded
    Validate {
        /// Directory to validate
        #[arg(required = true)]
        dir: PathBuf,
    },

    /// Probe a media file and display its streams
    Probe {
        /// File to probe
        #[arg(required = true)]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check that required external tools are available
    CheckTools,

    /// Display version information
    Version,
}
