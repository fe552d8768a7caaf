//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Conference schedule timeline.
///
/// Normalizes a conference schedule feed into location lanes and shows
/// which sessions are running now.
#[derive(Debug, Parser)]
#[command(name = "sched", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Feed URL or file, overriding the configured one.
    #[arg(long, global = true)]
    pub feed: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List locations in timeline order.
    Groups,

    /// List track filter options.
    Tracks,

    /// Show every session with its current display class.
    Show {
        /// Track to highlight ("all" for none).
        #[arg(long, default_value = "all")]
        track: String,

        /// Evaluate at this time instead of now (ISO 8601 or e.g. "2 hours ago").
        #[arg(long)]
        at: Option<String>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show the details of one session.
    Details {
        /// Session id.
        id: String,
    },

    /// Follow the schedule live, printing class changes as they happen.
    ///
    /// Type a track name (or "all") and press enter to change the filter.
    Watch {
        /// Initial track to highlight ("all" for none).
        #[arg(long, default_value = "all")]
        track: String,
    },
}
