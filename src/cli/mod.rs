//! CLI argument definitions and parsing.

pub mod types;

use clap::{Args, Parser, Subcommand};
use types::Username;

use crate::contests::Platform;

/// Arguments shared by the single-user commands
#[derive(Debug, Args)]
pub struct UserArgs {
    /// CodeChef handle.
    #[clap(long, short)]
    pub username: Username,

    /// Output results as JSON instead of text lines.
    #[clap(long)]
    pub json: bool,
}

#[derive(Debug, Subcommand)]
pub enum GetCmd {
    /// Rating, stars, ranks and problems solved from a CodeChef profile page.
    Profile {
        #[clap(flatten)]
        user: UserArgs,
    },

    /// Daily submission counts. Prints an empty heatmap rather than failing.
    Heatmap {
        #[clap(flatten)]
        user: UserArgs,
    },

    /// Rated-contest history with best rank and highest rating.
    ContestGraph {
        #[clap(flatten)]
        user: UserArgs,
    },

    /// Summary over profile, heatmap and contest history.
    ///
    /// Repeat `-u` to analyze several users; each one succeeds or fails on its own.
    Analysis {
        /// CodeChef handle (repeatable): `-u alice -u bob`.
        #[clap(long = "username", short = 'u', required = true)]
        usernames: Vec<Username>,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Contest calendar across Codeforces, CodeChef and LeetCode.
    ///
    /// Fails as a whole if any platform cannot be reached.
    Contests {
        /// Only contests that have not finished yet.
        #[clap(long)]
        upcoming: bool,

        /// Keep only these platforms (repeatable): `-p codeforces -p leetcode`.
        #[clap(short = 'p', long = "platform")]
        platforms: Option<Vec<Platform>>,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },
}

#[derive(Debug, Parser)]
#[clap(name = "cp-tracker", about = "Competitive programming profile and contest tracker")]
pub struct CpTracker {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Get profile or contest data
    Get {
        #[clap(subcommand)]
        cmd: GetCmd,
    },
}
