//! CLI argument parsing for gh-review.
//!
//! Uses clap derive macros; the command implementations live in `commands`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Parse pull request patches and markdown into JSON syntax trees.
///
/// Every input path may be `-` to read from stdin.
#[derive(Parser, Debug)]
#[command(name = "gh-review")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Config file to use instead of `.gh-review.toml` / the global config
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print single-line JSON instead of pretty-printed JSON
    #[arg(long, global = true)]
    pub compact: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for gh-review.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse a raw unified diff patch into hunks.
    Hunks {
        /// Patch text file
        patch: PathBuf,
    },

    /// Parse a changed-file entry from the GitHub API.
    ///
    /// With `--content`, the whole file is shown with deletions
    /// interleaved instead of only the changed hunks.
    File {
        /// JSON file holding one entry of the "list pull request files" response
        file: PathBuf,

        /// Current content of the file
        #[arg(long, value_name = "PATH")]
        content: Option<PathBuf>,
    },

    /// Parse a markdown document into blocks.
    Markdown {
        /// Markdown file
        document: PathBuf,
    },
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
