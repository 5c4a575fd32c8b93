//! Command-line argument definitions and parsing
//!
//! Values given here take precedence over `tagmatter.toml`, which in turn
//! takes precedence over the built-in defaults.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Main CLI application
#[derive(Parser)]
#[command(
    name = "tagmatter",
    version,
    about = "Tag markdown solution notes by merging suggested tags into their front matter",
    long_about = "tagmatter asks a suggestion service for topic tags describing the solution \
                  code in each note, merges them into the note's YAML `tags:` list without \
                  touching anything else, and keeps a shared vocabulary of known tags."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Configuration file (default: ./tagmatter.toml if present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Suggest and merge tags for solution notes
    Tag(TagArgs),
    /// Merge the given tags into notes without asking for suggestions
    Apply(ApplyArgs),
    /// List notes that have not been tagged yet
    Pending(PendingArgs),
    /// Print the known-tag vocabulary
    Vocab(VocabArgs),
}

/// Where the notes and the stores live
#[derive(Args, Debug, Clone)]
pub struct CorpusOptions {
    /// Directory holding the problem notes
    #[arg(long, env = "LEETCODE_PROBLEM_DIR", value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// JSON file with the known-tag vocabulary
    #[arg(long, value_name = "FILE")]
    pub vocabulary: Option<PathBuf>,

    /// JSON file with the names of processed notes
    #[arg(long, value_name = "FILE")]
    pub processed: Option<PathBuf>,
}

/// Arguments for the tag command
#[derive(Args, Debug)]
pub struct TagArgs {
    #[command(flatten)]
    pub corpus: CorpusOptions,

    /// Notes or directories to tag; processed notes are tagged again
    pub files: Vec<PathBuf>,

    /// Tag every pending note instead of choosing one
    #[arg(long, conflicts_with = "files")]
    pub all: bool,

    /// Include notes that were already processed
    #[arg(long)]
    pub regenerate: bool,

    /// Preview changes without modifying files (show diff)
    #[arg(long)]
    pub dry_run: bool,

    /// Only fenced code blocks in this language count as the solution
    #[arg(long, value_name = "LANG")]
    pub language: Option<String>,

    /// API key for the suggestion service
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Model to ask for suggestions
    #[arg(long)]
    pub model: Option<String>,
}

/// Arguments for the apply command
#[derive(Args, Debug)]
pub struct ApplyArgs {
    #[command(flatten)]
    pub corpus: CorpusOptions,

    /// Tag to merge (can be repeated)
    #[arg(short, long = "tag", value_name = "TAG", required = true)]
    pub tags: Vec<String>,

    /// Notes or directories to update
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Preview changes without modifying files (show diff)
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the pending command
#[derive(Args, Debug)]
pub struct PendingArgs {
    #[command(flatten)]
    pub corpus: CorpusOptions,
}

/// Arguments for the vocab command
#[derive(Args, Debug)]
pub struct VocabArgs {
    #[command(flatten)]
    pub corpus: CorpusOptions,

    /// Print the vocabulary as a JSON array
    #[arg(long)]
    pub json: bool,
}
