//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueHint};

/// Topic hierarchy exporter: flattens keyword-research hierarchies into fixed-depth CSV
#[derive(Parser, Debug)]
#[command(name = "hierflat")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Project directory for local config (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub project_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Input document shared by all hierarchy commands.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Hierarchy JSON (bare node, LLM result or stored request); `-` reads stdin
    #[arg(value_hint = ValueHint::FilePath)]
    pub input: PathBuf,

    /// Default missing names and non-list children instead of failing
    #[arg(long)]
    pub lenient: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export hierarchy as CSV file
    Export {
        #[command(flatten)]
        input: InputArgs,

        /// Output directory (file named <prefix>-<date>-<time>.csv)
        #[arg(short, long, conflicts_with_all = ["file", "stdout"], value_hint = ValueHint::DirPath)]
        output_dir: Option<PathBuf>,

        /// Exact output file
        #[arg(short, long, conflicts_with = "stdout", value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,

        /// Write CSV to stdout instead of a file
        #[arg(long)]
        stdout: bool,

        /// Do not prepend a byte-order mark
        #[arg(long)]
        no_bom: bool,
    },

    /// Print flattened rows as CSV
    Rows {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Show hierarchy as tree
    Tree {
        #[command(flatten)]
        input: InputArgs,

        /// Show node values
        #[arg(long)]
        values: bool,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Show config paths
    Path,

    /// Create config template
    Init {
        /// Create global config
        #[arg(short, long)]
        global: bool,

        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },
}
