//! CLI argument definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Mandolin - editor integration for the lute linter
#[derive(Parser)]
#[command(name = "mandolin")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Lint files with the resolved lute executable
    Lint {
        /// Files to lint
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Linter executable to use instead of the resolved toolchain
        #[arg(long)]
        lute: Option<PathBuf>,

        /// Custom rule-config file, absolute or relative to the working
        /// directory
        #[arg(short, long)]
        rules: Option<String>,
    },

    /// Start the LSP server over stdio
    Lsp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
