//! Mandolin CLI
//!
//! Runs the lute lint integration from the command line: a `lint`
//! subcommand for files on disk and an `lsp` subcommand starting the
//! language server over stdio.

mod cli;
mod commands;
mod output;

use std::process::ExitCode;

use clap::Parser;
use miette::Result;
use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries lint output or the LSP transport.
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(has_errors) => {
            if has_errors {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<bool> {
    match &cli.command {
        Commands::Lint {
            files,
            format,
            lute,
            rules,
        } => commands::run_lint(files, lute.as_deref(), rules.as_deref(), *format),
        Commands::Lsp => {
            commands::run_lsp()?;
            Ok(false)
        }
    }
}
