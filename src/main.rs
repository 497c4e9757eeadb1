//! Megaverse CLI - reconcile a candidate's map with its goal.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod cli;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

/// Megaverse - drive a remote astral-object map to its goal state
#[derive(Parser, Debug)]
#[command(name = "megaverse")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(flatten)]
    service: cli::ServiceArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Clear the map, then create every goal object
    Run {
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Show a progress bar while mutations run
        #[arg(short, long)]
        progress: bool,
    },

    /// Fetch both states and list the calls a run would issue
    Plan {
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },

    /// Render the current map or the goal as text
    Show {
        /// Which state to render
        #[arg(default_value = "map")]
        target: cli::ShowTarget,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let result = match args.command {
        Commands::Run { format, progress } => cli::run::execute(&args.service, format, progress),
        Commands::Plan { format } => cli::plan::execute(&args.service, format),
        Commands::Show { target } => cli::show::execute(&args.service, target),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
