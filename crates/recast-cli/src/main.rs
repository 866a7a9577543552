//! Recast CLI - LLM-assisted quiz rewriting.

mod cli;
mod commands;
mod server;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.config.as_deref();
    let result = match cli.command {
        Commands::Inspect { file, search, json } => commands::inspect::run(file, search, json),

        Commands::Prompt { file, row } => commands::prompt::run(file, row, config),

        Commands::Generate { file, row, llm, json } => {
            commands::generate::run(file, row, llm, json, config)
        }

        Commands::Review { file, port, llm } => commands::review::run(file, port, llm, config),

        Commands::Apply {
            file,
            row,
            candidate,
            output,
            format,
            llm,
        } => commands::apply::run(file, row, candidate, output, format, llm, config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
