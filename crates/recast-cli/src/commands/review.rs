//! Review command - serve a review session over HTTP.

use std::path::{Path, PathBuf};

use chrono::Local;
use colored::Colorize;
use recast::{ExportFormat, Loader, ReviewSession, export};
use tracing::info;

use super::{build_provider, load_config};
use crate::cli::LlmArgs;
use crate::server::{app, state::AppState};

pub fn run(
    file: PathBuf,
    port: u16,
    llm: LlmArgs,
    config: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config, Some(&llm))?;
    let dataset = Loader::new().load_file(&file)?;
    let session = ReviewSession::new(dataset)?;

    let state = match build_provider(&llm.llm, &config.llm)? {
        Some(provider) => {
            AppState::with_generator(session, file.clone(), config.generator(provider)?)
        }
        None => {
            println!(
                "{} No LLM provider; generation is disabled.",
                "Note:".yellow()
            );
            AppState::new(session, file.clone())
        }
    };

    let url = format!("http://localhost:{}", port);
    println!();
    println!(
        "{} {}",
        "Starting review server at".cyan().bold(),
        url.white().bold()
    );
    println!();
    println!("  File: {}", file.display());
    if let Some(name) = &state.llm_provider_name {
        println!("  LLM: {}", name);
    }
    println!();
    println!("Press {} to stop the server", "Ctrl+C".yellow().bold());
    println!();

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        // Export committed work on Ctrl+C
        let state_clone = state.clone();
        tokio::spawn(async move {
            tokio::signal::ctrl_c().await.ok();
            println!();
            println!("{}", "Shutting down...".yellow());
            let session = state_clone.session.read().await;
            if session.is_dirty() {
                let path = state_clone
                    .source_path
                    .with_file_name(export::default_file_name(ExportFormat::Csv, &Local::now()));
                match export::write(session.dataset(), &path, ExportFormat::Csv) {
                    Ok(()) => {
                        info!(path = %path.display(), "exported on shutdown");
                        println!("Saved to {}", path.display());
                    }
                    Err(e) => eprintln!("Error saving: {}", e),
                }
            }
            std::process::exit(0);
        });

        if let Err(e) = app::run_server(state, port).await {
            eprintln!("Server error: {}", e);
        }
    });

    Ok(())
}
