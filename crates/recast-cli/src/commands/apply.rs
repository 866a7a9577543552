//! Apply command - generate for one row, commit a candidate and export.

use std::path::{Path, PathBuf};

use chrono::Local;
use colored::Colorize;
use recast::{ExportFormat, Loader, ReviewSession, export};

use super::{build_provider, load_config, row_index};
use crate::cli::LlmArgs;

pub fn run(
    file: PathBuf,
    row: usize,
    candidate: usize,
    output: Option<PathBuf>,
    format: Option<ExportFormat>,
    llm: LlmArgs,
    config: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config, Some(&llm))?;
    let Some(provider) = build_provider(&llm.llm, &config.llm)? else {
        return Err("Apply needs an LLM provider (--llm)".into());
    };
    let generator = config.generator(provider)?;

    let dataset = Loader::new().load_file(&file)?;
    let mut session = ReviewSession::new(dataset)?;
    session.navigate(row_index(row, session.len())?)?;

    let outcome = session.generate(&generator)?;
    for failure in &outcome.failures {
        eprintln!(
            "{} call {} failed: {}",
            "Warning:".yellow(),
            failure.slot + 1,
            failure.message
        );
    }

    let available = outcome.candidates.len();
    let k = row_index(candidate, available).map_err(|_| {
        format!(
            "Candidate {} not generated ({} available)",
            candidate, available
        )
    })?;
    session.use_candidate(k)?;

    let format = format
        .or_else(|| output.as_deref().and_then(ExportFormat::from_path))
        .unwrap_or_default();
    let output_path = output.unwrap_or_else(|| {
        file.with_file_name(export::default_file_name(format, &Local::now()))
    });

    let updated = session.current_row().clone();
    export::write(session.dataset(), &output_path, format)?;

    println!(
        "{} row {} with candidate {}",
        "Applied".green().bold(),
        row,
        candidate
    );
    println!("  Question: {}", updated.question);
    if let Some(answer) = &updated.answer {
        println!("  Answer: {}", answer.green());
    }
    println!("Saved to {}", output_path.display().to_string().cyan());

    Ok(())
}
