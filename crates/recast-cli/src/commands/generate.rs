//! Generate command - produce candidate rewrites for one row.

use std::path::{Path, PathBuf};

use colored::Colorize;
use recast::{GenerationOutcome, Loader};

use super::{build_provider, load_config, row_index};
use crate::cli::LlmArgs;

pub fn run(
    file: PathBuf,
    row: usize,
    llm: LlmArgs,
    json: bool,
    config: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config, Some(&llm))?;
    let Some(provider) = build_provider(&llm.llm, &config.llm)? else {
        return Err("Generation needs an LLM provider (--llm)".into());
    };
    let generator = config.generator(provider)?;

    let dataset = Loader::new().load_file(&file)?;
    let index = row_index(row, dataset.len())?;
    let Some(current) = dataset.get(index) else {
        return Err(format!("Row {} not found", row).into());
    };

    if !json {
        println!(
            "{} row {} with {} ({} calls)",
            "Generating".cyan().bold(),
            row,
            generator.provider().name(),
            generator.fan_out()
        );
        println!("  Question: {}", current.question);
        println!();
    }

    let outcome = generator.generate(index, current)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print_outcome(&outcome);
    }

    Ok(())
}

fn print_outcome(outcome: &GenerationOutcome) {
    for (k, candidate) in outcome.candidates.iter().enumerate() {
        println!("{}", format!("Candidate {}", k + 1).white().bold());
        println!("  {}", candidate.question);
        let answer = candidate.resolve_answer();
        for option in candidate.option_texts() {
            if !answer.is_empty() && option == answer {
                println!("    {} {}", "*".green().bold(), option.green());
            } else {
                println!("      {}", option);
            }
        }
        if answer.is_empty() {
            println!(
                "  {} answer \"{}\" matches no option",
                "Warning:".yellow(),
                candidate.answer_selector
            );
        }
        if !candidate.explanation.is_empty() {
            println!("  {} {}", "Explanation:".dimmed(), candidate.explanation);
        }
        if !candidate.citations.is_empty() {
            println!("  {} {}", "Citations:".dimmed(), candidate.citations);
        }
        println!();
    }

    for failure in &outcome.failures {
        println!(
            "{} call {} failed: {}",
            "Warning:".yellow().bold(),
            failure.slot + 1,
            failure.message
        );
    }
}
