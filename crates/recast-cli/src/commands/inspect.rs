//! Inspect command - load a quiz file and list its rows.

use std::path::PathBuf;

use colored::Colorize;
use recast::Loader;

pub fn run(
    file: PathBuf,
    search: Option<String>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let dataset = Loader::new().load_file(&file)?;
    let matches = dataset.search(search.as_deref().unwrap_or(""));

    if json {
        let rows: Vec<_> = matches
            .iter()
            .filter_map(|&i| {
                dataset
                    .get(i)
                    .map(|row| serde_json::json!({ "row": i + 1, "data": row }))
            })
            .collect();
        let output = serde_json::json!({
            "source": dataset.source(),
            "columns": dataset.columns(),
            "total": dataset.len(),
            "rows": rows,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if let Some(source) = dataset.source() {
        println!(
            "{} {} ({}, {}, {} bytes)",
            "Loaded".cyan().bold(),
            source.file.white().bold(),
            source.format,
            source.encoding,
            source.size_bytes
        );
    }
    println!("  Rows: {}", dataset.len());
    println!("  Columns: {}", dataset.columns().join(", "));
    if let Some(term) = &search {
        println!("  Matching \"{}\": {}", term, matches.len());
    }
    println!();

    for &i in &matches {
        let Some(row) = dataset.get(i) else { continue };
        let number = format!("{:>4}", i + 1);
        let marker = if row.is_complete() {
            number.dimmed()
        } else {
            number.yellow()
        };
        println!(
            "{} [{} / {}] {}",
            marker,
            row.state.cyan(),
            row.attribute,
            row.question
        );

        let missing = row.missing_fields();
        if !missing.is_empty() {
            println!("       {} missing {}", "Warning:".yellow(), missing.join(", "));
        }
    }

    Ok(())
}
