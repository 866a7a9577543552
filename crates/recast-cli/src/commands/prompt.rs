//! Prompt command - print the prompt that would be sent for a row.

use std::path::{Path, PathBuf};

use recast::Loader;

use super::{load_config, row_index};

pub fn run(
    file: PathBuf,
    row: usize,
    config: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config, None)?;
    let dataset = Loader::new().load_file(&file)?;
    let index = row_index(row, dataset.len())?;

    let builder = config.prompt_builder()?;
    let Some(current) = dataset.get(index) else {
        return Err(format!("Row {} not found", row).into());
    };
    println!("{}", builder.build_checked(index, current)?);

    Ok(())
}
