use anyhow::{Context, Result};
use porter_core::configs::build_file::build_file_schema_json;

pub fn execute() -> Result<()> {
    let json = build_file_schema_json().context("Failed to render build file schema")?;
    println!("{json}");
    Ok(())
}
