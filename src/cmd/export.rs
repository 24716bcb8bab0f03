//! Export command implementation.

use crate::artifacts::{Catalog, Manifest};
use crate::export::{self, ExportOptions};
use anyhow::{bail, Context, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Run the export command
pub fn run(
    manifest_path: PathBuf,
    catalog_path: PathBuf,
    algo: String,
    name: Option<String>,
    output_dir: PathBuf,
) -> Result<()> {
    if !manifest_path.exists() {
        bail!("manifest file does not exist: {}", manifest_path.display());
    }
    if !catalog_path.exists() {
        bail!("catalog file does not exist: {}", catalog_path.display());
    }

    let manifest: Manifest = read_artifact(&manifest_path)?;
    let catalog: Catalog = read_artifact(&catalog_path)?;

    let opts = ExportOptions {
        algo,
        output_file_name: name,
    };
    let (file_name, content) = export::run(&manifest, &catalog, &opts)?;

    fs::create_dir_all(&output_dir)
        .with_context(|| format!("failed to create output directory: {}", output_dir.display()))?;
    let out_path = output_dir.join(&file_name);
    fs::write(&out_path, content.as_bytes())
        .with_context(|| format!("failed to write: {}", out_path.display()))?;
    eprintln!("DDB written to: {}", out_path.display());

    print_summary(&content);
    Ok(())
}

/// Read and deserialize one artifact file
fn read_artifact<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read artifact: {}", path.display()))?;
    serde_json::from_str(&data).with_context(|| format!("failed to parse artifact: {}", path.display()))
}

/// Print table/relationship counts of the exported document
fn print_summary(content: &str) {
    if let Ok(doc) = serde_json::from_str::<Value>(content) {
        let tables = doc["tables"].as_array().map(|a| a.len()).unwrap_or(0);
        let relationships = doc["relationships"].as_array().map(|a| a.len()).unwrap_or(0);
        eprintln!("Diagram: {} tables, {} relationships", tables, relationships);
    }
}
