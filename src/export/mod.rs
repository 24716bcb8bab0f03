//! The Exporter: dbt artifacts in, DrawDB file name and JSON text out.
//!
//! A single synchronous pass with no state outliving the call. File writing
//! is the caller's job; this module only produces the bytes.

pub mod document;
pub mod layout;

use crate::artifacts::{Catalog, Manifest};
use crate::export::layout::GraphicIndex;
use crate::ingest;
use anyhow::Result;

/// File name used when the caller does not pick one
pub const DEFAULT_OUTPUT_FILE: &str = "output.ddb";

/// Options recognized by the exporter
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    /// Name of the ingestion strategy to run (required)
    pub algo: String,
    /// Output file name; doubles as the diagram title when set
    pub output_file_name: Option<String>,
}

/// Run one export. Returns the output file name and the serialized `.ddb`
/// document.
pub fn run(manifest: &Manifest, catalog: &Catalog, opts: &ExportOptions) -> Result<(String, String)> {
    let strategy = ingest::lookup(&opts.algo)?;
    let (tables, relationships) = strategy.parse(manifest, catalog)?;

    let index = GraphicIndex::build(&tables);
    let title = opts
        .output_file_name
        .as_deref()
        .unwrap_or(document::DEFAULT_TITLE);
    let doc = document::build_document(
        &tables,
        &relationships,
        &index,
        title,
        &manifest.metadata.generated_at,
    );

    let file_name = opts
        .output_file_name
        .clone()
        .unwrap_or_else(|| DEFAULT_OUTPUT_FILE.to_string());
    Ok((file_name, serde_json::to_string(&doc)?))
}
