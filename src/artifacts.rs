//! Typed views over the dbt artifact files (`manifest.json`, `catalog.json`).
//!
//! Only the fields the ingestion strategies consume are modeled; everything
//! else in the artifacts is ignored during deserialization. Node maps are
//! `BTreeMap` so iteration order is deterministic regardless of the key order
//! in the source file.

use serde::Deserialize;
use std::collections::BTreeMap;

/// The dbt manifest artifact
#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    pub metadata: ManifestMetadata,
    /// All nodes keyed by unique id (models, seeds, tests, ...)
    #[serde(default)]
    pub nodes: BTreeMap<String, ManifestNode>,
}

/// Manifest-level metadata
#[derive(Debug, Clone, Deserialize)]
pub struct ManifestMetadata {
    /// Generation timestamp, carried verbatim into the output document
    pub generated_at: String,
}

/// A single manifest node.
///
/// Model, seed and test nodes all deserialize into this shape; fields a given
/// resource type does not carry default to empty.
#[derive(Debug, Clone, Deserialize)]
pub struct ManifestNode {
    pub resource_type: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Declared columns (documentation side; types live in the catalog)
    #[serde(default)]
    pub columns: BTreeMap<String, ManifestColumn>,
    #[serde(default)]
    pub depends_on: DependsOn,
    /// Present on generic test nodes only
    #[serde(default)]
    pub test_metadata: Option<TestMetadata>,
    #[serde(default)]
    pub meta: NodeMeta,
}

/// A column as declared in the manifest
#[derive(Debug, Clone, Deserialize)]
pub struct ManifestColumn {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub data_type: Option<String>,
}

/// Node dependencies (unique ids of referenced nodes)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DependsOn {
    #[serde(default)]
    pub nodes: Vec<String>,
}

/// Metadata attached to generic test nodes
#[derive(Debug, Clone, Deserialize)]
pub struct TestMetadata {
    pub name: String,
    #[serde(default)]
    pub kwargs: TestKwargs,
}

/// Keyword arguments of a generic test invocation
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TestKwargs {
    /// Referencing column (on the model under test)
    #[serde(default)]
    pub column_name: Option<String>,
    /// Referenced column (on the target model)
    #[serde(default)]
    pub field: Option<String>,
    /// Target reference, e.g. `ref('customers')`
    #[serde(default)]
    pub to: Option<String>,
}

/// Free-form node meta; only the relationship cardinality code is read
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NodeMeta {
    #[serde(default)]
    pub relationship_type: Option<String>,
}

/// The dbt catalog artifact
#[derive(Debug, Clone, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub nodes: BTreeMap<String, CatalogNode>,
}

/// A single catalog node (one materialized relation)
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogNode {
    #[serde(default)]
    pub columns: BTreeMap<String, CatalogColumn>,
}

/// A column as observed in the warehouse
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogColumn {
    pub name: String,
    #[serde(rename = "type")]
    pub col_type: String,
    /// 1-based physical position within the relation
    pub index: u32,
    #[serde(default)]
    pub comment: Option<String>,
}
