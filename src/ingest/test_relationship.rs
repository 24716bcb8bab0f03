//! Default ingestion strategy: models plus `relationships` test nodes.

use crate::artifacts::{Catalog, Manifest};
use crate::ingest::IngestionStrategy;
use crate::schema::{Column, Relationship, Table};
use anyhow::Result;

/// Extracts tables from manifest model/seed nodes joined with catalog
/// columns, and relationships from dbt `relationships` generic tests.
#[derive(Debug)]
pub struct TestRelationship;

impl IngestionStrategy for TestRelationship {
    fn parse(
        &self,
        manifest: &Manifest,
        catalog: &Catalog,
    ) -> Result<(Vec<Table>, Vec<Relationship>)> {
        Ok((parse_tables(manifest, catalog), parse_relationships(manifest)))
    }
}

/// Build tables in unique-id order. Column order and types come from the
/// catalog; descriptions prefer the manifest over catalog comments. Models
/// missing from the catalog (not yet materialized) fall back to their
/// manifest column list.
fn parse_tables(manifest: &Manifest, catalog: &Catalog) -> Vec<Table> {
    let mut tables = Vec::new();

    for (unique_id, node) in &manifest.nodes {
        if node.resource_type != "model" && node.resource_type != "seed" {
            continue;
        }

        let columns = match catalog.nodes.get(unique_id) {
            Some(cat_node) => {
                let mut cols: Vec<_> = cat_node.columns.values().collect();
                cols.sort_by_key(|c| c.index);
                cols.iter()
                    .map(|c| Column {
                        name: c.name.clone(),
                        data_type: c.col_type.clone(),
                        description: node
                            .columns
                            .get(&c.name)
                            .and_then(|mc| mc.description.clone())
                            .or_else(|| c.comment.clone()),
                    })
                    .collect()
            }
            None => node
                .columns
                .values()
                .map(|c| Column {
                    name: c.name.clone(),
                    data_type: c.data_type.clone().unwrap_or_else(|| "unknown".to_string()),
                    description: c.description.clone(),
                })
                .collect(),
        };

        tables.push(Table {
            name: node.name.clone(),
            description: node.description.clone(),
            columns,
        });
    }

    tables
}

/// Build relationships from `relationships` test nodes, in unique-id order.
/// Test nodes missing any of the required kwargs or without exactly two
/// dependencies are skipped.
fn parse_relationships(manifest: &Manifest) -> Vec<Relationship> {
    let mut relationships = Vec::new();

    for node in manifest.nodes.values() {
        let Some(meta) = &node.test_metadata else {
            continue;
        };
        if meta.name != "relationships" {
            continue;
        }

        let (Some(column_name), Some(field), Some(to)) = (
            meta.kwargs.column_name.as_deref(),
            meta.kwargs.field.as_deref(),
            meta.kwargs.to.as_deref(),
        ) else {
            continue;
        };
        if node.depends_on.nodes.len() != 2 {
            continue;
        }

        let to_name = ref_target(to);
        let dep_names: Vec<String> = node
            .depends_on
            .nodes
            .iter()
            .map(|id| resolve_node_name(manifest, id))
            .collect();

        // The dependency matching `to` is the referenced side; the other is
        // the model under test. Without a match, keep dependency order.
        let (to_table, from_table) = if dep_names[1] == to_name {
            (dep_names[1].clone(), dep_names[0].clone())
        } else {
            (dep_names[0].clone(), dep_names[1].clone())
        };

        relationships.push(Relationship {
            table_map: [to_table, from_table],
            column_map: [field.to_string(), column_name.to_string()],
            rel_type: node
                .meta
                .relationship_type
                .clone()
                .unwrap_or_default(),
        });
    }

    relationships
}

/// Resolve a unique id to its node name, falling back to the last id segment
/// for nodes absent from the manifest.
fn resolve_node_name(manifest: &Manifest, unique_id: &str) -> String {
    match manifest.nodes.get(unique_id) {
        Some(node) => node.name.clone(),
        None => unique_id.rsplit('.').next().unwrap_or(unique_id).to_string(),
    }
}

/// Extract the model name out of a `ref('name')` / `ref("name")` expression.
/// Anything unparseable is returned as-is.
fn ref_target(expr: &str) -> String {
    let inner = expr
        .trim()
        .strip_prefix("ref(")
        .and_then(|s| s.strip_suffix(')'))
        .unwrap_or(expr);
    inner.trim().trim_matches(|c| c == '\'' || c == '"').to_string()
}
