//! The DrawDB document structure and its assembly.
//!
//! Field names and ordering mirror the `.ddb` JSON schema; renames are done
//! with serde attributes so the Rust side stays snake_case.

use crate::export::layout::GraphicIndex;
use crate::schema::{Cardinality, Relationship, Table};
use schemars::JsonSchema;
use serde::Serialize;

/// Author stamped into every exported document
pub const AUTHOR: &str = "drawdb-export";
/// Title used when no output file name is given
pub const DEFAULT_TITLE: &str = "Generated by drawdb-export";
/// DrawDB table header color
const TABLE_COLOR: &str = "#175e7a";
/// Referential action; the artifacts carry no constraint metadata
const CONSTRAINT_ACTION: &str = "No action";

/// Top-level `.ddb` document
#[derive(Debug, Serialize, JsonSchema)]
pub struct DrawDbDocument {
    pub author: String,
    pub title: String,
    pub date: String,
    pub tables: Vec<TableDescriptor>,
    pub relationships: Vec<RelationshipDescriptor>,
    /// Always empty; required by the DrawDB schema shape
    pub notes: Vec<serde_json::Value>,
    #[serde(rename = "subjectAreas")]
    pub subject_areas: Vec<serde_json::Value>,
    pub database: String,
    pub types: Vec<serde_json::Value>,
}

/// One table box in the diagram
#[derive(Debug, Serialize, JsonSchema)]
pub struct TableDescriptor {
    pub id: usize,
    pub name: String,
    pub x: i64,
    pub y: i64,
    pub comment: Option<String>,
    pub indices: Vec<serde_json::Value>,
    pub color: String,
    pub fields: Vec<FieldDescriptor>,
}

/// One field row inside a table box.
///
/// The constraint flags are fixed to false: the ingested model carries no
/// primary-key/uniqueness/nullability metadata to derive them from.
#[derive(Debug, Serialize, JsonSchema)]
pub struct FieldDescriptor {
    pub id: usize,
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    pub default: String,
    pub check: String,
    pub primary: bool,
    pub unique: bool,
    #[serde(rename = "notNull")]
    pub not_null: bool,
    pub increment: bool,
    pub comment: Option<String>,
}

/// One relationship edge.
///
/// Endpoint ids are optional: a relationship naming a table or column absent
/// from the ingested set serializes with null ids rather than failing the
/// export.
#[derive(Debug, Serialize, JsonSchema)]
pub struct RelationshipDescriptor {
    pub id: usize,
    pub name: String,
    pub cardinality: String,
    #[serde(rename = "startTableId")]
    pub start_table_id: Option<usize>,
    #[serde(rename = "endTableId")]
    pub end_table_id: Option<usize>,
    #[serde(rename = "startFieldId")]
    pub start_field_id: Option<usize>,
    #[serde(rename = "endFieldId")]
    pub end_field_id: Option<usize>,
    #[serde(rename = "updateConstraint")]
    pub update_constraint: String,
    #[serde(rename = "deleteConstraint")]
    pub delete_constraint: String,
}

/// Assemble the full document from the ingested model and the graphic index.
pub fn build_document(
    tables: &[Table],
    relationships: &[Relationship],
    index: &GraphicIndex,
    title: &str,
    date: &str,
) -> DrawDbDocument {
    let table_descriptors = tables
        .iter()
        .zip(index.entries())
        .map(|(table, graphic)| TableDescriptor {
            id: graphic.id,
            name: table.name.clone(),
            x: graphic.x,
            y: graphic.y,
            comment: table.description.clone(),
            indices: Vec::new(),
            color: TABLE_COLOR.to_string(),
            fields: table
                .columns
                .iter()
                .enumerate()
                .map(|(idc, col)| FieldDescriptor {
                    id: idc,
                    name: col.name.clone(),
                    field_type: col.data_type.clone(),
                    default: String::new(),
                    check: String::new(),
                    primary: false,
                    unique: false,
                    not_null: false,
                    increment: false,
                    comment: col.description.clone(),
                })
                .collect(),
        })
        .collect();

    let relationship_descriptors = relationships
        .iter()
        .enumerate()
        .map(|(idx, rel)| build_relationship(idx, rel, index))
        .collect();

    DrawDbDocument {
        author: AUTHOR.to_string(),
        title: title.to_string(),
        date: date.to_string(),
        tables: table_descriptors,
        relationships: relationship_descriptors,
        notes: Vec::new(),
        subject_areas: Vec::new(),
        database: "generic".to_string(),
        types: Vec::new(),
    }
}

/// Resolve one relationship into a descriptor.
///
/// "from" is the referencing side (`table_map[1]`), "to" the referenced side
/// (`table_map[0]`). The display name puts the referenced table first while
/// taking the column from the referencing side; DrawDB files in the wild use
/// exactly this convention, so it is kept as is.
fn build_relationship(idx: usize, rel: &Relationship, index: &GraphicIndex) -> RelationshipDescriptor {
    let [to_table, from_table] = &rel.table_map;
    let [to_column, from_column] = &rel.column_map;

    let start = index.get(from_table);
    let end = index.get(to_table);

    RelationshipDescriptor {
        id: idx,
        name: format!("fk__{to_table}_{from_table}__{from_column}"),
        cardinality: Cardinality::from_code(&rel.rel_type).as_label().to_string(),
        start_table_id: start.map(|g| g.id),
        end_table_id: end.map(|g| g.id),
        start_field_id: start.and_then(|g| g.fields.get(from_column).copied()),
        end_field_id: end.and_then(|g| g.fields.get(to_column).copied()),
        update_constraint: CONSTRAINT_ACTION.to_string(),
        delete_constraint: CONSTRAINT_ACTION.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Column;

    fn table(name: &str, columns: &[&str]) -> Table {
        Table {
            name: name.to_string(),
            description: None,
            columns: columns
                .iter()
                .map(|c| Column {
                    name: c.to_string(),
                    data_type: "integer".to_string(),
                    description: None,
                })
                .collect(),
        }
    }

    fn rel(to: &str, from: &str, to_col: &str, from_col: &str, code: &str) -> Relationship {
        Relationship {
            table_map: [to.to_string(), from.to_string()],
            column_map: [to_col.to_string(), from_col.to_string()],
            rel_type: code.to_string(),
        }
    }

    fn build(tables: &[Table], relationships: &[Relationship]) -> DrawDbDocument {
        let index = GraphicIndex::build(tables);
        build_document(tables, relationships, &index, DEFAULT_TITLE, "2024-06-01")
    }

    #[test]
    fn test_table_ids_are_positions() {
        let tables = vec![table("a", &["x"]), table("b", &["x", "y"]), table("c", &[])];
        let doc = build(&tables, &[]);

        assert_eq!(doc.tables.len(), 3);
        for (i, t) in doc.tables.iter().enumerate() {
            assert_eq!(t.id, i);
        }
        assert_eq!(doc.tables[1].fields.len(), 2);
        assert_eq!(doc.tables[1].fields[1].id, 1);
    }

    #[test]
    fn test_relationship_name_convention() {
        let tables = vec![table("customers", &["id"]), table("orders", &["id", "customer_id"])];
        let rels = vec![rel("orders", "customers", "id", "customer_id", "")];
        let doc = build(&tables, &rels);

        assert_eq!(doc.relationships[0].name, "fk__orders_customers__customer_id");
    }

    #[test]
    fn test_relationship_endpoints() {
        let tables = vec![table("customers", &["id", "name"]), table("orders", &["id", "customer_id"])];
        let rels = vec![rel("customers", "orders", "id", "customer_id", "0n")];
        let doc = build(&tables, &rels);

        let r = &doc.relationships[0];
        // start = referencing side (orders), end = referenced side (customers)
        assert_eq!(r.start_table_id, Some(1));
        assert_eq!(r.end_table_id, Some(0));
        assert_eq!(r.start_field_id, Some(1));
        assert_eq!(r.end_field_id, Some(0));
        assert_eq!(r.cardinality, "One to many");
        assert_eq!(r.update_constraint, "No action");
        assert_eq!(r.delete_constraint, "No action");
    }

    #[test]
    fn test_missing_endpoint_yields_nulls() {
        let tables = vec![table("orders", &["id", "customer_id"])];
        let rels = vec![rel("customers", "orders", "id", "customer_id", "")];
        let doc = build(&tables, &rels);

        let r = &doc.relationships[0];
        assert_eq!(r.start_table_id, Some(0));
        assert_eq!(r.start_field_id, Some(1));
        assert_eq!(r.end_table_id, None);
        assert_eq!(r.end_field_id, None);

        let json = serde_json::to_string(&doc).unwrap();
        assert!(json.contains("\"endTableId\":null"));
    }

    #[test]
    fn test_missing_column_yields_null_field_id() {
        let tables = vec![table("customers", &["id"]), table("orders", &["id"])];
        let rels = vec![rel("customers", "orders", "id", "customer_id", "")];
        let doc = build(&tables, &rels);

        let r = &doc.relationships[0];
        assert_eq!(r.start_table_id, Some(1));
        assert_eq!(r.start_field_id, None);
        assert_eq!(r.end_field_id, Some(0));
    }

    #[test]
    fn test_document_constants() {
        let doc = build(&[table("a", &["x"])], &[]);
        assert_eq!(doc.author, "drawdb-export");
        assert_eq!(doc.database, "generic");
        assert_eq!(doc.tables[0].color, "#175e7a");
        assert!(doc.notes.is_empty());
        assert!(doc.subject_areas.is_empty());
        assert!(doc.types.is_empty());

        let f = &doc.tables[0].fields[0];
        assert!(!f.primary && !f.unique && !f.not_null && !f.increment);
        assert_eq!(f.default, "");
        assert_eq!(f.check, "");
    }

    #[test]
    fn test_serialized_key_names() {
        let tables = vec![table("customers", &["id"]), table("orders", &["customer_id"])];
        let rels = vec![rel("customers", "orders", "id", "customer_id", "nn")];
        let json = serde_json::to_string(&build(&tables, &rels)).unwrap();

        for key in [
            "\"subjectAreas\"",
            "\"startTableId\"",
            "\"endTableId\"",
            "\"startFieldId\"",
            "\"endFieldId\"",
            "\"updateConstraint\"",
            "\"deleteConstraint\"",
            "\"notNull\"",
            "\"type\"",
        ] {
            assert!(json.contains(key), "missing key {key}");
        }
        assert!(json.contains("\"cardinality\":\"Many to many\""));
    }
}
