//! Ingested schema model shared between ingestion strategies and the exporter.

/// A column of an ingested table
#[derive(Debug, Clone)]
pub struct Column {
    /// Column name, unique within its table
    pub name: String,
    /// Data type as reported by the catalog (display string)
    pub data_type: String,
    /// Optional column description
    pub description: Option<String>,
}

/// A table of the ingested model
#[derive(Debug, Clone)]
pub struct Table {
    /// Table name, unique within one export
    pub name: String,
    /// Optional table description
    pub description: Option<String>,
    /// All columns in declared order
    pub columns: Vec<Column>,
}

/// A foreign-key style link between two tables.
///
/// Index 0 of both maps is the referenced ("to") side, index 1 the
/// referencing ("from") side.
#[derive(Debug, Clone)]
pub struct Relationship {
    /// [referenced table, referencing table]
    pub table_map: [String; 2],
    /// [referenced column, referencing column]
    pub column_map: [String; 2],
    /// Cardinality code: `01`, `11`, `0n`, `1n`, `nn`; anything else
    /// (including empty) means many-to-one
    pub rel_type: String,
}

/// Relationship cardinality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cardinality {
    #[default]
    ManyToOne, // Most common: child has FK to parent
    OneToOne,
    OneToMany,
    ManyToMany,
}

impl Cardinality {
    /// Map a cardinality code to its variant. Unrecognized codes fall back
    /// to many-to-one.
    pub fn from_code(code: &str) -> Self {
        match code {
            "01" | "11" => Cardinality::OneToOne,
            "0n" | "1n" => Cardinality::OneToMany,
            "nn" => Cardinality::ManyToMany,
            _ => Cardinality::ManyToOne,
        }
    }

    /// DrawDB cardinality label
    pub fn as_label(self) -> &'static str {
        match self {
            Cardinality::ManyToOne => "Many to one",
            Cardinality::OneToOne => "One to one",
            Cardinality::OneToMany => "One to many",
            Cardinality::ManyToMany => "Many to many",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cardinality_codes() {
        assert_eq!(Cardinality::from_code("01"), Cardinality::OneToOne);
        assert_eq!(Cardinality::from_code("11"), Cardinality::OneToOne);
        assert_eq!(Cardinality::from_code("0n"), Cardinality::OneToMany);
        assert_eq!(Cardinality::from_code("1n"), Cardinality::OneToMany);
        assert_eq!(Cardinality::from_code("nn"), Cardinality::ManyToMany);
        assert_eq!(Cardinality::from_code("n1"), Cardinality::ManyToOne);
        assert_eq!(Cardinality::from_code(""), Cardinality::ManyToOne);
    }

    #[test]
    fn test_cardinality_labels() {
        assert_eq!(Cardinality::from_code("01").as_label(), "One to one");
        assert_eq!(Cardinality::from_code("1n").as_label(), "One to many");
        assert_eq!(Cardinality::from_code("nn").as_label(), "Many to many");
        assert_eq!(Cardinality::from_code("").as_label(), "Many to one");
    }
}
