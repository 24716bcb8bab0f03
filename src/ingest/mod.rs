//! Ingestion strategies: turn dbt artifacts into the table/relationship model.

mod test_relationship;

pub use test_relationship::TestRelationship;

use crate::artifacts::{Catalog, Manifest};
use crate::schema::{Relationship, Table};
use ahash::AHashMap;
use anyhow::{anyhow, Result};
use once_cell::sync::Lazy;

/// A named strategy for extracting tables and relationships from the dbt
/// artifacts.
///
/// Implementations must be pure with respect to their inputs: the returned
/// table order defines the ids and layout of the exported diagram, so it has
/// to be deterministic for identical artifacts.
pub trait IngestionStrategy: Sync + std::fmt::Debug {
    /// Extract `(tables, relationships)` from the artifacts. Parse failures
    /// are fatal to the export; no partial results.
    fn parse(&self, manifest: &Manifest, catalog: &Catalog) -> Result<(Vec<Table>, Vec<Relationship>)>;
}

static STRATEGIES: Lazy<AHashMap<&'static str, &'static dyn IngestionStrategy>> =
    Lazy::new(|| {
        let mut m: AHashMap<&'static str, &'static dyn IngestionStrategy> =
            AHashMap::new();
        m.insert("test_relationship", &TestRelationship);
        m
    });

/// Look up a strategy by name.
///
/// Unknown names fail immediately; there is no fallback strategy.
pub fn lookup(name: &str) -> Result<&'static dyn IngestionStrategy> {
    STRATEGIES.get(name).copied().ok_or_else(|| {
        anyhow!(
            "unknown ingestion strategy: {}. Valid options: {}",
            name,
            strategy_names().join(", ")
        )
    })
}

/// Names of all registered strategies, sorted for stable help/error text.
pub fn strategy_names() -> Vec<&'static str> {
    let mut names: Vec<_> = STRATEGIES.keys().copied().collect();
    names.sort_unstable();
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_strategy() {
        assert!(lookup("test_relationship").is_ok());
    }

    #[test]
    fn test_lookup_unknown_strategy() {
        let err = lookup("does_not_exist").unwrap_err();
        assert!(err.to_string().contains("unknown ingestion strategy"));
        assert!(err.to_string().contains("does_not_exist"));
    }

    #[test]
    fn test_strategy_names_sorted() {
        let names = strategy_names();
        assert!(names.contains(&"test_relationship"));
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }
}
