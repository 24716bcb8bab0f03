//! Grid layout and id assignment for the exported diagram.

use crate::schema::Table;
use ahash::AHashMap;

/// Horizontal distance between grid columns
pub const GRID_X_STEP: i64 = 500;
/// Tables per visual row before wrapping
pub const COLUMN_SIZE: usize = 4;
/// Height of one rendered field row (and of the title row)
pub const ROW_HEIGHT: i64 = 50;

/// A table annotated with its diagram id, grid position and field ids
#[derive(Debug, Clone)]
pub struct GraphicTable {
    /// Position in the ingested table sequence
    pub id: usize,
    pub x: i64,
    pub y: i64,
    /// Column name to field id (position within the table)
    pub fields: AHashMap<String, usize>,
}

/// Append-only index of graphic tables, populated strictly in ingestion
/// order so the layout recurrence only ever reads earlier entries.
#[derive(Debug, Default)]
pub struct GraphicIndex {
    entries: Vec<GraphicTable>,
    by_name: AHashMap<String, usize>,
}

impl GraphicIndex {
    /// Lay out and index all tables.
    pub fn build(tables: &[Table]) -> Self {
        let mut index = GraphicIndex::default();

        for (idx, table) in tables.iter().enumerate() {
            let y = index.next_y(tables, idx);
            let fields = table
                .columns
                .iter()
                .enumerate()
                .map(|(idc, c)| (c.name.clone(), idc))
                .collect();

            index.by_name.insert(table.name.clone(), index.entries.len());
            index.entries.push(GraphicTable {
                id: idx,
                x: GRID_X_STEP * (idx % COLUMN_SIZE) as i64,
                y,
                fields,
            });
        }

        index
    }

    /// Look up a graphic table by name.
    pub fn get(&self, name: &str) -> Option<&GraphicTable> {
        self.by_name.get(name).map(|&slot| &self.entries[slot])
    }

    /// All graphic tables in ingestion order.
    pub fn entries(&self) -> &[GraphicTable] {
        &self.entries
    }

    /// Vertical position for the table at `idx`.
    ///
    /// The first grid row sits at 0. Every later table stacks under the
    /// table `COLUMN_SIZE` positions earlier (same grid column, already
    /// indexed): one title row plus one row per column of that table,
    /// offset by its own y.
    fn next_y(&self, tables: &[Table], idx: usize) -> i64 {
        if idx < COLUMN_SIZE {
            return 0;
        }

        let prev = &self.entries[idx - COLUMN_SIZE];
        let prev_rows = tables[idx - COLUMN_SIZE].columns.len() as i64 + 1;
        ROW_HEIGHT * prev_rows + prev.y
    }
}
