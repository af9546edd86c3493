//! Grouping of column records into tables.

use crate::metadata::ColumnRecord;
use std::collections::BTreeMap;

/// Table name to its columns. Iteration is alphabetical by table name; each
/// column list keeps the order the columns appeared in the export.
pub type TableMap = BTreeMap<String, Vec<ColumnRecord>>;

pub fn assemble_tables(columns: &[ColumnRecord]) -> TableMap {
    let mut tables = TableMap::new();
    for column in columns {
        tables
            .entry(column.table_name.clone())
            .or_default()
            .push(column.clone());
    }
    tables
}
