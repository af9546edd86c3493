//! Column type and constraint resolution.
//!
//! The export reports every enum column as `USER-DEFINED` without naming the
//! enum, so the concrete type is recovered from the column name. The mapping
//! is a heuristic: any `USER-DEFINED` column whose name contains `status`
//! becomes `verification_status`, even when its real enum is another one
//! (e.g. `request_status`).

use crate::metadata::ColumnRecord;

const USER_DEFINED: &str = "USER-DEFINED";

pub const UUID_PRIMARY_KEY: &str = "PRIMARY KEY DEFAULT gen_random_uuid()";
pub const IDENTITY_PRIMARY_KEY: &str = "PRIMARY KEY GENERATED ALWAYS AS IDENTITY";
pub const DEFAULT_NOW: &str = "DEFAULT now()";

/// A column ready for emission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: String,
    pub resolved_type: String,
    pub extra_clause: Option<&'static str>,
}

impl ColumnSpec {
    /// Column definition as it appears inside `CREATE TABLE`
    pub fn definition(&self) -> String {
        match self.extra_clause {
            Some(clause) => format!("{} {} {}", self.name, self.resolved_type, clause),
            None => format!("{} {}", self.name, self.resolved_type),
        }
    }
}

/// A table with its resolved columns in export order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDefinition {
    pub name: String,
    pub columns: Vec<ColumnSpec>,
}

impl TableDefinition {
    pub fn new(name: &str, records: &[ColumnRecord]) -> Self {
        Self {
            name: name.to_string(),
            columns: records.iter().map(resolve_column).collect(),
        }
    }
}

/// Map a raw `data_type` to the SQL type to emit.
pub fn resolve_type(column_name: &str, data_type: &str) -> String {
    if data_type != USER_DEFINED {
        return data_type.to_string();
    }
    if column_name == "role" {
        "user_role".to_string()
    } else if column_name.contains("status") {
        "verification_status".to_string()
    } else {
        "text".to_string()
    }
}

/// The single primary-key or default clause for a column, if any.
pub fn extra_clause(column_name: &str, resolved_type: &str) -> Option<&'static str> {
    match column_name {
        "id" if resolved_type == "uuid" => Some(UUID_PRIMARY_KEY),
        "id" => Some(IDENTITY_PRIMARY_KEY),
        "created_at" | "updated_at" => Some(DEFAULT_NOW),
        _ => None,
    }
}

pub fn resolve_column(record: &ColumnRecord) -> ColumnSpec {
    let resolved_type = resolve_type(&record.column_name, &record.data_type);
    let extra_clause = extra_clause(&record.column_name, &resolved_type);
    ColumnSpec {
        name: record.column_name.clone(),
        resolved_type,
        extra_clause,
    }
}
