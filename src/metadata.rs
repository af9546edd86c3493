//! Information-schema records and their JSON decoding.

use crate::error::{GenerateError, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// One row of `information_schema.columns`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ColumnRecord {
    pub table_name: String,
    pub column_name: String,
    pub data_type: String,
}

/// One foreign-key relationship, flattened to a single column pair
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ForeignKeyRecord {
    pub table_name: String,
    pub column_name: String,
    pub foreign_table_name: String,
    pub foreign_column_name: String,
}

/// One trigger as reported by `information_schema.triggers`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TriggerRecord {
    pub trigger_name: String,
    pub table_name: String,
    pub event: String,
    pub timing: String,
    pub action: String,
}

/// The three parsed record sequences, in source order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    pub columns: Vec<ColumnRecord>,
    pub foreign_keys: Vec<ForeignKeyRecord>,
    pub triggers: Vec<TriggerRecord>,
}

/// Restore the brackets consumed by the split and decode all three arrays.
pub fn parse_metadata(parts: [&str; 3]) -> Result<Metadata> {
    let [columns, foreign_keys, triggers] = parts;

    let columns = decode("columns", &format!("{}]", columns))?;
    let foreign_keys = decode("foreign keys", &format!("[{}]", foreign_keys))?;
    let triggers = decode("triggers", &repair_trailing(triggers))?;

    Ok(Metadata {
        columns,
        foreign_keys,
        triggers,
    })
}

/// The last array keeps its closing bracket but may carry a stray `.` after it.
fn repair_trailing(part: &str) -> String {
    let trimmed = part.trim().trim_end_matches('.').trim_end();
    if trimmed.ends_with(']') {
        format!("[{}", trimmed)
    } else {
        format!("[{}]", trimmed)
    }
}

fn decode<T: DeserializeOwned>(section: &'static str, json: &str) -> Result<Vec<T>> {
    serde_json::from_str(json).map_err(|source| GenerateError::Parse { section, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_restores_boundaries() {
        let parts = [
            r#"[{"table_name":"users","column_name":"id","data_type":"uuid"}"#,
            r#"{"table_name":"jobs","column_name":"user_id","foreign_table_name":"users","foreign_column_name":"id"}"#,
            r#"{"trigger_name":"t","table_name":"jobs","event":"UPDATE","timing":"BEFORE","action":"EXECUTE FUNCTION update_updated_at_column()"}]"#,
        ];
        let metadata = parse_metadata(parts).unwrap();
        assert_eq!(metadata.columns.len(), 1);
        assert_eq!(metadata.columns[0].data_type, "uuid");
        assert_eq!(metadata.foreign_keys[0].foreign_table_name, "users");
        assert_eq!(metadata.triggers[0].timing, "BEFORE");
    }

    #[test]
    fn test_trailing_period_is_stripped() {
        assert_eq!(repair_trailing("{\"a\":1}]."), "[{\"a\":1}]");
        assert_eq!(repair_trailing("{\"a\":1}] .\n"), "[{\"a\":1}]");
        assert_eq!(repair_trailing("{\"a\":1}.."), "[{\"a\":1}]");
    }

    #[test]
    fn test_missing_closing_bracket_is_added() {
        assert_eq!(repair_trailing("{\"a\":1}"), "[{\"a\":1}]");
    }

    #[test]
    fn test_extra_keys_are_ignored() {
        let parts = [
            r#"[{"table_name":"t","column_name":"c","data_type":"text","is_nullable":"YES"}"#,
            "",
            "]",
        ];
        let metadata = parse_metadata(parts).unwrap();
        assert_eq!(metadata.columns[0].column_name, "c");
        assert!(metadata.foreign_keys.is_empty());
        assert!(metadata.triggers.is_empty());
    }

    #[test]
    fn test_missing_key_names_section() {
        let parts = [
            "[",
            r#"{"table_name":"jobs","column_name":"user_id"}"#,
            "]",
        ];
        match parse_metadata(parts).unwrap_err() {
            GenerateError::Parse { section, .. } => assert_eq!(section, "foreign keys"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let parts = ["[{\"table_name\":", "", "]"];
        match parse_metadata(parts).unwrap_err() {
            GenerateError::Parse { section, .. } => assert_eq!(section, "columns"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
