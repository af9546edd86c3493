//! DDL script rendering.
//!
//! The script is laid out so every object is created after what it depends
//! on: extensions, enum types, trigger functions, tables, foreign keys and
//! finally triggers. Each statement is written so that replaying the script
//! against a database that already has the schema is harmless:
//!
//! - enum types are created inside an existence check
//! - trigger functions use `CREATE OR REPLACE`
//! - tables use `CREATE TABLE IF NOT EXISTS`
//! - foreign keys run in a block that swallows `duplicate_object` and
//!   `undefined_object`
//! - triggers are dropped before being created again
//!
//! Referenced names are not validated here. A foreign key pointing at an
//! unknown table is left for the database to reject.

use crate::metadata::{ForeignKeyRecord, TriggerRecord};
use crate::resolver::TableDefinition;

const RULE: &str =
    "-- ==============================================================================";

const EXTENSIONS: [&str; 2] = ["uuid-ossp", "pgcrypto"];

/// An enum type the resolver can map columns onto
#[derive(Debug, Clone, Copy)]
pub struct EnumType {
    pub name: &'static str,
    pub labels: &'static [&'static str],
}

pub const ENUM_TYPES: [EnumType; 3] = [
    EnumType {
        name: "user_role",
        labels: &[
            "super_admin",
            "admin",
            "moderator",
            "support_agent",
            "finance_manager",
            "general_contractor",
            "project_manager",
            "subcontractor",
            "trade_specialist",
            "viewer",
        ],
    },
    EnumType {
        name: "verification_status",
        labels: &["unverified", "pending", "verified", "rejected"],
    },
    EnumType {
        name: "request_status",
        labels: &["pending", "approved", "rejected", "cancelled"],
    },
];

const TRIGGER_FUNCTIONS: [[&str; 2]; 2] = [
    [
        "CREATE OR REPLACE FUNCTION update_updated_at_column() RETURNS TRIGGER AS $$",
        "BEGIN NEW.updated_at = now(); RETURN NEW; END; $$ LANGUAGE plpgsql;",
    ],
    [
        "CREATE OR REPLACE FUNCTION set_ticket_number() RETURNS TRIGGER AS $$",
        "BEGIN IF NEW.ticket_number IS NULL THEN NEW.ticket_number = 'TICK-' || upper(substring(gen_random_uuid()::text from 1 for 8)); END IF; RETURN NEW; END; $$ LANGUAGE plpgsql;",
    ],
];

/// Render the complete script.
///
/// `source` names the export in the header banner. Tables are written in the
/// order given; callers pass them sorted by name.
pub fn render_script(
    source: &str,
    tables: &[TableDefinition],
    foreign_keys: &[ForeignKeyRecord],
    triggers: &[TriggerRecord],
) -> String {
    let mut lines: Vec<String> = vec![
        RULE.to_string(),
        "-- COMPREHENSIVE DATABASE SCHEMA".to_string(),
        format!("-- Generated from {}", source),
        RULE.to_string(),
        String::new(),
    ];

    for extension in EXTENSIONS {
        lines.push(format!("CREATE EXTENSION IF NOT EXISTS \"{}\";", extension));
    }
    lines.push(String::new());

    lines.push("-- 1. TYPES".to_string());
    lines.extend(enum_block(&ENUM_TYPES));
    lines.push(String::new());

    lines.push("-- 2. COMMON FUNCTIONS".to_string());
    for function in TRIGGER_FUNCTIONS {
        lines.extend(function.iter().map(|line| line.to_string()));
        lines.push(String::new());
    }

    lines.push("-- 3. TABLES".to_string());
    for table in tables {
        lines.push(table_block(table));
    }

    lines.push("-- 4. FOREIGN KEYS".to_string());
    for fk in foreign_keys {
        lines.push(foreign_key_block(fk));
    }

    lines.push(String::new());
    lines.push("-- 5. TRIGGERS".to_string());
    for trigger in triggers {
        lines.extend(trigger_statements(trigger));
    }

    lines.join("\n")
}

/// One `DO` block creating each enum type only when it is missing.
pub fn enum_block(types: &[EnumType]) -> Vec<String> {
    let mut lines = vec!["DO $$ BEGIN".to_string()];
    for ty in types {
        let labels = ty
            .labels
            .iter()
            .map(|label| format!("'{}'", label))
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(format!(
            "    IF NOT EXISTS (SELECT 1 FROM pg_type WHERE typname = '{}') THEN",
            ty.name
        ));
        lines.push(format!("        CREATE TYPE {} AS ENUM ({});", ty.name, labels));
        lines.push("    END IF;".to_string());
    }
    lines.push("END $$;".to_string());
    lines
}

/// `CREATE TABLE IF NOT EXISTS` for one table, followed by a blank line.
pub fn table_block(table: &TableDefinition) -> String {
    let columns = table
        .columns
        .iter()
        .map(|column| format!("    {}", column.definition()))
        .collect::<Vec<_>>()
        .join(",\n");
    format!(
        "-- Table: {name}\nCREATE TABLE IF NOT EXISTS public.{name} (\n{columns}\n);\n",
        name = table.name,
        columns = columns
    )
}

/// `fk_<table>_<column>_<foreign_table>`; not checked for collisions.
pub fn constraint_name(fk: &ForeignKeyRecord) -> String {
    format!(
        "fk_{}_{}_{}",
        fk.table_name, fk.column_name, fk.foreign_table_name
    )
}

/// Guarded `ALTER TABLE ... ADD CONSTRAINT` for one foreign key.
pub fn foreign_key_block(fk: &ForeignKeyRecord) -> String {
    format!(
        "DO $$ BEGIN\n    ALTER TABLE public.{table} ADD CONSTRAINT {name} FOREIGN KEY ({column}) REFERENCES public.{foreign_table}({foreign_column}) ON DELETE CASCADE;\nEXCEPTION WHEN duplicate_object OR undefined_object THEN NULL; END $$;",
        table = fk.table_name,
        name = constraint_name(fk),
        column = fk.column_name,
        foreign_table = fk.foreign_table_name,
        foreign_column = fk.foreign_column_name,
    )
}

/// Drop-then-create pair for one trigger.
pub fn trigger_statements(trigger: &TriggerRecord) -> [String; 2] {
    [
        format!(
            "DROP TRIGGER IF EXISTS {} ON public.{};",
            trigger.trigger_name, trigger.table_name
        ),
        format!(
            "CREATE TRIGGER {} {} {} ON public.{} FOR EACH ROW {};",
            trigger.trigger_name, trigger.timing, trigger.event, trigger.table_name, trigger.action
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::ColumnSpec;

    fn jobs_fk() -> ForeignKeyRecord {
        ForeignKeyRecord {
            table_name: "jobs".to_string(),
            column_name: "user_id".to_string(),
            foreign_table_name: "users".to_string(),
            foreign_column_name: "id".to_string(),
        }
    }

    #[test]
    fn test_foreign_key_block() {
        let block = foreign_key_block(&jobs_fk());
        let lines: Vec<_> = block.lines().collect();
        assert_eq!(lines[0], "DO $$ BEGIN");
        assert_eq!(
            lines[1].trim(),
            "ALTER TABLE public.jobs ADD CONSTRAINT fk_jobs_user_id_users FOREIGN KEY (user_id) REFERENCES public.users(id) ON DELETE CASCADE;"
        );
        assert_eq!(
            lines[2],
            "EXCEPTION WHEN duplicate_object OR undefined_object THEN NULL; END $$;"
        );
    }

    #[test]
    fn test_constraint_names_can_collide() {
        let mut other = jobs_fk();
        other.foreign_column_name = "legacy_id".to_string();
        assert_eq!(constraint_name(&jobs_fk()), constraint_name(&other));
    }

    #[test]
    fn test_table_block_layout() {
        let table = TableDefinition {
            name: "users".to_string(),
            columns: vec![
                ColumnSpec {
                    name: "id".to_string(),
                    resolved_type: "uuid".to_string(),
                    extra_clause: Some("PRIMARY KEY DEFAULT gen_random_uuid()"),
                },
                ColumnSpec {
                    name: "email".to_string(),
                    resolved_type: "text".to_string(),
                    extra_clause: None,
                },
            ],
        };
        assert_eq!(
            table_block(&table),
            "-- Table: users\n\
             CREATE TABLE IF NOT EXISTS public.users (\n    \
             id uuid PRIMARY KEY DEFAULT gen_random_uuid(),\n    \
             email text\n\
             );\n"
        );
    }

    #[test]
    fn test_trigger_statements() {
        let trigger = TriggerRecord {
            trigger_name: "trg_jobs_updated".to_string(),
            table_name: "jobs".to_string(),
            event: "UPDATE".to_string(),
            timing: "BEFORE".to_string(),
            action: "EXECUTE FUNCTION update_updated_at_column()".to_string(),
        };
        let [drop, create] = trigger_statements(&trigger);
        assert_eq!(drop, "DROP TRIGGER IF EXISTS trg_jobs_updated ON public.jobs;");
        assert_eq!(
            create,
            "CREATE TRIGGER trg_jobs_updated BEFORE UPDATE ON public.jobs FOR EACH ROW EXECUTE FUNCTION update_updated_at_column();"
        );
    }

    #[test]
    fn test_enum_block_guards_every_type() {
        let block = enum_block(&ENUM_TYPES).join("\n");
        for ty in ENUM_TYPES {
            assert!(block.contains(&format!("WHERE typname = '{}'", ty.name)));
            assert!(block.contains(&format!("CREATE TYPE {} AS ENUM (", ty.name)));
        }
        assert!(block.contains("CREATE TYPE verification_status AS ENUM ('unverified', 'pending', 'verified', 'rejected');"));
    }

    #[test]
    fn test_sections_in_dependency_order() {
        let script = render_script("export.txt", &[], &[jobs_fk()], &[]);
        let positions: Vec<_> = [
            "CREATE EXTENSION",
            "-- 1. TYPES",
            "-- 2. COMMON FUNCTIONS",
            "-- 3. TABLES",
            "-- 4. FOREIGN KEYS",
            "-- 5. TRIGGERS",
        ]
        .iter()
        .map(|marker| script.find(marker).unwrap())
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(script.contains("-- Generated from export.txt"));
        assert!(script.contains("CREATE EXTENSION IF NOT EXISTS \"pgcrypto\";"));
        assert!(script.ends_with("-- 5. TRIGGERS"));
    }
}
