//! # schemagen
//!
//! Rebuilds a PostgreSQL schema from an information-schema export.
//!
//! The input is a single text file holding three JSON arrays written back to
//! back (columns, foreign keys, triggers). The pipeline splits the arrays
//! apart, parses the records, groups columns into tables and renders an
//! idempotent DDL script that can be replayed against a fresh database.
//!
//! ```no_run
//! use schemagen::{generate, GeneratorConfig};
//!
//! let config = GeneratorConfig::new("full_and_final.sql", "final_schema_v2.sql");
//! let report = generate(&config)?;
//! println!("{} tables written", report.tables);
//! # Ok::<(), schemagen::GenerateError>(())
//! ```

pub mod assembler;
pub mod config;
pub mod emitter;
pub mod error;
pub mod metadata;
pub mod pipeline;
pub mod resolver;
pub mod splitter;

pub use assembler::{assemble_tables, TableMap};
pub use crate::config::GeneratorConfig;
pub use emitter::render_script;
pub use error::{GenerateError, Result};
pub use metadata::{parse_metadata, ColumnRecord, ForeignKeyRecord, Metadata, TriggerRecord};
pub use pipeline::{generate, render, render_file, GenerationReport};
pub use resolver::{extra_clause, resolve_column, resolve_type, ColumnSpec, TableDefinition};
pub use splitter::{split_arrays, SplitStrategy};
