//! Read → split → parse → assemble → emit → write.
//!
//! The run is all-or-nothing: the output file is written in one go, and only
//! once the script has been fully rendered.

use crate::assembler::assemble_tables;
use crate::config::GeneratorConfig;
use crate::emitter::render_script;
use crate::error::{GenerateError, Result};
use crate::metadata::parse_metadata;
use crate::resolver::TableDefinition;
use crate::splitter::{split_arrays, SplitStrategy};
use std::fs;
use std::path::Path;

/// What a run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    pub strategy: SplitStrategy,
    pub tables: usize,
    pub columns: usize,
    pub foreign_keys: usize,
    pub triggers: usize,
}

/// Render the script for an export without touching the filesystem.
///
/// `source` is the name written into the script header.
pub fn render(source: &str, text: &str) -> Result<(String, GenerationReport)> {
    let (strategy, parts) = split_arrays(text)?;
    log::info!("Split export into 3 arrays using {}", strategy);

    let metadata = parse_metadata(parts)?;
    log::debug!(
        "Parsed {} column(s), {} foreign key(s), {} trigger(s)",
        metadata.columns.len(),
        metadata.foreign_keys.len(),
        metadata.triggers.len()
    );

    let tables: Vec<TableDefinition> = assemble_tables(&metadata.columns)
        .iter()
        .map(|(name, records)| TableDefinition::new(name, records))
        .collect();
    log::debug!("Assembled {} table(s)", tables.len());

    let script = render_script(source, &tables, &metadata.foreign_keys, &metadata.triggers);

    let report = GenerationReport {
        strategy,
        tables: tables.len(),
        columns: metadata.columns.len(),
        foreign_keys: metadata.foreign_keys.len(),
        triggers: metadata.triggers.len(),
    };
    Ok((script, report))
}

/// Read the configured export and render its script, without writing it.
pub fn render_file(config: &GeneratorConfig) -> Result<(String, GenerationReport)> {
    let text = read_input(&config.input_path)?;
    render(&source_name(&config.input_path), &text)
}

/// Run the full pipeline and overwrite the configured output file.
///
/// # Errors
///
/// Any error leaves the output file untouched.
pub fn generate(config: &GeneratorConfig) -> Result<GenerationReport> {
    let (script, report) = render_file(config)?;

    fs::write(&config.output_path, script).map_err(|source| GenerateError::Io {
        path: config.output_path.clone(),
        source,
    })?;

    log::info!(
        "Wrote {} table(s), {} foreign key(s), {} trigger(s) to {}",
        report.tables,
        report.foreign_keys,
        report.triggers,
        config.output_path.display()
    );
    Ok(report)
}

fn read_input(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(GenerateError::MissingInput {
            path: path.to_path_buf(),
        });
    }
    fs::read_to_string(path).map_err(|source| GenerateError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn source_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
