//! schemagen CLI
//!
//! Reads an information-schema export and writes the DDL script that
//! recreates it. With no arguments the paths come from
//! `config/schemagen.toml`, `SCHEMAGEN__GENERATOR__*` variables, or the
//! built-in defaults.

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use schemagen::{generate, render_file, GenerationReport, GeneratorConfig};
use std::path::PathBuf;
use std::process;

#[derive(Parser, Debug)]
#[command(name = "schemagen")]
#[command(about = "Generate an idempotent PostgreSQL schema script from an information-schema export")]
#[command(version = "0.1.0")]
struct Cli {
    /// Export file holding the column, foreign-key and trigger arrays
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Destination of the generated script (overwritten)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the script instead of writing the output file
    #[arg(long)]
    stdout: bool,

    /// Exit with status 1 when generation fails
    #[arg(long)]
    strict: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet output (errors only)
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    process::exit(run(&cli, load_config(&cli)));
}

/// Execute with the loaded configuration and pick the exit status.
///
/// Failures are reported on stdout and exit 0 unless strict mode is on.
fn run(cli: &Cli, loaded: anyhow::Result<GeneratorConfig>) -> i32 {
    let (strict, result) = match loaded {
        Ok(config) => (config.strict, execute(cli, &config)),
        Err(e) => (cli.strict, Err(e)),
    };

    match result {
        Ok(()) => 0,
        Err(e) => {
            println!("{}", failure_line(&e));
            if strict {
                1
            } else {
                0
            }
        }
    }
}

fn failure_line(err: &anyhow::Error) -> String {
    format!("{} {:#}", "FAILED:".red().bold(), err)
}

fn load_config(cli: &Cli) -> anyhow::Result<GeneratorConfig> {
    let config = GeneratorConfig::load().context("failed to load generator configuration")?;
    Ok(apply_overrides(config, cli))
}

fn apply_overrides(mut config: GeneratorConfig, cli: &Cli) -> GeneratorConfig {
    if let Some(ref input) = cli.input {
        config.input_path = input.clone();
    }
    if let Some(ref output) = cli.output {
        config.output_path = output.clone();
    }
    config.strict |= cli.strict;
    config
}

fn execute(cli: &Cli, config: &GeneratorConfig) -> anyhow::Result<()> {
    if cli.stdout {
        let (script, report) = render_file(config)?;
        print!("{}", script);
        log::info!("{}", summary(&report));
        return Ok(());
    }

    let report = generate(config)?;
    println!(
        "{} Generated {}",
        "SUCCESS:".green().bold(),
        config.output_path.display()
    );
    if !cli.quiet {
        println!("   {}", summary(&report));
    }
    Ok(())
}

fn summary(report: &GenerationReport) -> String {
    format!(
        "{} table(s), {} column(s), {} foreign key(s), {} trigger(s) ({})",
        report.tables, report.columns, report.foreign_keys, report.triggers, report.strategy
    )
}
