//! Generator configuration.
//!
//! Paths are passed into the pipeline explicitly rather than hard-coded, so
//! tests can point the generator at fixture files. Applications can load
//! settings from `config/schemagen.toml` or environment variables using
//! [`GeneratorConfig::load`].

use crate::error::{GenerateError, Result};
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

const CONFIG_FILE: &str = "config/schemagen.toml";
const ENV_PREFIX: &str = "SCHEMAGEN";

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Information-schema export holding the three JSON arrays
    #[serde(default = "default_input_path")]
    pub input_path: PathBuf,
    /// Destination of the generated DDL script
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,
    /// Report failures through the process exit status
    #[serde(default)]
    pub strict: bool,
}

fn default_input_path() -> PathBuf {
    PathBuf::from("full_and_final.sql")
}

fn default_output_path() -> PathBuf {
    PathBuf::from("final_schema_v2.sql")
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            input_path: default_input_path(),
            output_path: default_output_path(),
            strict: false,
        }
    }
}

impl GeneratorConfig {
    pub fn new(input_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
            strict: false,
        }
    }

    /// Load the generator configuration from `config/schemagen.toml` and the environment.
    ///
    /// Environment variables use the `SCHEMAGEN__GENERATOR__` prefix, e.g.
    /// `SCHEMAGEN__GENERATOR__INPUT_PATH`. A missing `[generator]` section
    /// yields the defaults; an unreadable file is skipped with a warning.
    pub fn load() -> Result<Self> {
        let settings = match Config::builder()
            .add_source(File::with_name(CONFIG_FILE).required(false))
            .add_source(env_source())
            .build()
        {
            Ok(cfg) => cfg,
            Err(err) => {
                log::warn!("ignoring {}: {}", CONFIG_FILE, err);
                Config::builder().add_source(env_source()).build()?
            }
        };

        Self::from_settings(&settings)
    }

    fn from_settings(settings: &Config) -> Result<Self> {
        match settings.get::<GeneratorConfig>("generator") {
            Ok(cfg) => Ok(cfg),
            Err(ConfigError::NotFound(_)) => Ok(Self::default()),
            Err(e) => Err(GenerateError::Config(e)),
        }
    }
}

fn env_source() -> Environment {
    Environment::with_prefix(ENV_PREFIX).separator("__")
}
