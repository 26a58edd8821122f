//! Configuration for biolit-ingest
//!
//! Loaded from a TOML file, then overridden by environment variables:
//!
//! ```toml
//! output_dir = "./out"
//! context_categories = ["Cell type", "Cell line", "Organ"]
//! n_proc = 4
//!
//! [acsn]
//! delimiter = "\t"
//!
//! [[readers]]
//! name = "reach"
//! program = "reach-cli"
//! args = ["--input", "{input}"]
//! version = "1.6.3"
//! format = "json"
//! ```

use crate::acsn::DEFAULT_RELATIONS_DELIMITER;
use crate::annotations::{ContextCategories, ContextParser};
use biolit_common::{BiolitError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable naming the config file
pub const CONFIG_ENV: &str = "BIOLIT_CONFIG";

/// Environment variable overriding the output directory
pub const OUTPUT_DIR_ENV: &str = "BIOLIT_OUTPUT_DIR";

/// An external reading program
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReaderConfig {
    pub name: String,
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "txt".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcsnConfig {
    /// Single-character column delimiter of the relations table
    pub delimiter: String,
}

impl Default for AcsnConfig {
    fn default() -> Self {
        Self {
            delimiter: (DEFAULT_RELATIONS_DELIMITER as char).to_string(),
        }
    }
}

impl AcsnConfig {
    pub fn delimiter_byte(&self) -> Result<u8> {
        match self.delimiter.as_bytes() {
            [byte] => Ok(*byte),
            _ => Err(BiolitError::config(format!(
                "acsn.delimiter must be a single ASCII character, got '{}'",
                self.delimiter
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Where output files are written
    pub output_dir: PathBuf,

    /// Category labels accepted in context entries
    pub context_categories: ContextCategories,

    /// Default number of documents a reader processes at once
    pub n_proc: usize,

    pub acsn: AcsnConfig,

    pub readers: Vec<ReaderConfig>,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            context_categories: ContextCategories::default(),
            n_proc: 1,
            acsn: AcsnConfig::default(),
            readers: Vec::new(),
        }
    }
}

impl IngestConfig {
    /// Parse a TOML document
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| BiolitError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(BiolitError::FileNotFound(path.display().to_string()));
        }
        debug!(path = %path.display(), "Loading config");
        Self::from_toml(&std::fs::read_to_string(path)?)
    }

    /// Resolve configuration: explicit path, then `BIOLIT_CONFIG`, then
    /// defaults. `BIOLIT_OUTPUT_DIR` overrides the output directory.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let env_path = std::env::var(CONFIG_ENV).ok().map(PathBuf::from);

        let mut config = match path.map(Path::to_path_buf).or(env_path) {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Ok(dir) = std::env::var(OUTPUT_DIR_ENV) {
            config.output_dir = PathBuf::from(dir);
        }

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        self.acsn.delimiter_byte()?;

        if self.n_proc == 0 {
            return Err(BiolitError::config("n_proc must be at least 1"));
        }

        let mut seen = std::collections::HashSet::new();
        for reader in &self.readers {
            if reader.name.trim().is_empty() || reader.program.trim().is_empty() {
                return Err(BiolitError::config("readers need a name and a program"));
            }
            if !seen.insert(reader.name.to_lowercase()) {
                return Err(BiolitError::config(format!("duplicate reader '{}'", reader.name)));
            }
        }

        Ok(())
    }

    pub fn context_parser(&self) -> ContextParser {
        ContextParser::new(self.context_categories.clone())
    }

    /// Reader definitions whose names are in `selected` (case-insensitive),
    /// or all of them when `selected` is empty
    pub fn select_readers(&self, selected: &[String]) -> Vec<&ReaderConfig> {
        let selected: Vec<String> = selected.iter().map(|s| s.to_lowercase()).collect();
        self.readers
            .iter()
            .filter(|reader| selected.is_empty() || selected.contains(&reader.name.to_lowercase()))
            .collect()
    }
}
