//! Catalog settings, loaded from TOML or JSON.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

use crate::catalog::PatternKind;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config at line {line}, column {col}: {message}")]
    Parse {
        line: usize,
        col: usize,
        message: String,
    },

    #[error("Unknown pattern '{name}'\n  Expected one of: {expected}")]
    UnknownPattern { name: String, expected: String },

    #[error("Unknown sink '{name}'\n  Expected one of: console, log")]
    UnknownSink { name: String },
}

impl ConfigError {
    pub fn unknown_pattern(name: impl Into<String>) -> Self {
        let expected = PatternKind::ALL
            .iter()
            .map(|kind| kind.name())
            .collect::<Vec<_>>()
            .join(", ");
        Self::UnknownPattern {
            name: name.into(),
            expected,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse {
            line: err.line(),
            col: err.column(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse {
            line: 0,
            col: 0,
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    #[default]
    Console,
    Log,
}

impl FromStr for SinkKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "console" => Ok(SinkKind::Console),
            "log" => Ok(SinkKind::Log),
            _ => Err(ConfigError::UnknownSink { name: s.to_string() }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    /// Demonstrations to run, in order.
    pub patterns: Vec<PatternKind>,
    pub sink: SinkKind,
    pub color: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            patterns: PatternKind::ALL.to_vec(),
            sink: SinkKind::Console,
            color: true,
        }
    }
}

impl CatalogConfig {
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Picks the format by extension, falling back to sniffing the content.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let format = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match format.as_deref() {
            Some("json") => Self::from_json(&content),
            Some("toml") => Self::from_toml(&content),
            _ => {
                let trimmed = content.trim_start();
                if trimmed.starts_with('{') {
                    Self::from_json(&content)
                } else {
                    Self::from_toml(&content)
                }
            }
        }
    }

    /// Replaces the pattern list with names given on the command line.
    pub fn with_pattern_names<S: AsRef<str>>(mut self, names: &[S]) -> Result<Self, ConfigError> {
        if names.is_empty() {
            return Ok(self);
        }
        self.patterns = names
            .iter()
            .map(|name| name.as_ref().parse::<PatternKind>())
            .collect::<Result<_, _>>()?;
        Ok(self)
    }
}
