use markup_syntax::{ContainerKind, DEFAULT_MAX_DEPTH, DelimiterTable, Parser};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Delimiter {key:?} must be exactly one character")]
    InvalidDelimiter { key: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Maximum delimiter nesting before a parse is rejected.
    pub max_depth: usize,
    /// Characters scanned as delimiters that never produce a container.
    pub generic_delimiters: Vec<char>,
    /// Delimiter character to container kind. `None` means the built-in table.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delimiters: Option<BTreeMap<String, ContainerKind>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            generic_delimiters: Vec::new(),
            delimiters: None,
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        // Expand shell variables and tilde in the given path
        let config_path =
            Self::expand_path(config_path).unwrap_or_else(|| config_path.to_path_buf());
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.clone(),
                source,
            }
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.clone(),
                source,
            })?;

        // Reject bad delimiter keys up front rather than at first parse
        config.table()?;

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/markup");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// The delimiter table this config describes.
    pub fn table(&self) -> Result<DelimiterTable, ConfigError> {
        let Some(delimiters) = &self.delimiters else {
            return Ok(DelimiterTable::default());
        };

        delimiters
            .iter()
            .map(|(key, kind)| {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok((c, *kind)),
                    _ => Err(ConfigError::InvalidDelimiter { key: key.clone() }),
                }
            })
            .collect()
    }

    /// A parser configured from this config.
    pub fn parser(&self) -> Result<Parser, ConfigError> {
        Ok(Parser::new(self.table()?)
            .with_generic_delimiters(self.generic_delimiters.iter().copied())
            .with_max_depth(self.max_depth))
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}
