//! Shared configuration loader for notion-md-sync.
//!
//! `defaults/notion-md-sync.default.toml` is embedded into the binary and is
//! the base layer. [`Loader`] stacks the working directory's
//! `notion-md-sync.toml`, an explicit `--config` file and named overrides on
//! top before deserializing into [`SyncConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat};
use notion_md_blocks::ConvertOptions;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

const DEFAULT_TOML: &str = include_str!("../defaults/notion-md-sync.default.toml");

/// Name of the optional per-directory configuration file.
pub const LOCAL_CONFIG_FILE: &str = "notion-md-sync.toml";

/// Top-level configuration consumed by notion-md-sync.
#[derive(Debug, Clone, Deserialize)]
pub struct SyncConfig {
    pub api: ApiConfig,
    pub upload: UploadConfig,
    pub convert: ConvertConfig,
    pub resolve: ResolveConfig,
}

/// Where and how to reach Notion.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub version: String,
    /// Environment variable that holds the integration token.
    pub token_env: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    pub chunk_size: usize,
}

/// Mirrors the knobs exposed by the converter.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    pub default_code_language: String,
}

impl From<ConvertConfig> for ConvertOptions {
    fn from(config: ConvertConfig) -> Self {
        ConvertOptions {
            default_language: config.default_code_language,
        }
    }
}

impl From<&ConvertConfig> for ConvertOptions {
    fn from(config: &ConvertConfig) -> Self {
        ConvertOptions {
            default_language: config.default_code_language.clone(),
        }
    }
}

/// Parent page auto-detection.
#[derive(Debug, Clone, Deserialize)]
pub struct ResolveConfig {
    pub search_words: usize,
}

/// A setting that can be overridden by name, e.g. `--extra-chunk-size 50`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Override {
    pub name: &'static str,
    /// Dotted path into [`SyncConfig`].
    pub key: &'static str,
    pub numeric: bool,
}

pub const OVERRIDES: &[Override] = &[
    Override {
        name: "chunk-size",
        key: "upload.chunk_size",
        numeric: true,
    },
    Override {
        name: "code-language",
        key: "convert.default_code_language",
        numeric: false,
    },
    Override {
        name: "search-words",
        key: "resolve.search_words",
        numeric: true,
    },
    Override {
        name: "base-url",
        key: "api.base_url",
        numeric: false,
    },
    Override {
        name: "notion-version",
        key: "api.version",
        numeric: false,
    },
    Override {
        name: "token-env",
        key: "api.token_env",
        numeric: false,
    },
];

/// Look up an override by its command-line name.
pub fn find_override(name: &str) -> Option<&'static Override> {
    OVERRIDES.iter().find(|candidate| candidate.name == name)
}

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("unknown setting '{0}'")]
    UnknownSetting(String),

    #[error("invalid number '{value}' for {name}")]
    InvalidNumber { name: String, value: String },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Layers, lowest priority first: embedded defaults, the directory's
/// `notion-md-sync.toml`, an explicit file, named overrides.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start from the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer `dir/notion-md-sync.toml` if it exists.
    pub fn with_local_file(mut self, dir: impl AsRef<Path>) -> Self {
        let source = File::from(dir.as_ref().join(LOCAL_CONFIG_FILE))
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer a file that must exist.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a named override from [`OVERRIDES`]. Numeric settings must
    /// parse as integers.
    pub fn with_override(mut self, name: &str, raw: &str) -> Result<Self, LoadError> {
        let setting =
            find_override(name).ok_or_else(|| LoadError::UnknownSetting(name.to_string()))?;

        self.builder = if setting.numeric {
            let value: i64 = raw.parse().map_err(|_| LoadError::InvalidNumber {
                name: name.to_string(),
                value: raw.to_string(),
            })?;
            self.builder.set_override(setting.key, value)?
        } else {
            self.builder.set_override(setting.key, raw)?
        };
        Ok(self)
    }

    pub fn build(self) -> Result<SyncConfig, LoadError> {
        Ok(self.builder.build()?.try_deserialize()?)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<SyncConfig, LoadError> {
    Loader::new().build()
}
