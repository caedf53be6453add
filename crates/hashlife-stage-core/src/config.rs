//! Staging configuration.
//!
//! Defaults reproduce the frontend layout the stager was written for:
//! wasm-pack output in `../wasm-hashlife/pkg`, the frontend in the working
//! directory, examples in `./examples`. A TOML file may override any field;
//! missing keys keep their defaults. Relative paths are resolved against the
//! process working directory when used.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::artifact::ArtifactSet;
use crate::error::{Result, StageError};

pub const DEFAULT_SOURCE_DIR: &str = "../wasm-hashlife/pkg";
pub const DEFAULT_DEST_DIR: &str = ".";
pub const DEFAULT_EXAMPLES_DIR: &str = "examples";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StageConfig {
    /// wasm-pack output directory
    pub source_dir: PathBuf,
    /// Frontend directory receiving the artifacts
    pub dest_dir: PathBuf,
    /// Directory whose entries are listed
    pub examples_dir: PathBuf,
    pub artifacts: ArtifactSet,
}

impl Default for StageConfig {
    fn default() -> Self {
        StageConfig {
            source_dir: PathBuf::from(DEFAULT_SOURCE_DIR),
            dest_dir: PathBuf::from(DEFAULT_DEST_DIR),
            examples_dir: PathBuf::from(DEFAULT_EXAMPLES_DIR),
            artifacts: ArtifactSet::default(),
        }
    }
}

impl StageConfig {
    /// Load a TOML config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| match StageError::from_io(path, e) {
            StageError::Io { source, .. } => StageError::Config {
                path: path.to_path_buf(),
                message: source.to_string(),
            },
            other => other,
        })?;
        let config = Self::from_toml_str(&text).map_err(|message| StageError::Config {
            path: path.to_path_buf(),
            message,
        })?;
        debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    /// Load `path` if given, otherwise the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    fn from_toml_str(text: &str) -> std::result::Result<Self, String> {
        let config: StageConfig = toml::from_str(text).map_err(|e| e.to_string())?;
        config.artifacts.validate().map_err(|e| e.to_string())?;
        Ok(config)
    }

    pub fn with_source_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.source_dir = dir.into();
        self
    }

    pub fn with_dest_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dest_dir = dir.into();
        self
    }

    pub fn with_examples_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.examples_dir = dir.into();
        self
    }
}
