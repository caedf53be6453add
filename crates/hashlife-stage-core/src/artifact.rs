//! Artifact naming.
//!
//! wasm-pack emits a binary module and a loader script. Both are copied into
//! the frontend under names derived from the module: the module keeps its
//! own name and the loader is written as `<module stem>.js`. With the
//! default names that is `wasm_hashlife_bg.wasm` and `wasm_hashlife_bg.js`;
//! the loader's own name (`wasm_hashlife.js`) never reaches the destination.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, StageError};

/// Binary module emitted by wasm-pack.
pub const DEFAULT_MODULE_ARTIFACT: &str = "wasm_hashlife_bg.wasm";

/// Loader script emitted by wasm-pack.
pub const DEFAULT_LOADER_ARTIFACT: &str = "wasm_hashlife.js";

/// Extension appended to the module stem to name the staged loader.
pub const LOADER_EXTENSION: &str = "js";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Module,
    Loader,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactKind::Module => f.pad("module"),
            ArtifactKind::Loader => f.pad("loader"),
        }
    }
}

/// Source file names of the two build artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactSet {
    pub module: String,
    pub loader: String,
}

impl Default for ArtifactSet {
    fn default() -> Self {
        ArtifactSet {
            module: DEFAULT_MODULE_ARTIFACT.to_string(),
            loader: DEFAULT_LOADER_ARTIFACT.to_string(),
        }
    }
}

/// One planned copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub kind: ArtifactKind,
    pub source: PathBuf,
    pub dest: PathBuf,
}

impl ArtifactSet {
    pub fn new(module: impl Into<String>, loader: impl Into<String>) -> Self {
        ArtifactSet {
            module: module.into(),
            loader: loader.into(),
        }
    }

    /// Reject names that cannot be used as plain file names.
    pub fn validate(&self) -> Result<()> {
        for name in [&self.module, &self.loader] {
            if name.is_empty() {
                return Err(StageError::InvalidArtifactName(
                    "artifact name must not be empty".to_string(),
                ));
            }
            if name.contains('/') || name.contains('\\') {
                return Err(StageError::InvalidArtifactName(format!(
                    "{name} contains a path separator"
                )));
            }
        }
        if module_stem(&self.module).is_none() {
            return Err(StageError::InvalidArtifactName(format!(
                "{} has no file stem",
                self.module
            )));
        }
        if self.module_dest_name() == self.loader_dest_name() {
            return Err(StageError::InvalidArtifactName(format!(
                "{} would be staged over by the loader",
                self.module
            )));
        }
        Ok(())
    }

    pub fn module_dest_name(&self) -> String {
        self.module.clone()
    }

    /// `<module stem>.js`. Independent of the loader's own name.
    pub fn loader_dest_name(&self) -> String {
        let stem = module_stem(&self.module).unwrap_or(&self.module);
        format!("{stem}.{LOADER_EXTENSION}")
    }

    /// Planned copies, module first. This is the copy order.
    pub fn plan(&self, source_dir: &Path, dest_dir: &Path) -> Result<[Artifact; 2]> {
        self.validate()?;
        Ok([
            Artifact {
                kind: ArtifactKind::Module,
                source: source_dir.join(&self.module),
                dest: dest_dir.join(self.module_dest_name()),
            },
            Artifact {
                kind: ArtifactKind::Loader,
                source: source_dir.join(&self.loader),
                dest: dest_dir.join(self.loader_dest_name()),
            },
        ])
    }
}

fn module_stem(name: &str) -> Option<&str> {
    Path::new(name)
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
}
