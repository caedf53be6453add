//! Staging report.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::artifact::ArtifactKind;
use crate::digest::ArtifactDigest;

/// One artifact as it landed in the destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagedArtifact {
    pub kind: ArtifactKind,
    pub source: PathBuf,
    pub dest: PathBuf,
    pub bytes: u64,
    pub digest: ArtifactDigest,
}

/// Outcome of a staging run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageReport {
    pub artifacts: Vec<StagedArtifact>,
    pub finished_at: DateTime<Utc>,
}

impl StageReport {
    pub fn new(artifacts: Vec<StagedArtifact>) -> Self {
        StageReport {
            artifacts,
            finished_at: Utc::now(),
        }
    }

    pub fn total_bytes(&self) -> u64 {
        self.artifacts.iter().map(|a| a.bytes).sum()
    }

    pub fn get(&self, kind: ArtifactKind) -> Option<&StagedArtifact> {
        self.artifacts.iter().find(|a| a.kind == kind)
    }
}
