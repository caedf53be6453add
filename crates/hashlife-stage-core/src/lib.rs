//! hashlife-stage core library
//!
//! Stages the wasm-hashlife build output into the frontend directory and
//! lists the frontend's example patterns.

pub mod artifact;
pub mod config;
pub mod digest;
pub mod error;
pub mod examples;
pub mod report;
pub mod stager;
pub mod telemetry;

pub use artifact::{
    Artifact, ArtifactKind, ArtifactSet, DEFAULT_LOADER_ARTIFACT, DEFAULT_MODULE_ARTIFACT,
};
pub use config::StageConfig;
pub use digest::ArtifactDigest;
pub use error::{Result, StageError, StageErrorKind};
pub use examples::{list_examples, print_examples, ExampleEntries};
pub use report::{StageReport, StagedArtifact};
pub use stager::{stage_artifacts, stage_assets, verify_staged};
pub use telemetry::init_tracing;
