//! Asset stager: copies the wasm-pack output into the frontend directory.
//!
//! Copies are plain overwrite-if-exists copies, module first. There is no
//! existence pre-check and no rollback: if the loader is missing, the module
//! has already been written when the error comes back.

use std::fs;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::artifact::{Artifact, ArtifactSet};
use crate::digest::ArtifactDigest;
use crate::error::{Result, StageError};
use crate::report::{StageReport, StagedArtifact};

/// Stage the default artifact pair from `source_dir` into `dest_dir`.
pub fn stage_assets(source_dir: &Path, dest_dir: &Path) -> Result<StageReport> {
    stage_artifacts(&ArtifactSet::default(), source_dir, dest_dir)
}

/// Stage `set` from `source_dir` into `dest_dir`.
///
/// Leaves `dest_dir` holding the module under its own name and the loader
/// under `<module stem>.js`, byte-identical to their sources.
pub fn stage_artifacts(set: &ArtifactSet, source_dir: &Path, dest_dir: &Path) -> Result<StageReport> {
    let plan = set.plan(source_dir, dest_dir)?;
    let mut staged = Vec::with_capacity(plan.len());

    for artifact in &plan {
        staged.push(copy_artifact(artifact)?);
    }

    let report = StageReport::new(staged);
    debug!(total_bytes = report.total_bytes(), "staging complete");
    Ok(report)
}

fn copy_artifact(artifact: &Artifact) -> Result<StagedArtifact> {
    // Copying a file onto itself truncates it before it is read.
    if is_same_file(&artifact.source, &artifact.dest) {
        return Err(StageError::SameFile {
            path: artifact.source.clone(),
        });
    }

    let bytes = fs::copy(&artifact.source, &artifact.dest)
        .map_err(|e| classify_copy_error(artifact, e))?;
    let digest = ArtifactDigest::of_file(&artifact.dest)?;

    info!(
        kind = %artifact.kind,
        source = %artifact.source.display(),
        dest = %artifact.dest.display(),
        bytes,
        digest = %digest.short(),
        "staged artifact"
    );

    Ok(StagedArtifact {
        kind: artifact.kind,
        source: artifact.source.clone(),
        dest: artifact.dest.clone(),
        bytes,
        digest,
    })
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// `fs::copy` reports one error for both ends; attribute it to the side
/// that actually failed.
fn classify_copy_error(artifact: &Artifact, err: std::io::Error) -> StageError {
    match fs::metadata(&artifact.source) {
        Ok(meta) if meta.is_file() => StageError::from_io(&artifact.dest, err),
        _ => StageError::from_io(&artifact.source, err),
    }
}

/// Check that every staged file in `dest_dir` matches its source.
///
/// Read-only. Fails on the first missing file or digest difference.
pub fn verify_staged(set: &ArtifactSet, source_dir: &Path, dest_dir: &Path) -> Result<Vec<StagedArtifact>> {
    let plan = set.plan(source_dir, dest_dir)?;
    let mut verified = Vec::with_capacity(plan.len());

    for artifact in &plan {
        let expected = ArtifactDigest::of_file(&artifact.source)?;
        let actual = ArtifactDigest::of_file(&artifact.dest)?;

        if expected != actual {
            warn!(
                dest = %artifact.dest.display(),
                expected = %expected.short(),
                actual = %actual.short(),
                "staged artifact is stale"
            );
            return Err(StageError::DigestMismatch {
                path: artifact.dest.clone(),
                expected: expected.to_hex(),
                actual: actual.to_hex(),
            });
        }

        let bytes = fs::metadata(&artifact.dest)
            .map_err(|e| StageError::from_io(&artifact.dest, e))?
            .len();
        verified.push(StagedArtifact {
            kind: artifact.kind,
            source: artifact.source.clone(),
            dest: artifact.dest.clone(),
            bytes,
            digest: actual,
        });
    }

    Ok(verified)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::ArtifactKind;
    use crate::error::StageErrorKind;
    use tempfile::TempDir;

    fn make_pkg() -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("wasm_hashlife_bg.wasm"), b"\0asm\x01\0\0\0body").unwrap();
        fs::write(dir.path().join("wasm_hashlife.js"), b"export default init;").unwrap();
        dir
    }

    #[test]
    fn test_stage_assets_copies_under_fixed_names() {
        let pkg = make_pkg();
        let dest = tempfile::tempdir().unwrap();

        let report = stage_assets(pkg.path(), dest.path()).unwrap();

        assert_eq!(
            fs::read(dest.path().join("wasm_hashlife_bg.wasm")).unwrap(),
            b"\0asm\x01\0\0\0body"
        );
        assert_eq!(
            fs::read(dest.path().join("wasm_hashlife_bg.js")).unwrap(),
            b"export default init;"
        );
        assert!(!dest.path().join("wasm_hashlife.js").exists());
        assert_eq!(report.artifacts.len(), 2);
        assert_eq!(report.total_bytes(), 12 + 20);
    }

    #[test]
    fn test_stage_leaves_sources_untouched() {
        let pkg = make_pkg();
        let dest = tempfile::tempdir().unwrap();

        stage_assets(pkg.path(), dest.path()).unwrap();

        assert!(pkg.path().join("wasm_hashlife_bg.wasm").exists());
        assert_eq!(
            fs::read(pkg.path().join("wasm_hashlife.js")).unwrap(),
            b"export default init;"
        );
    }

    #[test]
    fn test_stage_overwrites_existing_destination() {
        let pkg = make_pkg();
        let dest = tempfile::tempdir().unwrap();
        fs::write(dest.path().join("wasm_hashlife_bg.js"), b"stale loader from last build").unwrap();

        stage_assets(pkg.path(), dest.path()).unwrap();

        assert_eq!(
            fs::read(dest.path().join("wasm_hashlife_bg.js")).unwrap(),
            b"export default init;"
        );
    }

    #[test]
    fn test_report_digest_matches_destination() {
        let pkg = make_pkg();
        let dest = tempfile::tempdir().unwrap();

        let report = stage_assets(pkg.path(), dest.path()).unwrap();
        let module = report.get(ArtifactKind::Module).unwrap();

        assert_eq!(
            module.digest,
            ArtifactDigest::compute(b"\0asm\x01\0\0\0body")
        );
        assert_eq!(module.dest, dest.path().join("wasm_hashlife_bg.wasm"));
    }

    #[test]
    fn test_missing_module_fails_before_any_write() {
        let pkg = make_pkg();
        fs::remove_file(pkg.path().join("wasm_hashlife_bg.wasm")).unwrap();
        let dest = tempfile::tempdir().unwrap();

        let err = stage_assets(pkg.path(), dest.path()).unwrap_err();

        assert_eq!(err.kind(), StageErrorKind::NotFound);
        assert_eq!(err.path(), Some(pkg.path().join("wasm_hashlife_bg.wasm").as_path()));
        assert_eq!(fs::read_dir(dest.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_missing_dest_dir_is_attributed_to_dest() {
        let pkg = make_pkg();
        let dest = tempfile::tempdir().unwrap();
        let missing = dest.path().join("no-such-dir");

        let err = stage_assets(pkg.path(), &missing).unwrap_err();

        assert_eq!(err.kind(), StageErrorKind::NotFound);
        assert_eq!(err.path(), Some(missing.join("wasm_hashlife_bg.wasm").as_path()));
    }

    #[test]
    fn test_directory_source_is_attributed_to_source() {
        let pkg = make_pkg();
        fs::remove_file(pkg.path().join("wasm_hashlife_bg.wasm")).unwrap();
        fs::create_dir(pkg.path().join("wasm_hashlife_bg.wasm")).unwrap();
        let dest = tempfile::tempdir().unwrap();

        let err = stage_assets(pkg.path(), dest.path()).unwrap_err();

        assert_eq!(err.kind(), StageErrorKind::Io);
        assert_eq!(err.path(), Some(pkg.path().join("wasm_hashlife_bg.wasm").as_path()));
        assert_eq!(fs::read_dir(dest.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_dest_dir_that_is_a_file_fails_on_dest() {
        let pkg = make_pkg();
        let root = tempfile::tempdir().unwrap();
        let not_a_dir = root.path().join("frontend");
        fs::write(&not_a_dir, b"plain file").unwrap();

        let err = stage_assets(pkg.path(), &not_a_dir).unwrap_err();

        assert_eq!(err.kind(), StageErrorKind::Io);
        assert_eq!(err.path(), Some(not_a_dir.join("wasm_hashlife_bg.wasm").as_path()));
        assert_eq!(fs::read(&not_a_dir).unwrap(), b"plain file");
    }

    #[test]
    fn test_invalid_set_rejected_before_copy() {
        let pkg = make_pkg();
        let dest = tempfile::tempdir().unwrap();
        let set = ArtifactSet::new("", "wasm_hashlife.js");

        let err = stage_artifacts(&set, pkg.path(), dest.path()).unwrap_err();
        assert_eq!(err.kind(), StageErrorKind::InvalidArtifactName);
        assert_eq!(fs::read_dir(dest.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_verify_after_stage_succeeds() {
        let pkg = make_pkg();
        let dest = tempfile::tempdir().unwrap();
        let set = ArtifactSet::default();

        stage_artifacts(&set, pkg.path(), dest.path()).unwrap();
        let verified = verify_staged(&set, pkg.path(), dest.path()).unwrap();

        assert_eq!(verified.len(), 2);
        assert_eq!(verified[1].kind, ArtifactKind::Loader);
    }

    #[test]
    fn test_verify_detects_stale_copy() {
        let pkg = make_pkg();
        let dest = tempfile::tempdir().unwrap();
        let set = ArtifactSet::default();

        stage_artifacts(&set, pkg.path(), dest.path()).unwrap();
        fs::write(pkg.path().join("wasm_hashlife.js"), b"export default init2;").unwrap();

        let err = verify_staged(&set, pkg.path(), dest.path()).unwrap_err();
        assert_eq!(err.kind(), StageErrorKind::DigestMismatch);
        assert_eq!(err.path(), Some(dest.path().join("wasm_hashlife_bg.js").as_path()));
    }

    #[test]
    fn test_verify_without_stage_is_not_found() {
        let pkg = make_pkg();
        let dest = tempfile::tempdir().unwrap();

        let err = verify_staged(&ArtifactSet::default(), pkg.path(), dest.path()).unwrap_err();
        assert_eq!(err.kind(), StageErrorKind::NotFound);
    }
}
