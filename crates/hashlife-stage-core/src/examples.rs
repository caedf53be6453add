//! Example enumerator.
//!
//! Lists the direct children of the frontend's `examples` directory for
//! inspection. Entries are only observed; nothing is copied.

use std::fs::ReadDir;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, StageError};

/// Lazy, non-recursive iterator over an examples directory.
///
/// Yields entries in the order the filesystem returns them.
pub struct ExampleEntries {
    dir: PathBuf,
    inner: ReadDir,
}

impl Iterator for ExampleEntries {
    type Item = Result<PathBuf>;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.inner.next()?;
        Some(
            entry
                .map(|e| self.dir.join(e.file_name()))
                .map_err(|e| StageError::from_io(&self.dir, e)),
        )
    }
}

/// Open `examples_dir` for enumeration.
///
/// The directory is opened eagerly, so a missing directory fails here
/// before anything is yielded.
pub fn list_examples(examples_dir: &Path) -> Result<ExampleEntries> {
    let inner = std::fs::read_dir(examples_dir).map_err(|e| StageError::from_io(examples_dir, e))?;
    Ok(ExampleEntries {
        dir: examples_dir.to_path_buf(),
        inner,
    })
}

/// Write every example path to `out`, one per line. Returns the count.
///
/// On unix the raw path bytes are written, so names that are not valid
/// UTF-8 come out unchanged. Elsewhere the path is rendered lossily.
pub fn print_examples<W: Write>(examples_dir: &Path, out: &mut W) -> Result<usize> {
    let mut count = 0;
    for entry in list_examples(examples_dir)? {
        let path = entry?;
        debug!(path = %path.display(), "example entry");
        write_path_line(out, &path).map_err(|e| StageError::Io {
            path: path.clone(),
            source: e,
        })?;
        count += 1;
    }
    Ok(count)
}

#[cfg(unix)]
fn write_path_line<W: Write>(out: &mut W, path: &Path) -> std::io::Result<()> {
    use std::os::unix::ffi::OsStrExt;

    out.write_all(path.as_os_str().as_bytes())?;
    out.write_all(b"\n")
}

#[cfg(not(unix))]
fn write_path_line<W: Write>(out: &mut W, path: &Path) -> std::io::Result<()> {
    writeln!(out, "{}", path.display())
}
