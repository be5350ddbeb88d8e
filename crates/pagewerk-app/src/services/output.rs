// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Output staging: results are written to temporary files next to their
// destinations and only moved into place once every file of a command has
// been written. A failed or abandoned command leaves no partial output; the
// temporary files are deleted when the batch is dropped.

use std::io::Write;
use std::path::{Path, PathBuf};

use pagewerk_core::error::{PagewerkError, Result};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// A set of output files that become visible together.
#[derive(Default)]
pub struct OutputBatch {
    staged: Vec<(NamedTempFile, PathBuf)>,
}

impl OutputBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write `bytes` to a temporary file in `destination`'s directory.
    pub fn stage(&mut self, destination: impl Into<PathBuf>, bytes: &[u8]) -> Result<()> {
        let destination = destination.into();
        let dir = parent_dir(&destination);

        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(bytes)?;
        file.as_file().sync_all()?;

        debug!(
            destination = %destination.display(),
            bytes = bytes.len(),
            "Output staged"
        );
        self.staged.push((file, destination));
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.staged.len()
    }

    /// Move every staged file to its destination, replacing existing files.
    pub fn commit(self) -> Result<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(self.staged.len());
        for (file, destination) in self.staged {
            file.persist(&destination).map_err(|err| {
                PagewerkError::Io(std::io::Error::new(
                    err.error.kind(),
                    format!("cannot write {}: {}", destination.display(), err.error),
                ))
            })?;
            info!(path = %destination.display(), "Wrote output");
            written.push(destination);
        }
        Ok(written)
    }
}

/// Write a single output file through a temporary file.
pub fn write_output(destination: &Path, bytes: &[u8]) -> Result<()> {
    let mut batch = OutputBatch::new();
    batch.stage(destination, bytes)?;
    batch.commit()?;
    Ok(())
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}
