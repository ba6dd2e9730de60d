//! Scratch space for in-progress outputs.

use crate::{Error, Result};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Prefix of scratch directories, so leftovers are easy to spot.
const SCRATCH_PREFIX: &str = ".tubeprep-";

/// Scratch directory next to an item's files.
///
/// Outputs are written here first and moved into place only when the
/// producing tool succeeded. The directory is created inside the target
/// directory so the final move is a same-filesystem rename, and it is
/// removed on drop whatever happened.
///
/// # Example
///
/// ```no_run
/// use tubeprep_av::Workspace;
///
/// let workspace = Workspace::new_in("/videos/Channel")?;
/// let scratch = workspace.temp_file("[abcdefghij1].mp4");
/// // ... write `scratch` ...
/// workspace.finalize(&scratch, "/videos/Channel/[abcdefghij1].mp4".as_ref())?;
/// # Ok::<(), tubeprep_av::Error>(())
/// ```
pub struct Workspace {
    temp_dir: TempDir,
}

impl Workspace {
    /// Create a new scratch directory inside `dir`.
    pub fn new_in<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let temp_dir = tempfile::Builder::new()
            .prefix(SCRATCH_PREFIX)
            .tempdir_in(dir.as_ref())
            .map_err(|e| Error::Workspace(e.to_string()))?;

        Ok(Self { temp_dir })
    }

    /// Get the temp directory path.
    pub fn temp_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create a temp file path with the given name.
    pub fn temp_file(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }

    /// Move a finished scratch file to its destination.
    ///
    /// An existing destination is moved aside first and restored if the
    /// move fails.
    pub fn finalize(self, scratch: &Path, dest: &Path) -> Result<PathBuf> {
        if !scratch.exists() {
            return Err(Error::Workspace(format!(
                "Output file does not exist: {:?}",
                scratch
            )));
        }

        if dest.exists() {
            let backup = dest.with_extension("bak");
            std::fs::rename(dest, &backup).map_err(|e| {
                Error::Workspace(format!("Failed to move existing output aside: {}", e))
            })?;

            if let Err(e) = std::fs::rename(scratch, dest) {
                let _ = std::fs::rename(&backup, dest);
                return Err(Error::Workspace(format!(
                    "Failed to move output to destination: {}",
                    e
                )));
            }

            let _ = std::fs::remove_file(&backup);
        } else {
            std::fs::rename(scratch, dest).map_err(|e| {
                Error::Workspace(format!("Failed to move output to destination: {}", e))
            })?;
        }

        Ok(dest.to_path_buf())
    }
}
