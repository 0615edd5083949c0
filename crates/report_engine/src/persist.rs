use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("output directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Staged report files, committed together once every artifact is rendered.
///
/// Rendering happens entirely in memory; nothing touches the output
/// directory until [`OutputStage::commit`], and each file lands via a temp
/// file rename so an interrupted run cannot leave a half-written report.
pub struct OutputStage {
    dir: PathBuf,
    files: Vec<(String, String)>,
}

impl OutputStage {
    /// Validate the output directory, creating it if missing, and open an
    /// empty stage for it.
    pub fn new(dir: &Path) -> Result<Self, PersistError> {
        if dir.exists() {
            let meta = fs::metadata(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
            if !meta.is_dir() {
                return Err(PersistError::OutputDir(format!(
                    "{} is not a directory",
                    dir.display()
                )));
            }
        } else {
            fs::create_dir_all(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
        }
        // Basic writability probe: try creating a temp file.
        NamedTempFile::new_in(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
        Ok(Self {
            dir: dir.to_path_buf(),
            files: Vec::new(),
        })
    }

    /// Queue one rendered file for the commit.
    pub fn stage(&mut self, filename: &str, content: String) {
        self.files.push((filename.to_string(), content));
    }

    /// Write every staged file, replacing existing ones, and return the
    /// target paths in staging order.
    ///
    /// Every file is spilled to a temp neighbor before the first rename,
    /// and a failure while renaming unlinks the files already in place, so
    /// the directory ends up with the whole report or none of it.
    pub fn commit(self) -> Result<Vec<PathBuf>, PersistError> {
        let mut pending = Vec::with_capacity(self.files.len());
        for (filename, content) in &self.files {
            let mut tmp = NamedTempFile::new_in(&self.dir)?;
            tmp.write_all(content.as_bytes())?;
            tmp.flush()?;
            tmp.as_file_mut().sync_all()?;
            pending.push((self.dir.join(filename), tmp));
        }

        let mut written: Vec<PathBuf> = Vec::with_capacity(pending.len());
        for (target, tmp) in pending {
            if let Err(err) = replace_file(tmp, &target) {
                // Back out the files already renamed into place.
                for done in &written {
                    let _ = fs::remove_file(done);
                }
                return Err(err);
            }
            written.push(target);
        }
        Ok(written)
    }
}

/// Move a finished temp file onto `target`, replacing any existing file.
fn replace_file(tmp: NamedTempFile, target: &Path) -> Result<(), PersistError> {
    if target.exists() {
        fs::remove_file(target)?;
    }
    tmp.persist(target).map_err(|e| PersistError::Io(e.error))?;
    Ok(())
}
