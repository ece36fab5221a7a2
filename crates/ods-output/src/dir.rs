//! Per-run output directories.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

/// `dd_mm_YYYY__HH_MM_SS.ffffff`
pub const TIMESTAMP_FORMAT: &str = "%d_%m_%Y__%H_%M_%S%.6f";

/// Name of the empty marker written after a completed batch.
pub const SUCCESS_MARKER: &str = ".success";

/// A freshly created, exclusively owned run directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunDirectory {
    path: PathBuf,
}

impl RunDirectory {
    /// Create `<output_dir>/data/<timestamp>`.
    ///
    /// If another run already took that name, `-1`, `-2`, … is appended
    /// until creation succeeds, so concurrent runs never share a directory.
    pub fn create(output_dir: &Path, at: NaiveDateTime) -> io::Result<Self> {
        let data = output_dir.join("data");
        fs::create_dir_all(&data)?;

        let stem = at.format(TIMESTAMP_FORMAT).to_string();
        let mut name = stem.clone();
        for attempt in 1..=u16::MAX {
            let path = data.join(&name);
            match fs::create_dir(&path) {
                Ok(()) => return Ok(Self { path }),
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                    name = format!("{stem}-{attempt}");
                }
                Err(e) => return Err(e),
            }
        }
        Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("every run directory name for {stem} is taken"),
        ))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of `file` inside the run directory.
    pub fn file(&self, file: &str) -> PathBuf {
        self.path.join(file)
    }
}

/// Write the empty `<output_dir>/.success` marker.
pub fn write_success_marker(output_dir: &Path) -> io::Result<PathBuf> {
    fs::create_dir_all(output_dir)?;
    let path = output_dir.join(SUCCESS_MARKER);
    fs::write(&path, "")?;
    Ok(path)
}
