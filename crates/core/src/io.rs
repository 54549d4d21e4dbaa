//! Font file I/O helpers.

use std::{
    fs::{self, read, write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use glob::glob;

/// A font file handle for I/O operations.
#[derive(Debug, Clone)]
pub struct FontFile {
    path: PathBuf,
}

impl FontFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read font data from the file.
    pub fn read(&self) -> Result<Vec<u8>> {
        read(&self.path).with_context(|| format!("Failed to read font: {}", self.path.display()))
    }

    /// Write font data to the file.
    pub fn write(&self, data: impl AsRef<[u8]>) -> Result<()> {
        write(&self.path, data)
            .with_context(|| format!("Failed to write font: {}", self.path.display()))
    }

    /// Remove the file, ignoring a file that is already gone.
    pub fn remove(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => {
                Err(e).with_context(|| format!("Failed to remove font: {}", self.path.display()))
            }
        }
    }
}

/// A font file and its size on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontListing {
    pub path: PathBuf,
    pub size: u64,
}

impl FontListing {
    pub fn file_name(&self) -> String {
        self.path.file_name().unwrap_or_default().to_string_lossy().into_owned()
    }
}

/// Find fonts matching a glob pattern in a directory.
pub fn glob_fonts(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let pattern = dir.join(pattern);
    let pattern_str = pattern.to_str().context("Invalid pattern path")?;
    Ok(glob(pattern_str)
        .with_context(|| format!("Failed to glob pattern: {pattern_str}"))?
        .filter_map(Result::ok)
        .collect())
}

/// List fonts matching `pattern` in `dir` with their sizes, sorted by path.
pub fn list_fonts(dir: &Path, pattern: &str) -> Result<Vec<FontListing>> {
    let mut listings = glob_fonts(dir, pattern)?
        .into_iter()
        .map(|path| {
            let size = fs::metadata(&path)
                .with_context(|| format!("Failed to stat font: {}", path.display()))?
                .len();
            Ok(FontListing { path, size })
        })
        .collect::<Result<Vec<_>>>()?;
    listings.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(listings)
}

/// Human-readable size in the style of `ls -lh`.
pub fn human_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "K", "M", "G"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 { format!("{bytes}B") } else { format!("{size:.1}{}", UNITS[unit]) }
}
