use std::{io, path::PathBuf, result};

use crate::ranges::RangeError;

/// Error types for a subset run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid range specification: {0}")]
    Ranges(#[from] RangeError),

    #[error("source font for {variant} not found: {}", path.display())]
    MissingSource { variant: String, path: PathBuf },

    #[error("backup for {variant} not found: {}", path.display())]
    MissingBackup { variant: String, path: PathBuf },

    #[error("failed to back up {variant} to {}: {source}", path.display())]
    Backup { variant: String, path: PathBuf, source: io::Error },

    #[error("failed to read or write {variant} at {}: {error:#}", path.display())]
    Io { variant: String, path: PathBuf, error: anyhow::Error },

    #[error("failed to subset {variant}: {error:#}")]
    Subset { variant: String, error: anyhow::Error },

    #[error("failed to replace {variant} at {}: {source}", path.display())]
    Replace { variant: String, path: PathBuf, source: io::Error },

    #[error("failed to restore {variant} from {}: {source}", path.display())]
    Restore { variant: String, path: PathBuf, source: io::Error },

    #[error("failed to list fonts in {}: {error:#}", path.display())]
    Listing { path: PathBuf, error: anyhow::Error },
}

pub type Result<T> = result::Result<T, Error>;
