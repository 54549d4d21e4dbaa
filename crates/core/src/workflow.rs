//! Backup, subset, report and replace.
//!
//! A run never modifies a source font until every variant has been subset
//! successfully. Backups are written before anything else and are never
//! removed, so an operator can always go back to the original files.

use std::{fs, path::Path};

use log::{error, info, warn};

use crate::{
    config::{FontVariant, REPORT_PATTERN, SubsetConfig},
    error::{Error, Result},
    io::{FontFile, FontListing, list_fonts},
    ranges::{CodePointSet, parse_ranges},
    toolkit::FontToolkit,
};

/// A subset written to its temporary destination, waiting to replace the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFont {
    pub variant: FontVariant,
    pub original_size: u64,
    pub subset_size: u64,
}

impl StagedFont {
    /// Percentage of the original size saved by subsetting.
    pub fn reduction(&self) -> f64 {
        if self.original_size == 0 {
            return 0.0;
        }
        (1.0 - self.subset_size as f64 / self.original_size as f64) * 100.0
    }
}

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub codepoints: usize,
    pub staged: Vec<StagedFont>,
    pub listing: Vec<FontListing>,
}

pub struct Workflow<'a, T> {
    config: &'a SubsetConfig,
    toolkit: T,
}

impl<'a, T: FontToolkit> Workflow<'a, T> {
    pub fn new(config: &'a SubsetConfig, toolkit: T) -> Self {
        Self { config, toolkit }
    }

    /// Runs every step in order and stops at the first failure.
    pub fn run(&self) -> Result<RunSummary> {
        let codepoints = parse_ranges(&self.config.ranges)?;
        info!("Subsetting to {} code points ({})", codepoints.len(), self.config.ranges);

        self.preflight()?;
        self.backup()?;
        let staged = self.stage(&codepoints)?;
        let listing = self.report()?;
        self.replace(&staged)?;

        Ok(RunSummary { codepoints: codepoints.len(), staged, listing })
    }

    /// Checks that every source font exists.
    pub fn preflight(&self) -> Result<()> {
        for variant in &self.config.variants {
            if !variant.source.is_file() {
                return Err(Error::MissingSource {
                    variant: variant.name.clone(),
                    path: variant.source.clone(),
                });
            }
        }
        Ok(())
    }

    /// Copies every source font to its backup path.
    ///
    /// An existing backup is kept as is, so later runs never replace the
    /// original font with an already subset one.
    pub fn backup(&self) -> Result<()> {
        for variant in &self.config.variants {
            if variant.backup.exists() {
                info!("Keeping existing backup {}", variant.backup.display());
                continue;
            }
            fs::copy(&variant.source, &variant.backup).map_err(|source| Error::Backup {
                variant: variant.name.clone(),
                path: variant.backup.clone(),
                source,
            })?;
            info!("Backed up {} to {}", variant.source.display(), variant.backup.display());
        }
        Ok(())
    }

    /// Subsets every variant into its temporary destination.
    ///
    /// On failure all temporary files written so far are removed.
    pub fn stage(&self, codepoints: &CodePointSet) -> Result<Vec<StagedFont>> {
        let mut staged = Vec::with_capacity(self.config.variants.len());
        for variant in &self.config.variants {
            match self.stage_variant(variant, codepoints) {
                Ok(font) => staged.push(font),
                Err(e) => {
                    discard(&staged);
                    discard_variant(variant);
                    return Err(e);
                }
            }
        }
        Ok(staged)
    }

    fn stage_variant(&self, variant: &FontVariant, codepoints: &CodePointSet) -> Result<StagedFont> {
        let io_error = |path: &Path, error| Error::Io {
            variant: variant.name.clone(),
            path: path.to_path_buf(),
            error,
        };

        let data =
            FontFile::new(&variant.source).read().map_err(|e| io_error(&variant.source, e))?;
        let subset = self
            .toolkit
            .subset(&data, codepoints)
            .map_err(|error| Error::Subset { variant: variant.name.clone(), error })?;
        FontFile::new(&variant.temp_dest)
            .write(&subset)
            .map_err(|e| io_error(&variant.temp_dest, e))?;

        let font = StagedFont {
            variant: variant.clone(),
            original_size: data.len() as u64,
            subset_size: subset.len() as u64,
        };
        info!(
            "Subset {} ({} -> {} bytes, {:.1}% reduction)",
            variant.name,
            font.original_size,
            font.subset_size,
            font.reduction()
        );
        Ok(font)
    }

    /// Lists the fonts directory with file sizes.
    pub fn report(&self) -> Result<Vec<FontListing>> {
        let listing = list_fonts(&self.config.fonts_dir, REPORT_PATTERN).map_err(|error| {
            Error::Listing { path: self.config.fonts_dir.clone(), error }
        })?;
        for font in &listing {
            info!("{:>10}  {}", font.size, font.file_name());
        }
        Ok(listing)
    }

    /// Moves every staged subset over its source.
    ///
    /// If a rename fails, sources replaced earlier in the same call are
    /// restored from their backups and the remaining temporary files are
    /// removed.
    pub fn replace(&self, staged: &[StagedFont]) -> Result<()> {
        for (i, font) in staged.iter().enumerate() {
            let variant = &font.variant;
            if let Err(source) = fs::rename(&variant.temp_dest, &variant.source) {
                rollback(&staged[..i]);
                discard(&staged[i..]);
                return Err(Error::Replace {
                    variant: variant.name.clone(),
                    path: variant.source.clone(),
                    source,
                });
            }
            info!("Replaced {}", variant.source.display());
        }
        Ok(())
    }
}

fn discard(staged: &[StagedFont]) {
    for font in staged {
        discard_variant(&font.variant);
    }
}

fn discard_variant(variant: &FontVariant) {
    if let Err(e) = FontFile::new(&variant.temp_dest).remove() {
        warn!("{e:#}");
    }
}

fn rollback(replaced: &[StagedFont]) {
    for font in replaced {
        let variant = &font.variant;
        match fs::copy(&variant.backup, &variant.source) {
            Ok(_) => warn!("Restored {} from backup", variant.source.display()),
            Err(e) => error!(
                "Failed to restore {} from {}: {e}",
                variant.source.display(),
                variant.backup.display()
            ),
        }
    }
}

/// Copies every backup over its source font.
///
/// All backups must exist before anything is copied.
pub fn restore(config: &SubsetConfig) -> Result<Vec<FontVariant>> {
    if let Some(variant) = config.variants.iter().find(|v| !v.backup.is_file()) {
        return Err(Error::MissingBackup {
            variant: variant.name.clone(),
            path: variant.backup.clone(),
        });
    }

    for variant in &config.variants {
        fs::copy(&variant.backup, &variant.source).map_err(|source| Error::Restore {
            variant: variant.name.clone(),
            path: variant.backup.clone(),
            source,
        })?;
        info!("Restored {} from {}", variant.source.display(), variant.backup.display());
    }
    Ok(config.variants.clone())
}
