//! The font-manipulation libraries the workflow delegates to.

use anyhow::Result;
use log::{debug, info};
use playfair_font_subsetter::{Subsetter, glyph_count, mapped_codepoints, probe};
use playfair_font_woff2::{decode, encode, is_woff2};

use crate::{config::Flavor, ranges::CodePointSet};

/// Loads a font, keeps only glyphs reachable from a code point set, and saves it.
///
/// Glyph closure over composites and layout tables is the implementation's job.
pub trait FontToolkit {
    fn subset(&self, data: &[u8], codepoints: &CodePointSet) -> Result<Vec<u8>>;
}

/// HarfBuzz subsetting with WOFF2 decoding and encoding around it.
#[derive(Debug, Clone, Copy, Default)]
pub struct HarfBuzzToolkit {
    flavor: Flavor,
}

impl HarfBuzzToolkit {
    pub fn new(flavor: Flavor) -> Self {
        Self { flavor }
    }

    /// Fails if hb-subset cannot be used in this build.
    pub fn probe() -> Result<()> {
        probe()
    }
}

impl FontToolkit for HarfBuzzToolkit {
    fn subset(&self, data: &[u8], codepoints: &CodePointSet) -> Result<Vec<u8>> {
        if is_woff2(data) {
            debug!("Decoding WOFF2 input ({} bytes)", data.len());
        }
        let sfnt = decode(data)?;

        let covered = mapped_codepoints(&sfnt)?
            .into_iter()
            .filter(|cp| codepoints.contains(*cp))
            .count();
        if covered < codepoints.len() {
            info!("Font maps {covered} of {} requested code points", codepoints.len());
        }

        let subset = Subsetter::latin().with_codepoints(codepoints.iter()).subset(&sfnt)?;

        info!("Glyphs: {} -> {}", glyph_count(&sfnt)?, glyph_count(&subset)?);

        match self.flavor {
            Flavor::Woff2 => encode(&subset),
            Flavor::Sfnt => Ok(subset),
        }
    }
}
