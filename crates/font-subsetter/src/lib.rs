//! Font subsetting wrapper around hb-subset with builder pattern.
//!
//! This crate provides a high-level interface for subsetting fonts using HarfBuzz's
//! hb-subset library. It operates purely on raw sfnt byte slices with no file I/O
//! and no knowledge of web font containers; decode WOFF2 before calling it.
//!
//! # Example
//!
//! ```no_run
//! use playfair_font_subsetter::Subsetter;
//!
//! let font_data: &[u8] = &[];
//! let subset = Subsetter::latin()
//!     .with_codepoints([0x20, 0x41, 0x42])
//!     .subset(font_data);
//! ```

use std::collections::BTreeSet;

use anyhow::{Context, Result};
use hb_subset::{Blob, FontFace, SubsetInput, Tag};
use read_fonts::{FontRef, TableProvider, tables::cmap::CmapSubtable, types::GlyphId};

/// Layout features to retain for Latin text.
///
/// HarfBuzz keeps its own default feature list; these are added on top so
/// that typographic extras of display serifs (small caps, old-style figures,
/// discretionary ligatures, stylistic sets) survive subsetting.
pub const LATIN_LAYOUT_FEATURES: &[&[u8; 4]] = &[
    b"ccmp", b"locl", b"mark", b"mkmk", b"kern", b"liga", b"dlig", b"calt", b"case", b"smcp",
    b"c2sc", b"onum", b"lnum", b"pnum", b"tnum", b"frac", b"dnom", b"numr", b"ordn", b"sups",
    b"subs", b"sinf", b"zero", b"swsh", b"ss01", b"ss02", b"ss03",
];

/// Font subsetter with builder pattern.
///
/// Collects the code points to keep and the layout features to retain, then
/// hands both to hb-subset.
#[derive(Debug, Default, Clone)]
pub struct Subsetter {
    codepoints: BTreeSet<u32>,
    layout_features: Vec<[u8; 4]>,
}

impl Subsetter {
    /// Creates a subsetter that retains [`LATIN_LAYOUT_FEATURES`].
    pub fn latin() -> Self {
        Self {
            layout_features: LATIN_LAYOUT_FEATURES.iter().map(|f| **f).collect(),
            ..Default::default()
        }
    }

    /// Adds code points to keep.
    pub fn with_codepoints(mut self, codepoints: impl IntoIterator<Item = u32>) -> Self {
        self.codepoints.extend(codepoints);
        self
    }

    /// Subsets raw sfnt data and returns the result.
    ///
    /// Code points that are not Unicode scalar values (surrogates) are skipped.
    /// Code points the font does not map are ignored by HarfBuzz.
    pub fn subset(&self, data: &[u8]) -> Result<Vec<u8>> {
        let mut input = SubsetInput::new()?;

        {
            let mut feature_set = input.layout_feature_tag_set();
            for tag in &self.layout_features {
                feature_set.insert(Tag::new(tag));
            }
        }

        {
            let mut unicode_set = input.unicode_set();
            for c in self.codepoints.iter().filter_map(|cp| char::from_u32(*cp)) {
                unicode_set.insert(c);
            }
        }

        let font = FontFace::new(Blob::from_bytes(data)?)?;
        let subset_font = input.subset_font(&font)?;
        Ok(subset_font.underlying_blob().to_vec())
    }
}

/// Checks that hb-subset can allocate a subset plan input.
///
/// Fails when the HarfBuzz subsetter is unusable in this build.
pub fn probe() -> Result<()> {
    SubsetInput::new().context("hb-subset could not create a subset input")?;
    Ok(())
}

/// Returns every code point the format 4 and format 12 cmap subtables map
/// to a glyph other than `.notdef`.
pub fn mapped_codepoints(data: &[u8]) -> Result<BTreeSet<u32>> {
    let font = FontRef::new(data).context("Failed to parse font")?;
    let cmap = font.cmap().context("Failed to read cmap table")?;

    let mut codepoints = BTreeSet::new();
    for record in cmap.encoding_records() {
        let mapped: Box<dyn Iterator<Item = (u32, GlyphId)>> =
            match record.subtable(cmap.offset_data()) {
                Ok(CmapSubtable::Format4(f4)) => Box::new(f4.iter()),
                Ok(CmapSubtable::Format12(f12)) => Box::new(f12.iter()),
                _ => continue,
            };
        codepoints.extend(mapped.filter(|(_, gid)| gid.to_u32() != 0).map(|(cp, _)| cp));
    }
    Ok(codepoints)
}

/// Returns the number of glyphs declared in the `maxp` table.
pub fn glyph_count(data: &[u8]) -> Result<u16> {
    let font = FontRef::new(data).context("Failed to parse font")?;
    let maxp = font.maxp().context("Failed to read maxp table")?;
    Ok(maxp.num_glyphs())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_chain() {
        let subsetter =
            Subsetter::latin().with_codepoints([0x41, 0x42]).with_codepoints([0x42, 0x61]);

        assert_eq!(subsetter.codepoints.len(), 3);
        assert_eq!(subsetter.layout_features.len(), LATIN_LAYOUT_FEATURES.len());
    }

    #[test]
    fn test_subset_input_available() {
        assert!(probe().is_ok());
    }

    #[test]
    fn test_mapped_codepoints() {
        let codepoints = mapped_codepoints(font_test_data::CMAP12_FONT1).unwrap();
        assert!(!codepoints.is_empty());
    }

    #[test]
    fn test_subset_keeps_only_requested_codepoints() {
        let data = font_test_data::NOTO_SERIF_DISPLAY_TRIMMED;
        let original = mapped_codepoints(data).unwrap();
        let keep: Vec<u32> = original.iter().copied().take(1).collect();

        let subset = Subsetter::latin().with_codepoints(keep.iter().copied()).subset(data).unwrap();
        let retained = mapped_codepoints(&subset).unwrap();

        assert!(retained.iter().all(|cp| keep.contains(cp)));
        assert!(glyph_count(&subset).unwrap() <= glyph_count(data).unwrap());
    }

    #[test]
    fn test_subset_full_range_keeps_cmap() {
        let data = font_test_data::NOTO_SERIF_DISPLAY_TRIMMED;
        let subset = Subsetter::latin().with_codepoints(0..=0x10FFFF).subset(data).unwrap();

        assert_eq!(mapped_codepoints(&subset).unwrap(), mapped_codepoints(data).unwrap());
    }
}
