//! End-to-end runs with HarfBuzz on real TrueType data.
//!
//! Fixtures come from font-test-data and are compressed to WOFF2 before each
//! run so the whole decode/subset/encode path is exercised.

use std::fs;

use playfair_font_subsetter::mapped_codepoints;
use playfair_font_woff2::{decode, encode, is_woff2};
use playfair_subset_core::{
    CodePointSet, Error, Flavor, FontToolkit, HarfBuzzToolkit, SubsetConfig, Workflow,
    parse_ranges,
};
use tempfile::TempDir;

const FONT: &[u8] = font_test_data::NOTO_SERIF_DISPLAY_TRIMMED;

fn setup() -> (TempDir, SubsetConfig, Vec<u8>) {
    let dir = tempfile::tempdir().unwrap();
    let woff2 = encode(FONT).unwrap();
    fs::write(dir.path().join("Playfair.woff2"), &woff2).unwrap();
    fs::write(dir.path().join("Playfair-Italic.woff2"), &woff2).unwrap();
    let config = SubsetConfig::playfair(dir.path());
    (dir, config, woff2)
}

#[test]
fn test_full_range_keeps_every_mapped_codepoint() {
    let toolkit = HarfBuzzToolkit::new(Flavor::Sfnt);
    let full = parse_ranges("U+0000-10FFFF").unwrap();

    let subset = toolkit.subset(FONT, &full).unwrap();

    assert_eq!(mapped_codepoints(&subset).unwrap(), mapped_codepoints(FONT).unwrap());
}

#[test]
fn test_woff2_input_and_output() {
    let toolkit = HarfBuzzToolkit::default();
    let woff2 = encode(FONT).unwrap();
    let latin = parse_ranges("U+0020-007F").unwrap();

    let subset = toolkit.subset(&woff2, &latin).unwrap();

    assert!(is_woff2(&subset));
    let retained = mapped_codepoints(&decode(&subset).unwrap()).unwrap();
    assert!(retained.iter().all(|cp| latin.contains(*cp)));
}

#[test]
fn test_run_subsets_both_variants() {
    let (_dir, config, original) = setup();
    let config = config.with_ranges("U+0041-0042");
    let requested: CodePointSet = parse_ranges(&config.ranges).unwrap();

    let summary = Workflow::new(&config, HarfBuzzToolkit::default()).run().unwrap();
    assert_eq!(summary.codepoints, 2);
    assert_eq!(summary.staged.len(), 2);

    for variant in &config.variants {
        assert_eq!(fs::read(&variant.backup).unwrap(), original);
        assert!(!variant.temp_dest.exists());

        let replaced = fs::read(&variant.source).unwrap();
        assert!(is_woff2(&replaced));
        assert!(replaced.len() <= original.len());

        let retained = mapped_codepoints(&decode(&replaced).unwrap()).unwrap();
        assert!(retained.iter().all(|cp| requested.contains(*cp)));
    }
}

#[test]
fn test_corrupt_italic_leaves_sources_untouched() {
    let (_dir, config, original) = setup();
    let [regular, italic] = &config.variants[..] else { panic!("expected two variants") };
    fs::write(&italic.source, b"not a font").unwrap();

    let err = Workflow::new(&config, HarfBuzzToolkit::default()).run().unwrap_err();
    assert!(matches!(err, Error::Subset { ref variant, .. } if variant == "italic"));

    assert_eq!(fs::read(&regular.source).unwrap(), original);
    assert_eq!(fs::read(&regular.backup).unwrap(), original);
    assert!(!regular.temp_dest.exists());
    assert!(!italic.temp_dest.exists());
}
