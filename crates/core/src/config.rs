//! Configuration for Playfair subset builds.

use std::{
    ffi::OsString,
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

/// Basic Latin, Latin-1 Supplement, Latin Extended-A/B and Latin Extended Additional.
pub const PLAYFAIR_RANGES: &str = "U+0020-007F,U+00A0-00FF,U+0100-017F,U+0180-024F,U+1E00-1EFF";

/// Fonts directory, relative to the project root.
pub const PLAYFAIR_FONTS_DIR: &str = "public/fonts/Playfair";

/// Regular source font filename.
pub const PLAYFAIR_REGULAR_FILENAME: &str = "Playfair.woff2";

/// Italic source font filename.
pub const PLAYFAIR_ITALIC_FILENAME: &str = "Playfair-Italic.woff2";

/// Appended to a source filename to form its backup.
pub const BACKUP_SUFFIX: &str = ".backup";

/// Appended to a source file stem to form its temporary subset output.
pub const SUBSET_SUFFIX: &str = "-subset";

/// Files shown in the size report after staging.
pub const REPORT_PATTERN: &str = "*.woff2";

/// Output format written by the subsetter.
///
/// Either way the fonts keep their `.woff2` file names, so `Sfnt` leaves raw
/// TrueType data behind a `.woff2` extension.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Flavor {
    /// Compressed web font.
    #[default]
    Woff2,
    /// Raw TrueType/OpenType data.
    Sfnt,
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Flavor::Woff2 => "woff2",
            Flavor::Sfnt => "sfnt",
        })
    }
}

impl FromStr for Flavor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "woff2" => Ok(Flavor::Woff2),
            "sfnt" | "ttf" | "otf" => Ok(Flavor::Sfnt),
            other => Err(format!("unknown flavor: {other} (expected woff2 or sfnt)")),
        }
    }
}

/// One font file taking part in a subset run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontVariant {
    pub name: String,
    pub source: PathBuf,
    pub backup: PathBuf,
    pub temp_dest: PathBuf,
}

impl FontVariant {
    /// Derives the backup and temporary paths from a source filename in `dir`.
    ///
    /// `Playfair.woff2` becomes `Playfair.woff2.backup` and `Playfair-subset.woff2`.
    pub fn new(name: impl Into<String>, dir: &Path, filename: &str) -> Self {
        let source = dir.join(filename);

        let mut backup = OsString::from(filename);
        backup.push(BACKUP_SUFFIX);

        let path = Path::new(filename);
        let mut temp = path.file_stem().map(OsString::from).unwrap_or_default();
        temp.push(SUBSET_SUFFIX);
        if let Some(ext) = path.extension() {
            temp.push(".");
            temp.push(ext);
        }

        Self {
            name: name.into(),
            source,
            backup: dir.join(backup),
            temp_dest: dir.join(temp),
        }
    }
}

/// Everything a subset run needs to know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubsetConfig {
    pub ranges: String,
    pub fonts_dir: PathBuf,
    pub variants: Vec<FontVariant>,
    pub flavor: Flavor,
}

impl SubsetConfig {
    pub fn new(
        ranges: impl Into<String>,
        fonts_dir: impl Into<PathBuf>,
        variants: Vec<FontVariant>,
    ) -> Self {
        Self {
            ranges: ranges.into(),
            fonts_dir: fonts_dir.into(),
            variants,
            flavor: Flavor::default(),
        }
    }

    /// The Playfair regular and italic web fonts in `fonts_dir`.
    pub fn playfair(fonts_dir: impl Into<PathBuf>) -> Self {
        let fonts_dir = fonts_dir.into();
        let variants = vec![
            FontVariant::new("regular", &fonts_dir, PLAYFAIR_REGULAR_FILENAME),
            FontVariant::new("italic", &fonts_dir, PLAYFAIR_ITALIC_FILENAME),
        ];
        Self::new(PLAYFAIR_RANGES, fonts_dir, variants)
    }

    pub fn with_ranges(mut self, ranges: impl Into<String>) -> Self {
        self.ranges = ranges.into();
        self
    }

    pub fn with_flavor(mut self, flavor: Flavor) -> Self {
        self.flavor = flavor;
        self
    }
}

impl Default for SubsetConfig {
    fn default() -> Self {
        Self::playfair(PLAYFAIR_FONTS_DIR)
    }
}
