//! CLI definitions and command dispatch.

use std::{path::PathBuf, process::ExitCode};

use clap::{Parser, Subcommand};
use playfair_subset_core::{
    Flavor, HarfBuzzToolkit, PLAYFAIR_RANGES, SubsetConfig, Workflow, config::PLAYFAIR_FONTS_DIR,
    restore,
};

use crate::summary::{format_restored, format_summary};

pub const EXIT_SUCCESS: u8 = 0;

/// Exit code when the HarfBuzz subsetter cannot be used.
pub const EXIT_TOOLKIT_UNAVAILABLE: u8 = 1;

/// Exit code when a run or a restore fails part way.
pub const EXIT_WORKFLOW_FAILED: u8 = 2;

#[derive(Parser)]
#[command(name = "playfair-subset", version)]
#[command(about = "Subset the Playfair web fonts to Latin and European accented characters")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub args: SubsetArgs,
}

#[derive(Debug, Clone, clap::Args)]
pub struct SubsetArgs {
    /// Directory holding Playfair.woff2 and Playfair-Italic.woff2
    #[arg(long, global = true, default_value = PLAYFAIR_FONTS_DIR)]
    pub fonts_dir: PathBuf,

    /// Unicode ranges to keep, e.g. U+0020-007F,U+00A0-00FF
    #[arg(long, default_value = PLAYFAIR_RANGES)]
    pub ranges: String,

    /// Output format of the subset fonts; sfnt writes raw TrueType under the same .woff2 file names
    #[arg(long, default_value_t = Flavor::Woff2)]
    pub flavor: Flavor,
}

impl SubsetArgs {
    pub fn config(&self) -> SubsetConfig {
        SubsetConfig::playfair(&self.fonts_dir)
            .with_ranges(&self.ranges)
            .with_flavor(self.flavor)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Copy the .backup files back over the source fonts
    Restore,
}

impl Cli {
    pub fn run(self) -> ExitCode {
        ExitCode::from(self.status())
    }

    /// Runs the selected command and returns the process exit status.
    pub fn status(self) -> u8 {
        let config = self.args.config();
        match self.command {
            Some(Commands::Restore) => run_restore(&config),
            None => run_subset(&config),
        }
    }
}

fn run_subset(config: &SubsetConfig) -> u8 {
    if let Err(e) = HarfBuzzToolkit::probe() {
        eprintln!("Error: HarfBuzz subsetting is unavailable: {e:#}");
        eprintln!("hint: build with the `bundled` feature of hb-subset or install HarfBuzz 8+");
        return EXIT_TOOLKIT_UNAVAILABLE;
    }

    match Workflow::new(config, HarfBuzzToolkit::new(config.flavor)).run() {
        Ok(summary) => {
            print!("{}", format_summary(&summary));
            EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Backups written before the failure are kept as *.backup");
            EXIT_WORKFLOW_FAILED
        }
    }
}

fn run_restore(config: &SubsetConfig) -> u8 {
    match restore(config) {
        Ok(restored) => {
            print!("{}", format_restored(&restored));
            EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_WORKFLOW_FAILED
        }
    }
}
