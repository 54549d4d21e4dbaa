//! Playfair subset core - range parsing and the backup/subset/replace workflow.

pub mod config;
pub mod error;
pub mod io;
pub mod ranges;
pub mod toolkit;
pub mod workflow;

pub use config::{FontVariant, Flavor, PLAYFAIR_RANGES, SubsetConfig};
pub use error::{Error, Result};
pub use ranges::{CodePointSet, RangeSpec, RangeToken, parse_ranges};
pub use toolkit::{FontToolkit, HarfBuzzToolkit};
pub use workflow::{RunSummary, StagedFont, Workflow, restore};
