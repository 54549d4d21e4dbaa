//! Text printed after a run.

use playfair_subset_core::{FontVariant, RunSummary, io::human_size};

/// Per-variant sizes followed by the font directory listing.
pub fn format_summary(summary: &RunSummary) -> String {
    let mut out = format!("Kept {} code points\n", summary.codepoints);
    for font in &summary.staged {
        out.push_str(&format!(
            "{:<8} {:>8} -> {:>8} ({:.1}% reduction)\n",
            font.variant.name,
            human_size(font.original_size),
            human_size(font.subset_size),
            font.reduction()
        ));
    }

    out.push_str("\nFont sizes:\n");
    for font in &summary.listing {
        out.push_str(&format!("{:>8}  {}\n", human_size(font.size), font.file_name()));
    }

    out.push_str("\nBackups kept: *.backup\n");
    out
}

pub fn format_restored(restored: &[FontVariant]) -> String {
    restored
        .iter()
        .map(|variant| {
            format!("Restored {} from {}\n", variant.source.display(), variant.backup.display())
        })
        .collect()
}
