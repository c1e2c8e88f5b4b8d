//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. Every note leads with
//! its positional index and title; the source file, date, and summary follow
//! as indented context lines. This reads as a content inventory while still
//! letting users trace each entry back to a file.
//!
//! # Output Format
//!
//! ## Check / build inventory
//!
//! ```text
//! Notes
//! 001 Hello World
//!     Source: notes/010-hello-world.md
//!     Date: January 15, 2024
//!     Why I started writing notes again.
//! 002 Scratchpad
//!     Source: notes/scratchpad.md
//!
//! Config
//!     config.toml
//!     assets/
//! ```
//!
//! ## Generate
//!
//! ```text
//! Home → index.html
//! Notes → notes/index.html
//!     001 Hello World → notes/hello-world/index.html
//!
//! Generated 2 pages, 1 note, 1 asset
//! ```
//!
//! A `Removed N stale note directories` line precedes the summary when a
//! rebuild deleted pages of notes that no longer exist.
//!
//! # Architecture
//!
//! Each section has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O beyond existence checks, no side effects.

use crate::content::NoteSource;
use crate::generate::{ASSETS_DIR, GenerateReport};
use std::path::Path;

/// Characters of summary shown under each note.
const SUMMARY_PREVIEW: usize = 60;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// `"1 note"` / `"3 notes"`.
fn plural(n: usize, singular: &str) -> String {
    if n == 1 {
        format!("{n} {singular}")
    } else {
        format!("{n} {singular}s")
    }
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{}...", cut)
    }
}

// ============================================================================
// Inventory
// ============================================================================

/// Format the note inventory and the config files found in `source_root`.
pub fn format_inventory<S: NoteSource + ?Sized>(
    source: &S,
    notes_dir: &str,
    source_root: &Path,
) -> Vec<String> {
    let mut lines = vec!["Notes".to_string()];

    let notes = source.list_notes();
    if notes.is_empty() {
        lines.push(format!("    (none found in {}/)", notes_dir));
    }
    for (i, note) in notes.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), note.title));
        lines.push(format!("    Source: {}", note.id));
        if let Some(date) = note.display_date() {
            lines.push(format!("    Date: {}", date));
        }
        let summary = truncate_desc(note.summary.trim(), SUMMARY_PREVIEW);
        if !summary.is_empty() {
            lines.push(format!("    {}", summary));
        }
    }

    lines.push(String::new());
    lines.push("Config".to_string());
    if source_root.join("config.toml").exists() {
        lines.push("    config.toml".to_string());
    } else {
        lines.push("    (stock defaults)".to_string());
    }
    if source_root.join(ASSETS_DIR).is_dir() {
        lines.push(format!("    {}/", ASSETS_DIR));
    }

    lines
}

/// Print the inventory to stdout.
pub fn print_inventory<S: NoteSource + ?Sized>(source: &S, notes_dir: &str, source_root: &Path) {
    for line in format_inventory(source, notes_dir, source_root) {
        println!("{}", line);
    }
}

// ============================================================================
// Generate
// ============================================================================

/// Format the list of written pages.
///
/// Each entity leads with its title (and index, for notes), followed by `→`
/// and the output path.
pub fn format_generate_output(report: &GenerateReport) -> Vec<String> {
    let mut lines = Vec::new();
    let mut page_count = 0;

    if let Some(home) = &report.home {
        lines.push(format!("Home \u{2192} {}", home.output));
        page_count += 1;
    }
    if let Some(listing) = &report.listing {
        lines.push(format!("Notes \u{2192} {}", listing.output));
        page_count += 1;
    }
    for (i, note) in report.notes.iter().enumerate() {
        lines.push(format!(
            "    {} {} \u{2192} {}",
            format_index(i + 1),
            note.title,
            note.output
        ));
    }

    if report.pruned > 0 {
        let noun = if report.pruned == 1 { "directory" } else { "directories" };
        lines.push(format!("Removed {} stale note {}", report.pruned, noun));
    }

    lines.push(String::new());
    lines.push(format!(
        "Generated {}, {}, {}",
        plural(page_count, "page"),
        plural(report.notes.len(), "note"),
        plural(report.assets_copied, "asset")
    ));
    lines
}

/// Print generate output to stdout.
pub fn print_generate_output(report: &GenerateReport) {
    for line in format_generate_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::GeneratedPage;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    #[test]
    fn format_index_pads() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(100), "100");
    }

    #[test]
    fn truncate_desc_long() {
        let text = "a".repeat(70);
        assert_eq!(truncate_desc(&text, 60), format!("{}...", "a".repeat(60)));
    }

    #[test]
    fn truncate_desc_multibyte_safe() {
        let text = "é".repeat(70);
        assert_eq!(truncate_desc(&text, 3), "ééé...");
    }

    #[test]
    fn plural_forms() {
        assert_eq!(plural(1, "note"), "1 note");
        assert_eq!(plural(0, "note"), "0 notes");
        assert_eq!(plural(2, "asset"), "2 assets");
    }

    #[test]
    fn inventory_lists_notes_in_order() {
        let tmp = TempDir::new().unwrap();
        let lines = format_inventory(&notes(&["b", "a"]), "notes", tmp.path());
        assert_eq!(lines[0], "Notes");
        assert_eq!(lines[1], "001 Note b");
        assert_eq!(lines[2], "    Source: b");
        assert_eq!(lines[3], "    Date: March 5, 2024");
        assert_eq!(lines[4], "    Summary of b");
        assert_eq!(lines[5], "002 Note a");
    }

    #[test]
    fn inventory_empty_collection() {
        let tmp = TempDir::new().unwrap();
        let lines = format_inventory(&notes(&[]), "notes", tmp.path());
        assert_eq!(lines[1], "    (none found in notes/)");
        assert!(lines.contains(&"    (stock defaults)".to_string()));
    }

    #[test]
    fn inventory_shows_config_and_assets() {
        let tmp = setup_fixtures();
        let lines = format_inventory(&notes(&[]), "notes", tmp.path());
        assert!(lines.contains(&"    config.toml".to_string()));
        assert!(lines.contains(&"    assets/".to_string()));
    }

    #[test]
    fn generate_output_lists_pages() {
        let report = GenerateReport {
            home: Some(GeneratedPage {
                title: "Home".to_string(),
                output: "index.html".to_string(),
            }),
            listing: Some(GeneratedPage {
                title: "Notes".to_string(),
                output: "notes/index.html".to_string(),
            }),
            notes: vec![GeneratedPage {
                title: "Hello".to_string(),
                output: "notes/hello/index.html".to_string(),
            }],
            assets_copied: 3,
            pruned: 0,
        };
        let lines = format_generate_output(&report);
        assert_eq!(lines[0], "Home \u{2192} index.html");
        assert_eq!(lines[1], "Notes \u{2192} notes/index.html");
        assert_eq!(
            lines[2],
            "    001 Hello \u{2192} notes/hello/index.html"
        );
        assert_eq!(
            lines.last().unwrap(),
            "Generated 2 pages, 1 note, 3 assets"
        );
        assert!(!lines.iter().any(|l| l.starts_with("Removed")));
    }

    #[test]
    fn generate_output_reports_pruned_dirs() {
        let report = GenerateReport {
            pruned: 2,
            ..Default::default()
        };
        let lines = format_generate_output(&report);
        assert!(lines.contains(&"Removed 2 stale note directories".to_string()));

        let report = GenerateReport {
            pruned: 1,
            ..Default::default()
        };
        let lines = format_generate_output(&report);
        assert!(lines.contains(&"Removed 1 stale note directory".to_string()));
    }
}
