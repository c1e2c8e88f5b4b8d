//! Shared test utilities.
//!
//! Provides fixture setup, note lookups, and builders for in-memory notes.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let config = load_config(tmp.path()).unwrap();
//! let collection = Collection::load(tmp.path(), &config).unwrap();
//!
//! let note = find_note(&collection, "hello-world");
//! assert_eq!(note.title, "Hello World");
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::content::{NoteRecord, NoteSource};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Lookups: panic with a clear message on miss
// =========================================================================

/// Find a note by slug. Panics if not found.
pub fn find_note<'a, S: NoteSource + ?Sized>(source: &'a S, slug: &str) -> &'a NoteRecord {
    source
        .list_notes()
        .iter()
        .find(|n| n.slug == slug)
        .unwrap_or_else(|| {
            let slugs = note_slugs(source);
            panic!("note '{slug}' not found. Available: {slugs:?}")
        })
}

/// All note slugs in collection order.
pub fn note_slugs<S: NoteSource + ?Sized>(source: &S) -> Vec<&str> {
    source
        .list_notes()
        .iter()
        .map(|n| n.slug.as_str())
        .collect()
}

// =========================================================================
// Builders
// =========================================================================

/// A minimal note with the given id; slug and title derive from it.
pub fn note(id: &str) -> NoteRecord {
    NoteRecord {
        id: id.to_string(),
        title: format!("Note {id}"),
        slug: id.to_string(),
        date: chrono::NaiveDate::from_ymd_opt(2024, 3, 5),
        summary: format!("Summary of {id}"),
        body: format!("<p>Body of {id}</p>"),
        tags: vec![],
        number: None,
    }
}

/// Notes built from a list of ids, in the given order.
pub fn notes(ids: &[&str]) -> Vec<NoteRecord> {
    ids.iter().map(|id| note(id)).collect()
}

/// Count non-overlapping occurrences of `needle` in `haystack`.
pub fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}
