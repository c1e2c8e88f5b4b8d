//! HTML site generation.
//!
//! Renders every page of the site and writes it to the output directory.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html                 # Home page
//! ├── notes/
//! │   ├── index.html             # Notes listing
//! │   ├── hello-world/
//! │   │   └── index.html         # One directory per note
//! │   └── ...
//! ├── notes.json                 # Machine-readable note index
//! └── robots.txt                 # Anything under content/assets/, copied as-is
//! ```
//!
//! ## CSS and JavaScript
//!
//! Static assets are embedded at compile time and inlined into every page:
//! - `static/style.css`: base styles, driven entirely by CSS custom properties
//! - `static/reveal.js`: viewport trigger for reveal animations (opt-in)
//!
//! Token values (colors, fonts, layout, animation timing) are generated from
//! the config and prepended to the base styles.

use crate::config::{self, ConfigError, SiteConfig};
use crate::content::{Collection, ContentError, NoteRecord, NoteSource};
use crate::pages::{self, Page};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Content error: {0}")]
    Content(#[from] ContentError),
    #[error("Asset copy error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Note {0} has an empty slug")]
    EmptySlug(String),
}

const CSS_STATIC: &str = include_str!("../static/style.css");

/// Directory under the content root whose files are copied to the output root.
pub const ASSETS_DIR: &str = "assets";

/// One written page, for reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedPage {
    /// Page name without the author suffix.
    pub title: String,
    /// Output path relative to the output directory, `/`-separated.
    pub output: String,
}

/// Summary of a generate run.
#[derive(Debug, Default)]
pub struct GenerateReport {
    pub home: Option<GeneratedPage>,
    pub listing: Option<GeneratedPage>,
    /// Note pages in collection order.
    pub notes: Vec<GeneratedPage>,
    pub assets_copied: usize,
    /// Note directories left by earlier builds and removed.
    pub pruned: usize,
}

/// Entry of `notes.json`.
#[derive(Debug, Serialize)]
struct NoteIndexEntry<'a> {
    id: &'a str,
    title: &'a str,
    slug: &'a str,
    url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    date: Option<NaiveDate>,
    summary: &'a str,
    #[serde(skip_serializing_if = "no_tags")]
    tags: &'a [String],
}

fn no_tags(tags: &&[String]) -> bool {
    tags.is_empty()
}

impl<'a> From<&'a NoteRecord> for NoteIndexEntry<'a> {
    fn from(note: &'a NoteRecord) -> Self {
        Self {
            id: &note.id,
            title: &note.title,
            slug: &note.slug,
            url: note.url(),
            date: note.date,
            summary: &note.summary,
            tags: &note.tags,
        }
    }
}

/// Full stylesheet: generated token variables followed by the base styles.
pub fn site_css(config: &SiteConfig) -> String {
    format!(
        "{}\n\n{}\n\n{}",
        config::generate_color_css(&config.colors),
        config::generate_theme_css(config),
        CSS_STATIC
    )
}

/// Load the notes under `content_root` and generate the site.
///
/// Config is loaded by the caller so the parse pool can be sized from it
/// before notes are parsed.
pub fn build(
    content_root: &Path,
    output_dir: &Path,
    config: &SiteConfig,
) -> Result<(Collection, GenerateReport), GenerateError> {
    let collection = Collection::load(content_root, config)?;
    let report = generate(&collection, config, content_root, output_dir)?;
    Ok((collection, report))
}

/// Render all pages for `source` and write them under `output_dir`.
pub fn generate<S: NoteSource + ?Sized>(
    source: &S,
    config: &SiteConfig,
    content_root: &Path,
    output_dir: &Path,
) -> Result<GenerateReport, GenerateError> {
    // An empty slug would land on the listing page
    if let Some(note) = source.list_notes().iter().find(|n| n.slug.is_empty()) {
        return Err(GenerateError::EmptySlug(note.id.clone()));
    }

    let css = site_css(config);
    fs::create_dir_all(output_dir)?;

    let mut report = GenerateReport {
        assets_copied: copy_assets(&content_root.join(ASSETS_DIR), output_dir)?,
        ..Default::default()
    };

    let home = pages::home_page(config);
    report.home = Some(write_page(output_dir, "index.html", "Home", &home, config, &css)?);

    let listing = pages::notes_page(source, config);
    report.listing = Some(write_page(
        output_dir,
        "notes/index.html",
        &config.notes.title,
        &listing,
        config,
        &css,
    )?);

    for note in source.list_notes() {
        let rel = format!("notes/{}/index.html", note.slug);
        let page = pages::note_page(note, config);
        report
            .notes
            .push(write_page(output_dir, &rel, &note.title, &page, config, &css)?);
    }

    let index: Vec<NoteIndexEntry> = source.list_notes().iter().map(Into::into).collect();
    fs::write(
        output_dir.join("notes.json"),
        serde_json::to_string_pretty(&index)?,
    )?;

    report.pruned = prune_stale_notes(source, content_root, output_dir)?;

    info!(
        notes = report.notes.len(),
        assets = report.assets_copied,
        pruned = report.pruned,
        "site generated at {}",
        output_dir.display()
    );
    Ok(report)
}

fn write_page(
    output_dir: &Path,
    rel: &str,
    name: &str,
    page: &Page,
    config: &SiteConfig,
    css: &str,
) -> Result<GeneratedPage, GenerateError> {
    let path = output_dir.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let html = pages::render_document(page, config, css);
    fs::write(&path, html.into_string())?;
    debug!(path = %path.display(), "wrote page");
    Ok(GeneratedPage {
        title: name.to_string(),
        output: rel.to_string(),
    })
}

/// Remove `notes/<dir>/` entries of the output that no current note owns.
///
/// Directories supplied by `assets/notes/` are left alone.
fn prune_stale_notes<S: NoteSource + ?Sized>(
    source: &S,
    content_root: &Path,
    output_dir: &Path,
) -> Result<usize, GenerateError> {
    let notes_out = output_dir.join("notes");
    if !notes_out.is_dir() {
        return Ok(0);
    }
    let live: HashSet<&str> = source.list_notes().iter().map(|n| n.slug.as_str()).collect();
    let asset_notes = content_root.join(ASSETS_DIR).join("notes");

    let mut pruned = 0;
    for entry in fs::read_dir(&notes_out)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let file_name = entry.file_name();
        let name: &str = &file_name.to_string_lossy();
        if live.contains(name) || asset_notes.join(name).exists() {
            continue;
        }
        fs::remove_dir_all(entry.path())?;
        debug!(dir = %entry.path().display(), "removed stale note directory");
        pruned += 1;
    }
    Ok(pruned)
}

/// Copy every file under `src` into `dst`, preserving relative paths.
///
/// A missing `src` copies nothing. Hidden files are skipped.
fn copy_assets(src: &Path, dst: &Path) -> Result<usize, GenerateError> {
    if !src.is_dir() {
        return Ok(0);
    }
    let mut copied = 0;
    let entries = WalkDir::new(src)
        .min_depth(1)
        .into_iter()
        .filter_entry(|e| !e.file_name().to_string_lossy().starts_with('.'));
    for entry in entries {
        let entry = entry?;
        let rel = entry.path().strip_prefix(src).unwrap_or(entry.path());
        let target = dst.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}
