//! Note collection loading.
//!
//! Walks the notes directory of the content root and turns every markdown file
//! into a [`NoteRecord`]. Renderers never touch the filesystem: they consume the
//! resolved collection through the [`NoteSource`] trait.
//!
//! ## Directory Structure
//!
//! ```text
//! content/
//! └── notes/
//!     ├── 010-hello-world.md      # Numbered: ordered by number
//!     ├── 020-rust-and-wasm.md
//!     └── scratch.md              # Unnumbered: after numbered notes, by filename
//! ```
//!
//! ## Front Matter
//!
//! Either YAML between `---` lines or TOML between `+++` lines:
//!
//! ```text
//! ---
//! title: Hello World
//! date: 2024-03-05
//! summary: First post.
//! tags: [meta]
//! ---
//! Body in markdown.
//! ```
//!
//! Title falls back to the first `# heading`, then to the filename. Summary
//! (alias `description`) falls back to the first paragraph. `draft: true`
//! removes the note from the collection.
//!
//! ## Ordering
//!
//! Collection order is a contract of this loader, not of the dates: numbered
//! files by number, then unnumbered files by filename. Parsing runs in
//! parallel but results are collected in that order.

use crate::config::SiteConfig;
use crate::naming::{parse_entry_name, slugify};
use chrono::NaiveDate;
use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd, html as md_html};
use rayon::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid front matter in {path}: {message}")]
    FrontMatter { path: PathBuf, message: String },
    #[error("Note has no title (front matter, heading, or filename): {0}")]
    MissingTitle(PathBuf),
    #[error("Invalid date '{value}' in {path} (expected YYYY-MM-DD)")]
    InvalidDate { path: PathBuf, value: String },
    #[error("Note has no usable slug (set `slug` in front matter): {0}")]
    MissingSlug(PathBuf),
}

/// Maximum summary length in characters when derived from the body.
const SUMMARY_MAX_CHARS: usize = 160;

/// A single note, fully resolved at load time and immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteRecord {
    /// Source path relative to the content root, e.g. `notes/010-hello.md`.
    pub id: String,
    pub title: String,
    pub slug: String,
    pub date: Option<NaiveDate>,
    pub summary: String,
    /// Pre-rendered HTML body.
    pub body: String,
    pub tags: Vec<String>,
    /// Ordering prefix from the filename, if any.
    pub number: Option<u32>,
}

impl NoteRecord {
    /// Site-absolute URL of the note's page.
    pub fn url(&self) -> String {
        format!("/notes/{}/", self.slug)
    }

    /// Human-readable publish date, e.g. "March 5, 2024".
    pub fn display_date(&self) -> Option<String> {
        self.date.map(|d| d.format("%B %-d, %Y").to_string())
    }
}

/// Read-only access to an ordered note collection.
pub trait NoteSource {
    fn list_notes(&self) -> &[NoteRecord];
}

impl NoteSource for [NoteRecord] {
    fn list_notes(&self) -> &[NoteRecord] {
        self
    }
}

impl NoteSource for Vec<NoteRecord> {
    fn list_notes(&self) -> &[NoteRecord] {
        self
    }
}

/// The note collection of one build.
#[derive(Debug, Default)]
pub struct Collection {
    notes: Vec<NoteRecord>,
}

impl NoteSource for Collection {
    fn list_notes(&self) -> &[NoteRecord] {
        &self.notes
    }
}

impl Collection {
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Load every note under `root/<notes.dir>`.
    ///
    /// A missing notes directory yields an empty collection.
    pub fn load(root: &Path, config: &SiteConfig) -> Result<Self, ContentError> {
        let notes_dir = root.join(&config.notes.dir);
        if !notes_dir.is_dir() {
            debug!(dir = %notes_dir.display(), "notes directory not found, collection is empty");
            return Ok(Self::default());
        }

        let files = collect_note_files(&notes_dir)?;
        debug!(count = files.len(), "parsing notes");

        let parsed: Vec<Option<NoteRecord>> = files
            .par_iter()
            .map(|path| parse_note_file(path, root))
            .collect::<Result<_, _>>()?;
        let notes: Vec<NoteRecord> = parsed.into_iter().flatten().collect();

        warn_duplicate_slugs(&notes);
        Ok(Self { notes })
    }
}

/// List `.md` files in the notes directory in collection order.
fn collect_note_files(dir: &Path) -> Result<Vec<PathBuf>, ContentError> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.is_file()
                && !p
                    .file_name()
                    .map(|n| n.to_string_lossy().starts_with('.'))
                    .unwrap_or(true)
                && p.extension()
                    .map(|e| e.eq_ignore_ascii_case("md"))
                    .unwrap_or(false)
        })
        .collect();

    files.sort_by_key(|p| {
        let stem = file_stem(p);
        (
            parse_entry_name(&stem).number.unwrap_or(u32::MAX),
            p.file_name().map(|n| n.to_os_string()),
        )
    });
    Ok(files)
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

fn warn_duplicate_slugs(notes: &[NoteRecord]) {
    let mut seen: HashMap<&str, &str> = HashMap::new();
    for note in notes {
        if let Some(first) = seen.insert(note.slug.as_str(), note.id.as_str()) {
            warn!(
                slug = %note.slug,
                first = %first,
                second = %note.id,
                "two notes share a slug; the later one overwrites the earlier page"
            );
        }
    }
}

fn parse_note_file(path: &Path, root: &Path) -> Result<Option<NoteRecord>, ContentError> {
    let content = fs::read_to_string(path)?;
    let id = path
        .strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/");
    parse_note(&content, &file_stem(path), id, path)
}

// ============================================================================
// Front matter
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrontMatterFormat {
    /// `---` delimited
    Yaml,
    /// `+++` delimited
    Toml,
}

impl FrontMatterFormat {
    fn delimiter(self) -> &'static str {
        match self {
            Self::Yaml => "---",
            Self::Toml => "+++",
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FrontMatter {
    title: Option<String>,
    date: Option<String>,
    #[serde(alias = "description")]
    summary: Option<String>,
    slug: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    draft: bool,
}

/// Split a document into its front matter block and body.
///
/// Delimiters must sit on their own lines. Returns `None` when the document
/// does not open with a delimiter or the block is never closed.
fn split_front_matter(content: &str) -> Option<(FrontMatterFormat, &str, &str)> {
    let content = content.trim_start_matches('\u{feff}');
    let first_line_end = content.find('\n')?;
    let format = match content[..first_line_end].trim_end() {
        "---" => FrontMatterFormat::Yaml,
        "+++" => FrontMatterFormat::Toml,
        _ => return None,
    };

    let rest = &content[first_line_end + 1..];
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == format.delimiter() {
            return Some((format, &rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

fn parse_front_matter(
    format: FrontMatterFormat,
    raw: &str,
    path: &Path,
) -> Result<FrontMatter, ContentError> {
    let err = |message: String| ContentError::FrontMatter {
        path: path.to_path_buf(),
        message,
    };
    if raw.trim().is_empty() {
        return Ok(FrontMatter::default());
    }
    match format {
        FrontMatterFormat::Yaml => serde_yaml::from_str(raw).map_err(|e| err(e.to_string())),
        FrontMatterFormat::Toml => {
            let mut table: toml::Table = toml::from_str(raw).map_err(|e| err(e.to_string()))?;
            // Bare TOML dates are datetimes, not strings.
            if let Some(toml::Value::Datetime(dt)) = table.get("date") {
                let text = dt.to_string();
                table.insert("date".to_string(), toml::Value::String(text));
            }
            toml::Value::Table(table)
                .try_into()
                .map_err(|e: toml::de::Error| err(e.to_string()))
        }
    }
}

fn parse_date(value: &str, path: &Path) -> Result<NaiveDate, ContentError> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| chrono::DateTime::parse_from_rfc3339(value).map(|dt| dt.date_naive()))
        .map_err(|_| ContentError::InvalidDate {
            path: path.to_path_buf(),
            value: value.to_string(),
        })
}

// ============================================================================
// Note assembly
// ============================================================================

/// Build a note from raw file content. Returns `Ok(None)` for drafts.
pub fn parse_note(
    content: &str,
    stem: &str,
    id: String,
    path: &Path,
) -> Result<Option<NoteRecord>, ContentError> {
    let (front, body) = match split_front_matter(content) {
        Some((format, raw, body)) => (parse_front_matter(format, raw, path)?, body),
        None => (FrontMatter::default(), content),
    };

    if front.draft {
        debug!(id = %id, "skipping draft");
        return Ok(None);
    }

    let parsed = parse_entry_name(stem);

    // A leading `# heading` used as the title is dropped from the body.
    let (title, body) = match front.title.filter(|t| !t.trim().is_empty()) {
        Some(t) => (t.trim().to_string(), body),
        None => match take_leading_heading(body) {
            Some((heading, rest)) => (heading, rest),
            None if !parsed.display_title.is_empty() => (parsed.display_title.clone(), body),
            None => return Err(ContentError::MissingTitle(path.to_path_buf())),
        },
    };

    let slug = resolve_slug(front.slug.as_deref(), &parsed.slug, &title, parsed.number)
        .ok_or_else(|| ContentError::MissingSlug(path.to_path_buf()))?;

    let date = front
        .date
        .as_deref()
        .map(|d| parse_date(d, path))
        .transpose()?;

    let summary = front
        .summary
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| first_paragraph_text(body, SUMMARY_MAX_CHARS));

    Ok(Some(NoteRecord {
        id,
        title,
        slug,
        date,
        summary,
        body: render_markdown(body),
        tags: front.tags,
        number: parsed.number,
    }))
}

/// First non-empty slug among front matter, filename, and title, all
/// normalized. Falls back to the ordering number, so the result never maps
/// onto the listing page.
fn resolve_slug(
    front: Option<&str>,
    filename: &str,
    title: &str,
    number: Option<u32>,
) -> Option<String> {
    front
        .into_iter()
        .chain([filename, title])
        .map(slugify)
        .find(|s| !s.is_empty())
        .or_else(|| number.map(|n| n.to_string()))
}

/// If the first non-blank line is a level-one ATX heading, split it off.
fn take_leading_heading(body: &str) -> Option<(String, &str)> {
    let trimmed = body.trim_start();
    let line_end = trimmed.find('\n').unwrap_or(trimmed.len());
    let heading = trimmed[..line_end].strip_prefix("# ")?.trim();
    if heading.is_empty() {
        return None;
    }
    Some((heading.to_string(), &trimmed[line_end..]))
}

fn markdown_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
}

/// Render markdown to HTML.
pub fn render_markdown(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, markdown_options());
    let mut html = String::new();
    md_html::push_html(&mut html, parser);
    html
}

/// Plain text of the first paragraph, truncated to `max` characters.
fn first_paragraph_text(markdown: &str, max: usize) -> String {
    let mut text = String::new();
    let mut in_paragraph = false;
    for event in Parser::new_ext(markdown, markdown_options()) {
        match event {
            Event::Start(Tag::Paragraph) => in_paragraph = true,
            Event::End(TagEnd::Paragraph) if in_paragraph => break,
            Event::Text(t) | Event::Code(t) if in_paragraph => text.push_str(&t),
            Event::SoftBreak | Event::HardBreak if in_paragraph => text.push(' '),
            _ => {}
        }
    }
    truncate_chars(text.trim(), max)
}

fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max).collect();
    format!("{}…", cut.trim_end())
}
