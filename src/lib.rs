//! # Nitin Site
//!
//! A small static site generator for a personal portfolio with a notes blog.
//! Notes are markdown files on disk; the generator turns them into a home
//! page, a notes listing, and one page per note, all sharing a layout with a
//! navbar, per-page meta tags, and reveal-on-load animations.
//!
//! # Pipeline
//!
//! ```text
//! content/notes/*.md  →  Collection (ordered NoteRecords)
//! Collection + config →  Page { meta, content }  →  dist/**/index.html
//! ```
//!
//! Loading is the only fallible step that reads user content. Everything after
//! it is pure rendering over an already-validated [`content::Collection`].
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`content`] | Loads notes from disk into ordered [`content::NoteRecord`]s |
//! | [`naming`] | `NNN-name` filename convention parser |
//! | [`meta`] | Page titles, descriptions, keywords, OG image URLs, head tags |
//! | [`animate`] | Reveal wrapper: fade and rise after a delay |
//! | [`list`] | Note list with staggered reveal delays |
//! | [`components`] | Typography, external links, waving hand, navbar |
//! | [`pages`] | Composes home, notes, and note pages into full documents |
//! | [`config`] | `config.toml` loading, validation, and CSS token generation |
//! | [`generate`] | Writes every page, the note index, and static assets |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/). Malformed markup is
//! a compile error and every interpolation is escaped unless wrapped in
//! `PreEscaped`, which is reserved for rendered markdown and inlined CSS.
//!
//! ## Content Stays Visible Without Animation
//!
//! Reveal keyframes only describe the hidden starting state. If CSS animations
//! are disabled, or the visitor prefers reduced motion, content renders in its
//! final state. The viewport trigger is opt-in and arms itself from script, so
//! a page without JavaScript never hides anything.
//!
//! ## NNN-Prefix Ordering
//!
//! Notes are listed by numeric filename prefix (`010-`, `020-`), then by file
//! name. The order is explicit and never inferred from dates. The prefix is
//! stripped from slugs, so renumbering never changes a URL.

pub mod animate;
pub mod components;
pub mod config;
pub mod content;
pub mod generate;
pub mod list;
pub mod meta;
pub mod naming;
pub mod output;
pub mod pages;

#[cfg(test)]
pub(crate) mod test_helpers;
