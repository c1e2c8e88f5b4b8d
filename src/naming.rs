//! Filename parsing for the `NNN-slug` convention used by note files.
//!
//! A note file may carry a numeric prefix that fixes its position in the
//! collection: `010-hello-world.md` sorts before `020-second-note.md`. The
//! prefix is never part of the URL; the remainder becomes the slug.
//!
//! - `010-hello-world` → position 10, slug `hello-world`, title "hello world"
//! - `scratch-pad` → no position, slug `scratch-pad`, title "scratch pad"

/// Result of parsing a note file stem like `010-hello-world`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedName {
    /// Number prefix if present (e.g., `10` from `010-hello-world`)
    pub number: Option<u32>,
    /// Slug: the stem with the `NNN-` prefix removed. Empty if number-only.
    pub slug: String,
    /// Fallback title: slug with dashes converted to spaces.
    pub display_title: String,
}

/// Parse a file stem following the `NNN-slug` convention.
///
/// - `"020-rust-notes"` → number=Some(20), slug="rust-notes", display_title="rust notes"
/// - `"001"` → number=Some(1), slug="", display_title=""
/// - `"001-"` → number=Some(1), slug="", display_title=""
/// - `"draft-ideas"` → number=None, slug="draft-ideas", display_title="draft ideas"
/// - `"2024-recap"` → number=Some(2024), slug="recap"
pub fn parse_entry_name(stem: &str) -> ParsedName {
    if let Some((prefix, rest)) = stem.split_once('-')
        && let Ok(num) = prefix.parse::<u32>()
    {
        return ParsedName {
            number: Some(num),
            slug: rest.to_string(),
            display_title: rest.replace('-', " "),
        };
    }
    if let Ok(num) = stem.parse::<u32>() {
        return ParsedName {
            number: Some(num),
            slug: String::new(),
            display_title: String::new(),
        };
    }
    ParsedName {
        number: None,
        slug: stem.to_string(),
        display_title: stem.replace('-', " "),
    }
}

/// Normalize a user-supplied slug: lowercase, spaces and underscores to
/// dashes, anything outside `[a-z0-9-]` dropped, dashes collapsed.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    for c in input.trim().chars() {
        let c = c.to_ascii_lowercase();
        if c.is_ascii_alphanumeric() {
            slug.push(c);
        } else if matches!(c, '-' | ' ' | '_') && !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbered_multi_word() {
        let p = parse_entry_name("020-rust-notes");
        assert_eq!(p.number, Some(20));
        assert_eq!(p.slug, "rust-notes");
        assert_eq!(p.display_title, "rust notes");
    }

    #[test]
    fn number_only_no_dash() {
        let p = parse_entry_name("001");
        assert_eq!(p.number, Some(1));
        assert_eq!(p.slug, "");
    }

    #[test]
    fn number_with_trailing_dash() {
        let p = parse_entry_name("001-");
        assert_eq!(p.number, Some(1));
        assert_eq!(p.slug, "");
        assert_eq!(p.display_title, "");
    }

    #[test]
    fn unnumbered_with_dashes() {
        let p = parse_entry_name("draft-ideas");
        assert_eq!(p.number, None);
        assert_eq!(p.slug, "draft-ideas");
        assert_eq!(p.display_title, "draft ideas");
    }

    #[test]
    fn zero_prefix() {
        let p = parse_entry_name("000-first");
        assert_eq!(p.number, Some(0));
        assert_eq!(p.slug, "first");
    }

    #[test]
    fn slugify_normalizes() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("  Rust_and  Wasm! "), "rust-and-wasm");
        assert_eq!(slugify("already-a-slug"), "already-a-slug");
        assert_eq!(slugify("--trim--"), "trim");
    }
}
