//! Page metadata: titles, descriptions, keywords, and social-preview images.
//!
//! Every page builds its [`PageMeta`] through [`generate_meta`], which merges
//! the page's own fields with the shared defaults from `[site]`:
//!
//! - Titles carry the author suffix: `titled("Notes")` → `"Notes — Nitin Panwar"`.
//! - Keywords start with the site-wide set, followed by page keywords.
//! - The social-preview image is a URL on the configured OG endpoint,
//!   parameterized by the page's title and description.

use crate::config::SiteConfig;
use maud::{Markup, html};

/// Social-preview image dimensions (Open Graph recommended size).
pub const OG_IMAGE_WIDTH: u32 = 1200;
pub const OG_IMAGE_HEIGHT: u32 = 630;

#[derive(Debug, Clone, PartialEq)]
pub struct OgImage {
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub alt: String,
}

/// Fully resolved metadata for one page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub og_image: OgImage,
    /// Site-absolute path of the page, e.g. `/notes/`.
    pub path: String,
}

/// Page-specific inputs to [`generate_meta`].
#[derive(Debug, Clone, Default)]
pub struct MetaInput<'a> {
    /// Short page name, without the author suffix.
    pub name: &'a str,
    pub description: &'a str,
    pub keywords: &'a [String],
    pub path: &'a str,
}

/// Append the author suffix to a page name.
pub fn titled(name: &str, config: &SiteConfig) -> String {
    format!(
        "{}{}{}",
        name, config.site.title_separator, config.site.author
    )
}

/// Build the social-preview image descriptor for a title/description pair.
pub fn og_image(title: &str, description: &str, config: &SiteConfig) -> OgImage {
    let base = config.site.base_url.trim_end_matches('/');
    let url = format!(
        "{base}{path}?title={title}&description={description}",
        path = config.site.og_image_path,
        title = urlencoding::encode(title),
        description = urlencoding::encode(description),
    );
    OgImage {
        url,
        width: OG_IMAGE_WIDTH,
        height: OG_IMAGE_HEIGHT,
        alt: title.to_string(),
    }
}

/// Site keywords followed by page keywords, first occurrence wins.
fn merge_keywords(defaults: &[String], page: &[String]) -> Vec<String> {
    let mut merged: Vec<String> = Vec::with_capacity(defaults.len() + page.len());
    for keyword in defaults.iter().chain(page) {
        if !merged.iter().any(|k| k.eq_ignore_ascii_case(keyword)) {
            merged.push(keyword.clone());
        }
    }
    merged
}

/// Merge page inputs with the site defaults.
pub fn generate_meta(input: &MetaInput, config: &SiteConfig) -> PageMeta {
    let description = if input.description.trim().is_empty() {
        config.site.description.as_str()
    } else {
        input.description
    };
    PageMeta {
        title: titled(input.name, config),
        description: description.to_string(),
        keywords: merge_keywords(&config.site.keywords, input.keywords),
        og_image: og_image(input.name, description, config),
        path: input.path.to_string(),
    }
}

/// Absolute URL of a page when `base_url` is set, otherwise the path itself.
fn canonical_url(path: &str, config: &SiteConfig) -> String {
    format!("{}{}", config.site.base_url.trim_end_matches('/'), path)
}

/// `<head>` tags for a page: title, description, keywords, Open Graph, Twitter.
pub fn render_head(meta: &PageMeta, config: &SiteConfig) -> Markup {
    html! {
        title { (meta.title) }
        meta name="description" content=(meta.description);
        @if !meta.keywords.is_empty() {
            meta name="keywords" content=(meta.keywords.join(", "));
        }
        meta name="author" content=(config.site.author);
        @if !config.site.base_url.is_empty() {
            link rel="canonical" href=(canonical_url(&meta.path, config));
        }
        meta property="og:type" content="website";
        meta property="og:site_name" content=(config.site.author);
        meta property="og:title" content=(meta.title);
        meta property="og:description" content=(meta.description);
        meta property="og:url" content=(canonical_url(&meta.path, config));
        meta property="og:image" content=(meta.og_image.url);
        meta property="og:image:width" content=(meta.og_image.width);
        meta property="og:image:height" content=(meta.og_image.height);
        meta property="og:image:alt" content=(meta.og_image.alt);
        meta name="twitter:card" content="summary_large_image";
        meta name="twitter:title" content=(meta.title);
        meta name="twitter:description" content=(meta.description);
        meta name="twitter:image" content=(meta.og_image.url);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notes_input(config: &SiteConfig) -> MetaInput<'_> {
        MetaInput {
            name: "Notes",
            description: "Diving into Dev: Thoughts on code, design, and more.",
            keywords: &config.notes.keywords,
            path: "/notes/",
        }
    }

    #[test]
    fn titled_appends_author_suffix() {
        let config = SiteConfig::default();
        assert_eq!(titled("Notes", &config), "Notes — Nitin Panwar");
    }

    #[test]
    fn generated_titles_end_with_suffix() {
        let config = SiteConfig::default();
        for name in ["Notes", "Home", "", "A — B"] {
            let meta = generate_meta(
                &MetaInput {
                    name,
                    ..Default::default()
                },
                &config,
            );
            assert!(meta.title.ends_with("— Nitin Panwar"), "{}", meta.title);
        }
    }

    #[test]
    fn keywords_defaults_first_then_page() {
        let config = SiteConfig::default();
        let meta = generate_meta(&notes_input(&config), &config);
        let mut expected = config.site.keywords.clone();
        expected.extend(config.notes.keywords.iter().cloned());
        assert_eq!(meta.keywords, expected);
    }

    #[test]
    fn keywords_deduplicate_case_insensitively() {
        let config = SiteConfig::default();
        let page = vec!["portfolio".to_string(), "Rust".to_string(), "rust".to_string()];
        let merged = merge_keywords(&config.site.keywords, &page);
        assert_eq!(merged.iter().filter(|k| k.eq_ignore_ascii_case("portfolio")).count(), 1);
        assert_eq!(merged.last().map(String::as_str), Some("Rust"));
    }

    #[test]
    fn empty_description_falls_back_to_site() {
        let config = SiteConfig::default();
        let meta = generate_meta(
            &MetaInput {
                name: "Home",
                ..Default::default()
            },
            &config,
        );
        assert_eq!(meta.description, config.site.description);
    }

    #[test]
    fn og_image_encodes_title_and_description() {
        let mut config = SiteConfig::default();
        config.site.base_url = "https://example.com/".to_string();
        let image = og_image("Notes", "Code & design", &config);
        assert_eq!(
            image.url,
            "https://example.com/api/og?title=Notes&description=Code%20%26%20design"
        );
        assert_eq!((image.width, image.height), (1200, 630));
        assert_eq!(image.alt, "Notes");
    }

    #[test]
    fn og_image_relative_without_base_url() {
        let config = SiteConfig::default();
        let image = og_image("Notes", "x", &config);
        assert!(image.url.starts_with("/api/og?title=Notes"));
    }

    #[test]
    fn og_image_uses_page_name_not_suffixed_title() {
        let config = SiteConfig::default();
        let meta = generate_meta(&notes_input(&config), &config);
        assert!(meta.og_image.url.contains("title=Notes&"));
    }

    #[test]
    fn head_contains_open_graph_tags() {
        let config = SiteConfig::default();
        let meta = generate_meta(&notes_input(&config), &config);
        let html = render_head(&meta, &config).into_string();
        assert!(html.contains("<title>Notes — Nitin Panwar</title>"));
        assert!(html.contains(r#"property="og:image""#));
        assert!(html.contains(r#"property="og:image:width" content="1200""#));
        assert!(html.contains(r#"name="twitter:card" content="summary_large_image""#));
        assert!(html.contains(r#"name="keywords""#));
    }

    #[test]
    fn head_canonical_only_with_base_url() {
        let mut config = SiteConfig::default();
        let meta = generate_meta(&notes_input(&config), &config);
        assert!(!render_head(&meta, &config).into_string().contains("canonical"));

        config.site.base_url = "https://example.com".to_string();
        let html = render_head(&meta, &config).into_string();
        assert!(html.contains(r#"<link rel="canonical" href="https://example.com/notes/">"#));
    }
}
