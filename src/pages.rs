//! Page composition.
//!
//! A page is its [`PageMeta`] plus a content tree assembled from components.
//! [`render_document`] wraps the content in the shared layout: head tags,
//! navbar, and the `main` container.
//!
//! | Page | Path | Content |
//! |------|------|---------|
//! | [`home_page`] | `/` | Greeting paragraph and external links |
//! | [`notes_page`] | `/notes/` | Heading, subheading, staggered note list |
//! | [`note_page`] | `/notes/{slug}/` | One note's title, date, tags, body |

use crate::animate::{Reveal, reveal, reveal_head, reveal_script};
use crate::components::{external_link, navbar, typography, waving_hand};
use crate::config::SiteConfig;
use crate::content::{NoteRecord, NoteSource};
use crate::list::{Stagger, render_note_list};
use crate::meta::{MetaInput, PageMeta, generate_meta, render_head};
use maud::{DOCTYPE, Markup, PreEscaped, html};

/// Delay of a page's heading reveal.
const HEADING_DELAY: f64 = 0.0;
/// Delay of the reveal right under the heading.
const SUBHEADING_DELAY: f64 = 0.2;
/// Layout class of the centered intro block under a heading.
const INTRO_CLASS: &str = "page-intro";

/// Metadata and content of one page, before layout.
#[derive(Debug, Clone)]
pub struct Page {
    pub meta: PageMeta,
    pub content: Markup,
}

/// Wrap a page's content in the full HTML document.
pub fn render_document(page: &Page, config: &SiteConfig, css: &str) -> Markup {
    let trigger = config.animation.trigger;
    html! {
        (DOCTYPE)
        html lang=(config.site.lang) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                (render_head(&page.meta, config))
                style { (PreEscaped(css)) }
                @if let Some(armed) = reveal_head(trigger) {
                    (armed)
                }
            }
            body {
                (navbar(&config.nav, &page.meta.path))
                main.site-main {
                    (page.content)
                }
                @if let Some(script) = reveal_script(trigger) {
                    (script)
                }
            }
        }
    }
}

/// Landing page: greeting and outbound links.
pub fn home_page(config: &SiteConfig) -> Page {
    let home = &config.home;
    let meta = generate_meta(
        &MetaInput {
            name: "Home",
            description: &config.site.description,
            keywords: &[],
            path: "/",
        },
        config,
    );

    let content = html! {
        div.home {
            (typography(html! {
                "Hello there" (waving_hand()) ". I'm " (home.name) ", a "
                span.role { (home.role) }
                " from " (home.location) ". " (home.tagline)
            }))
            div.home-links {
                @for link in &home.links {
                    (external_link(&link.href, &link.label))
                }
            }
        }
    };

    Page { meta, content }
}

/// Notes listing: heading, subheading, and one staggered card per note.
pub fn notes_page<S: NoteSource + ?Sized>(source: &S, config: &SiteConfig) -> Page {
    let notes = &config.notes;
    let meta = generate_meta(
        &MetaInput {
            name: &notes.title,
            description: &notes.description,
            keywords: &notes.keywords,
            path: "/notes/",
        },
        config,
    );

    let stagger = Stagger::from_config(&config.animation.stagger);
    let content = html! {
        div.notes-page {
            (reveal(&Reveal::new(HEADING_DELAY), html! {
                h2.page-heading { (notes.title) }
            }))
            (reveal(&Reveal::new(SUBHEADING_DELAY).with_class(INTRO_CLASS), html! {
                p.page-subheading { (notes.subheading) }
            }))
            (render_note_list(source.list_notes(), stagger))
        }
    };

    Page { meta, content }
}

/// A single note.
pub fn note_page(note: &NoteRecord, config: &SiteConfig) -> Page {
    let url = note.url();
    let meta = generate_meta(
        &MetaInput {
            name: &note.title,
            description: &note.summary,
            keywords: &note.tags,
            path: &url,
        },
        config,
    );

    let content = html! {
        article.note-page {
            (reveal(&Reveal::new(HEADING_DELAY), html! {
                header {
                    h1.page-heading { (note.title) }
                    @if let (Some(date), Some(label)) = (note.date, note.display_date()) {
                        p.note-meta {
                            time datetime=(date.format("%Y-%m-%d").to_string()) { (label) }
                        }
                    }
                    @if !note.tags.is_empty() {
                        ul.note-tags {
                            @for tag in &note.tags {
                                li { "#" (tag) }
                            }
                        }
                    }
                }
            }))
            (reveal(&Reveal::new(SUBHEADING_DELAY), html! {
                div.note-body { (PreEscaped(&note.body)) }
            }))
        }
    };

    Page { meta, content }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RevealTrigger;
    use crate::test_helpers::{count, note, notes};

    #[test]
    fn document_has_doctype_and_lang() {
        let config = SiteConfig::default();
        let page = home_page(&config);
        let html = render_document(&page, &config, "body {}").into_string();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"<html lang="en">"#));
    }

    #[test]
    fn document_does_not_escape_css() {
        let config = SiteConfig::default();
        let page = home_page(&config);
        let css = r#":root { --font-silka: "Silka", sans-serif; }"#;
        let html = render_document(&page, &config, css).into_string();
        assert!(html.contains(css));
    }

    #[test]
    fn document_marks_current_nav_link() {
        let config = SiteConfig::default();
        let page = notes_page(&notes(&["a"]), &config);
        let html = render_document(&page, &config, "").into_string();
        assert!(html.contains(r#"<a href="/notes/" aria-current="page">"#));
    }

    #[test]
    fn document_scripts_follow_trigger() {
        let mut config = SiteConfig::default();
        let page = home_page(&config);
        let html = render_document(&page, &config, "").into_string();
        assert!(!html.contains("<script>"));

        config.animation.trigger = RevealTrigger::Viewport;
        let html = render_document(&page, &config, "").into_string();
        assert_eq!(count(&html, "<script>"), 2);
    }

    #[test]
    fn home_page_renders_intro_and_links() {
        let config = SiteConfig::default();
        let html = home_page(&config).content.into_string();
        assert!(html.contains("Hello there"));
        assert!(html.contains("waving-hand"));
        assert!(html.contains(r#"<span class="role">software engineer</span>"#));
        assert!(html.contains(r#"href="https://github.com/nitintf""#));
        assert!(html.contains(r#"href="https://www.linkedin.com/in/nitin-panwarr/""#));
        assert!(html.contains(r#"href="/resume""#));
        assert_eq!(count(&html, "external-link"), 3);
    }

    #[test]
    fn notes_page_meta() {
        let config = SiteConfig::default();
        let page = notes_page(&notes(&[]), &config);
        assert_eq!(page.meta.title, "Notes — Nitin Panwar");
        assert_eq!(
            page.meta.description,
            "Diving into Dev: Thoughts on code, design, and more."
        );
        assert!(page.meta.keywords.iter().any(|k| k == "Thoughts"));
        assert_eq!(page.meta.path, "/notes/");
    }

    #[test]
    fn notes_page_heading_subheading_then_list() {
        let config = SiteConfig::default();
        let html = notes_page(&notes(&["a", "b", "c"]), &config)
            .content
            .into_string();
        let heading = html.find("page-heading").unwrap();
        let subheading = html.find("page-subheading").unwrap();
        let section = html.find("notes-section").unwrap();
        assert!(heading < subheading && subheading < section);

        let delays: Vec<&str> = html
            .split("--reveal-delay: ")
            .skip(1)
            .map(|rest| rest.split(';').next().unwrap())
            .collect();
        assert_eq!(delays, vec!["0s", "0.2s", "0.4s", "0.6s", "0.8s"]);
    }

    #[test]
    fn notes_page_subheading_differs_from_meta_description() {
        let config = SiteConfig::default();
        let page = notes_page(&notes(&[]), &config);
        let html = page.content.into_string();
        assert!(html.contains(
            r#"<p class="page-subheading">Diving into Dev: Thoughts on code, design and more.</p>"#
        ));
        assert!(!html.contains("design, and more."));
    }

    #[test]
    fn notes_page_subheading_reveal_carries_intro_class() {
        let config = SiteConfig::default();
        let html = notes_page(&notes(&[]), &config).content.into_string();
        assert!(html.contains(
            r#"<div class="reveal page-intro" style="--reveal-delay: 0.2s;"><p class="page-subheading">"#
        ));
        assert_eq!(count(&html, "page-intro"), 1);
    }

    #[test]
    fn notes_page_with_empty_collection() {
        let config = SiteConfig::default();
        let html = notes_page(&notes(&[]), &config).content.into_string();
        assert!(html.contains(r#"<div class="notes-grid"></div>"#));
        assert_eq!(count(&html, "note-item"), 0);
    }

    #[test]
    fn notes_page_honors_configured_stagger() {
        let mut config = SiteConfig::default();
        config.animation.stagger.base = 1.0;
        config.animation.stagger.step = 0.5;
        let html = notes_page(&notes(&["a", "b"]), &config)
            .content
            .into_string();
        assert!(html.contains("--reveal-delay: 1s;"));
        assert!(html.contains("--reveal-delay: 1.5s;"));
    }

    #[test]
    fn note_page_renders_body_unescaped() {
        let config = SiteConfig::default();
        let mut n = note("hello");
        n.tags = vec!["rust".to_string()];
        let page = note_page(&n, &config);
        assert_eq!(page.meta.title, "Note hello — Nitin Panwar");
        assert_eq!(page.meta.path, "/notes/hello/");
        assert!(page.meta.keywords.iter().any(|k| k == "rust"));

        let html = page.content.into_string();
        assert!(html.contains("<p>Body of hello</p>"));
        assert!(html.contains("<li>#rust</li>"));
        assert!(html.contains("March 5, 2024"));
    }

    #[test]
    fn note_page_escapes_title() {
        let config = SiteConfig::default();
        let mut n = note("x");
        n.title = "<script>alert('xss')</script>".to_string();
        let html = note_page(&n, &config).content.into_string();
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
