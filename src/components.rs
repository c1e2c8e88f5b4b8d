//! Presentational atoms: stateless functions from props to markup.

use crate::config::NavConfig;
use maud::{Markup, PreEscaped, html};

/// Inline icons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    ArrowUpRight,
}

impl Icon {
    fn path(self) -> &'static str {
        match self {
            Icon::ArrowUpRight => "M7 17 17 7M7 7h10v10",
        }
    }
}

pub fn icon(kind: Icon) -> Markup {
    html! {
        svg.icon xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" fill="none"
            stroke="currentColor" stroke-width="2" stroke-linecap="round"
            stroke-linejoin="round" aria-hidden="true" {
            path d=(kind.path()) {}
        }
    }
}

/// Body copy paragraph.
pub fn typography(children: Markup) -> Markup {
    html! {
        p.typography { (children) }
    }
}

/// A link to a destination outside the current page flow.
///
/// `href` is emitted verbatim; it is never validated or rewritten.
pub fn external_link(href: &str, label: &str) -> Markup {
    html! {
        a.external-link href=(href) target="_blank" rel="noopener noreferrer" {
            (label)
            (icon(Icon::ArrowUpRight))
        }
    }
}

pub fn waving_hand() -> Markup {
    html! {
        span.waving-hand role="img" aria-label="waving hand" { (PreEscaped("&#x1F44B;")) }
    }
}

/// Whether a nav href matches the page at `current_path`.
///
/// The root link only matches the root; section links also match their
/// descendants (`/notes/` is current on `/notes/hello/`).
fn is_current(href: &str, current_path: &str) -> bool {
    if href == current_path {
        return true;
    }
    href != "/" && href.ends_with('/') && current_path.starts_with(href)
}

/// Fixed top navigation with the logo home link and configured links.
pub fn navbar(nav: &NavConfig, current_path: &str) -> Markup {
    html! {
        header.navbar {
            a.navbar-logo href="/" aria-label="Home" { (nav.logo) }
            nav {
                ul.navbar-links {
                    @for link in &nav.links {
                        li {
                            a href=(link.href)
                                aria-current=[is_current(&link.href, current_path).then_some("page")] {
                                (link.label)
                            }
                        }
                    }
                }
            }
        }
    }
}
