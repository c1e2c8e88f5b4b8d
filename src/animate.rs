//! Reveal animation wrapper.
//!
//! [`reveal`] wraps any markup in a `div.reveal` carrying its start delay as a
//! CSS custom property. The stylesheet animates `.reveal` from a hidden,
//! offset state to the element's normal style:
//!
//! ```css
//! @keyframes reveal-in { from { opacity: 0; transform: translateY(var(--reveal-offset)); } }
//! .reveal { animation: reveal-in var(--reveal-duration) var(--reveal-easing) var(--reveal-delay) both; }
//! ```
//!
//! The hidden state only exists inside the keyframe, so content stays visible
//! wherever the animation never runs (reduced motion, no CSS animation support).
//!
//! With [`RevealTrigger::Viewport`] the page also carries a small script that
//! pauses every reveal until it scrolls into view. Without JavaScript the
//! reveals play on load.

use crate::config::RevealTrigger;
use maud::{Markup, PreEscaped, html};

const REVEAL_JS: &str = include_str!("../static/reveal.js");

/// Parameters for one reveal wrapper.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Reveal<'a> {
    /// Seconds before the animation starts.
    pub delay: f64,
    /// Extra classes for layout composition.
    pub class: Option<&'a str>,
    /// Stable identity of the wrapped item, emitted as `data-key`.
    pub key: Option<&'a str>,
}

impl<'a> Reveal<'a> {
    pub fn new(delay: f64) -> Self {
        Self {
            delay,
            class: None,
            key: None,
        }
    }

    pub fn with_class(mut self, class: &'a str) -> Self {
        self.class = Some(class);
        self
    }

    pub fn keyed(mut self, key: &'a str) -> Self {
        self.key = Some(key);
        self
    }
}

/// Format a delay in seconds as a CSS time, rounded to milliseconds.
///
/// `0.6000000000000001` → `"0.6s"`, `1.0` → `"1s"`.
pub fn format_delay(delay: f64) -> String {
    let rounded = (delay.max(0.0) * 1000.0).round() / 1000.0;
    format!("{rounded}s")
}

/// Wrap `child` in a reveal container.
pub fn reveal(params: &Reveal, child: Markup) -> Markup {
    let class = match params.class {
        Some(extra) if !extra.is_empty() => format!("reveal {extra}"),
        _ => "reveal".to_string(),
    };
    let style = format!("--reveal-delay: {};", format_delay(params.delay));
    html! {
        div class=(class) style=(style) data-key=[params.key] {
            (child)
        }
    }
}

/// Head snippet arming viewport-triggered reveals before first paint.
///
/// Returns nothing for mount-triggered reveals.
pub fn reveal_head(trigger: RevealTrigger) -> Option<Markup> {
    match trigger {
        RevealTrigger::Mount => None,
        RevealTrigger::Viewport => Some(html! {
            script {
                (PreEscaped("if ('IntersectionObserver' in window) document.documentElement.classList.add('reveal-armed');"))
            }
        }),
    }
}

/// End-of-body script that starts each reveal when it enters the viewport.
pub fn reveal_script(trigger: RevealTrigger) -> Option<Markup> {
    match trigger {
        RevealTrigger::Mount => None,
        RevealTrigger::Viewport => Some(html! {
            script { (PreEscaped(REVEAL_JS)) }
        }),
    }
}
