//! Note list rendering with staggered reveals.
//!
//! Each note at zero-based position `i` is wrapped in a reveal whose delay is
//! `i * step + base`. On the notes page that is `i * 0.2 + 0.4`, so three notes
//! appear at 0.4s, 0.6s, and 0.8s. Order is exactly the input order.

use crate::animate::{Reveal, reveal};
use crate::config::StaggerConfig;
use crate::content::NoteRecord;
use crate::components::{Icon, icon};
use maud::{Markup, html};

/// Delay schedule for list items.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stagger {
    /// Seconds added per position.
    pub step: f64,
    /// Delay of the item at position 0.
    pub base: f64,
}

impl Stagger {
    /// Schedule used by the notes page.
    pub const NOTES: Stagger = Stagger {
        step: 0.2,
        base: 0.4,
    };

    pub fn from_config(config: &StaggerConfig) -> Self {
        Self {
            step: config.step,
            base: config.base,
        }
    }

    pub fn delay_at(&self, position: usize) -> f64 {
        position as f64 * self.step + self.base
    }
}

impl Default for Stagger {
    fn default() -> Self {
        Self::NOTES
    }
}

/// Card for one note: title, date, summary, linking to the note page.
pub fn note_item(note: &NoteRecord) -> Markup {
    html! {
        a.note-item href=(note.url()) {
            article {
                h3.note-title { (note.title) " " (icon(Icon::ArrowUpRight)) }
                @if let (Some(date), Some(label)) = (note.date, note.display_date()) {
                    time.note-date datetime=(date.format("%Y-%m-%d").to_string()) { (label) }
                }
                @if !note.summary.is_empty() {
                    p.note-summary { (note.summary) }
                }
            }
        }
    }
}

/// Section holding one staggered reveal per note. Empty input renders an
/// empty grid.
pub fn render_note_list(notes: &[NoteRecord], stagger: Stagger) -> Markup {
    html! {
        section.notes-section {
            div.notes-grid {
                @for (i, note) in notes.iter().enumerate() {
                    (reveal(&Reveal::new(stagger.delay_at(i)).keyed(&note.id), note_item(note)))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{count, note, notes};

    /// Pull the `--reveal-delay` values out of rendered markup, in order.
    fn rendered_delays(html: &str) -> Vec<String> {
        html.split("--reveal-delay: ")
            .skip(1)
            .map(|rest| rest.split(';').next().unwrap_or_default().to_string())
            .collect()
    }

    fn rendered_keys(html: &str) -> Vec<String> {
        html.split("data-key=\"")
            .skip(1)
            .map(|rest| rest.split('"').next().unwrap_or_default().to_string())
            .collect()
    }

    #[test]
    fn delay_is_linear_in_position() {
        let stagger = Stagger::NOTES;
        for i in 0..50 {
            let expected = i as f64 * 0.2 + 0.4;
            assert!((stagger.delay_at(i) - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn three_notes_get_expected_delays() {
        let html = render_note_list(&notes(&["a", "b", "c"]), Stagger::NOTES).into_string();
        assert_eq!(rendered_delays(&html), vec!["0.4s", "0.6s", "0.8s"]);
        assert_eq!(rendered_keys(&html), vec!["a", "b", "c"]);
    }

    #[test]
    fn item_count_and_order_match_input() {
        for n in [0usize, 1, 2, 7, 25] {
            let ids: Vec<String> = (0..n).map(|i| format!("n{i:02}")).collect();
            let id_refs: Vec<&str> = ids.iter().map(String::as_str).collect();
            let html = render_note_list(&notes(&id_refs), Stagger::NOTES).into_string();
            assert_eq!(count(&html, r#"class="reveal""#), n);
            assert_eq!(rendered_keys(&html), ids);
        }
    }

    #[test]
    fn input_order_is_not_sorted() {
        let html = render_note_list(&notes(&["z", "a", "m"]), Stagger::NOTES).into_string();
        assert_eq!(rendered_keys(&html), vec!["z", "a", "m"]);
    }

    #[test]
    fn empty_input_renders_empty_section() {
        let html = render_note_list(&[], Stagger::NOTES).into_string();
        assert_eq!(
            html,
            r#"<section class="notes-section"><div class="notes-grid"></div></section>"#
        );
    }

    #[test]
    fn custom_stagger_from_config() {
        let stagger = Stagger::from_config(&StaggerConfig {
            step: 0.1,
            base: 0.0,
        });
        let delays: Vec<f64> = (0..3).map(|i| stagger.delay_at(i)).collect();
        assert_eq!(delays, vec![0.0, 0.1, 0.2]);
        let html = render_note_list(&notes(&["a", "b", "c"]), stagger).into_string();
        assert_eq!(rendered_delays(&html), vec!["0s", "0.1s", "0.2s"]);
    }

    #[test]
    fn default_stagger_is_notes_schedule() {
        assert_eq!(Stagger::default(), Stagger::NOTES);
        assert_eq!(Stagger::default().delay_at(0), 0.4);
    }

    #[test]
    fn note_item_links_to_note_page() {
        let html = note_item(&note("hello")).into_string();
        assert!(html.contains(r#"href="/notes/hello/""#));
        assert!(html.contains("Note hello"));
        assert!(html.contains(r#"<time class="note-date" datetime="2024-03-05">March 5, 2024</time>"#));
        assert!(html.contains("Summary of hello"));
    }

    #[test]
    fn note_item_without_date_or_summary() {
        let mut n = note("bare");
        n.date = None;
        n.summary.clear();
        let html = note_item(&n).into_string();
        assert!(!html.contains("<time"));
        assert!(!html.contains("note-summary"));
    }
}
