//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! overridden by a user `config.toml` placed in the content root. The loaded
//! [`SiteConfig`] is the site's token table: it is built once at startup and
//! passed by reference to every renderer.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! author = "Nitin Panwar"            # Appended to page titles: "Notes — Nitin Panwar"
//! base_url = ""                      # Absolute origin for social-preview URLs
//! og_image_path = "/api/og"          # Social-preview image endpoint
//!
//! [notes]
//! dir = "notes"                      # Notes directory, relative to content root
//!
//! [colors.light]
//! background = "#fffcf7"
//! foreground = "#1c1917"
//!
//! [animation]
//! duration = "0.5s"
//! trigger = "mount"                  # or "viewport"
//!
//! [animation.stagger]
//! step = 0.2                         # Seconds added per list position
//! base = 0.4                         # Delay of the first list item
//!
//! [processing]
//! max_processes = 4                  # Max parallel parse workers (omit for auto)
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse — override just the values you want:
//!
//! ```toml
//! [colors.dark]
//! background = "#000000"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have defaults matching the live site. User config files need
/// only specify the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Identity and metadata defaults shared by every page.
    pub site: SiteIdentity,
    /// Top navigation bar links.
    pub nav: NavConfig,
    /// Home page copy and outbound links.
    pub home: HomeConfig,
    /// Notes listing page copy and source directory.
    pub notes: NotesConfig,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
    /// Font family stacks.
    pub fonts: FontConfig,
    /// Layout sizes (navbar, logo, container).
    pub layout: LayoutConfig,
    /// Box shadows for link cards.
    pub shadows: ShadowConfig,
    /// Reveal animation timing.
    pub animation: AnimationConfig,
    /// Parallel parsing settings.
    pub processing: ProcessingConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site.author.trim().is_empty() {
            return Err(ConfigError::Validation(
                "site.author must not be empty".into(),
            ));
        }
        if self.notes.dir.trim().is_empty() {
            return Err(ConfigError::Validation("notes.dir must not be empty".into()));
        }
        let stagger = &self.animation.stagger;
        if !stagger.step.is_finite() || stagger.step < 0.0 {
            return Err(ConfigError::Validation(
                "animation.stagger.step must be a non-negative number".into(),
            ));
        }
        if !stagger.base.is_finite() || stagger.base < 0.0 {
            return Err(ConfigError::Validation(
                "animation.stagger.base must be a non-negative number".into(),
            ));
        }
        if self.processing.max_processes == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_processes must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Identity of the site owner and shared metadata defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteIdentity {
    /// Owner name. Suffixed onto every page title.
    pub author: String,
    /// Separator between page name and author in titles.
    pub title_separator: String,
    /// Default page description (home page, fallback for notes).
    pub description: String,
    /// Keywords present on every page, ahead of page-specific ones.
    pub keywords: Vec<String>,
    /// Absolute origin used to build social-preview image URLs.
    /// Empty means root-relative URLs.
    pub base_url: String,
    /// Path of the social-preview image endpoint.
    pub og_image_path: String,
    /// Document language.
    pub lang: String,
}

impl Default for SiteIdentity {
    fn default() -> Self {
        Self {
            author: "Nitin Panwar".to_string(),
            title_separator: " — ".to_string(),
            description: "Software engineer from India. Latest explorations and projects."
                .to_string(),
            keywords: vec![
                "Nitin Panwar".to_string(),
                "nitintf".to_string(),
                "Software Engineer".to_string(),
                "Portfolio".to_string(),
                "Web Development".to_string(),
            ],
            base_url: String::new(),
            og_image_path: "/api/og".to_string(),
            lang: "en".to_string(),
        }
    }
}

/// A label/href pair used by the navbar and the home page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Link {
    pub label: String,
    pub href: String,
}

impl Link {
    pub fn new(label: &str, href: &str) -> Self {
        Self {
            label: label.to_string(),
            href: href.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavConfig {
    /// Text of the home/logo link.
    pub logo: String,
    pub links: Vec<Link>,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            logo: "NP".to_string(),
            links: vec![Link::new("Home", "/"), Link::new("Notes", "/notes/")],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HomeConfig {
    /// First name used in the greeting.
    pub name: String,
    /// Highlighted role in the greeting.
    pub role: String,
    pub location: String,
    /// Sentence(s) following the greeting.
    pub tagline: String,
    /// Outbound links rendered as external links under the intro.
    pub links: Vec<Link>,
}

impl Default for HomeConfig {
    fn default() -> Self {
        Self {
            name: "Nitin".to_string(),
            role: "software engineer".to_string(),
            location: "India".to_string(),
            tagline: "I believe in a practical approach, so here I present my latest \
                      explorations and projects. Thank you for visiting!"
                .to_string(),
            links: vec![
                Link::new("Github", "https://github.com/nitintf"),
                Link::new("Linkedin", "https://www.linkedin.com/in/nitin-panwarr/"),
                Link::new("Resume", "/resume"),
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NotesConfig {
    /// Directory holding note markdown files, relative to the content root.
    pub dir: String,
    /// Listing page heading.
    pub title: String,
    /// Listing page meta description.
    pub description: String,
    /// Text shown under the listing heading.
    pub subheading: String,
    /// Keywords appended after the site defaults on the listing page.
    pub keywords: Vec<String>,
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            dir: "notes".to_string(),
            title: "Notes".to_string(),
            description: "Diving into Dev: Thoughts on code, design, and more.".to_string(),
            subheading: "Diving into Dev: Thoughts on code, design and more.".to_string(),
            keywords: vec![
                "Notes".to_string(),
                "Thoughts".to_string(),
                "Code".to_string(),
                "Design".to_string(),
            ],
        }
    }
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub light: ColorScheme,
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// Individual color scheme (light or dark).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    pub background: String,
    pub foreground: String,
    pub border: String,
    /// Background of the active navbar link.
    pub highlight: String,
    /// Muted text (subheadings, dates, summaries).
    pub secondary: String,
    /// Navbar pill background.
    pub nav_bg: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#fffcf7".to_string(),
            foreground: "#1c1917".to_string(),
            border: "#e7e5e4".to_string(),
            highlight: "#ffffff".to_string(),
            secondary: "#78716c".to_string(),
            nav_bg: "#f5f5f4".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#0c0a09".to_string(),
            foreground: "#e7e5e4".to_string(),
            border: "#292524".to_string(),
            highlight: "#292524".to_string(),
            secondary: "#a8a29e".to_string(),
            nav_bg: "#1c1917".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

/// Font family stacks. Fonts are referenced by name only, never fetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FontConfig {
    /// Display face for headings.
    pub moranga: String,
    /// Body face.
    pub silka: String,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            moranga: r#""Moranga", Georgia, serif"#.to_string(),
            silka: r#""Silka", system-ui, sans-serif"#.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    pub navbar_height: String,
    /// Logo width and height.
    pub logo: String,
    /// Horizontal padding of the page container.
    pub container_padding: String,
    /// Maximum container width.
    pub container_max: String,
    pub base_font_size: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            navbar_height: "4.5rem".to_string(),
            logo: "2.5rem".to_string(),
            container_padding: "4vw".to_string(),
            container_max: "1400px".to_string(),
            base_font_size: "14px".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShadowConfig {
    pub link: String,
    pub link_hover: String,
}

impl Default for ShadowConfig {
    fn default() -> Self {
        Self {
            link: "0 1px 2px rgba(0, 0, 0, 0.06)".to_string(),
            link_hover: "0 6px 20px rgba(0, 0, 0, 0.12)".to_string(),
        }
    }
}

/// When a reveal animation starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RevealTrigger {
    /// As soon as the page renders.
    #[default]
    Mount,
    /// When the element first scrolls into view. Falls back to mount without JS.
    Viewport,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnimationConfig {
    /// CSS duration of one reveal.
    pub duration: String,
    /// CSS easing function.
    pub easing: String,
    /// Vertical distance the content slides in from.
    pub offset: String,
    pub trigger: RevealTrigger,
    pub stagger: StaggerConfig,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            duration: "0.5s".to_string(),
            easing: "cubic-bezier(0.25, 0.1, 0.25, 1)".to_string(),
            offset: "20px".to_string(),
            trigger: RevealTrigger::Mount,
            stagger: StaggerConfig::default(),
        }
    }
}

/// Delay schedule for list items: `position * step + base` seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StaggerConfig {
    pub step: f64,
    pub base: f64,
}

impl Default for StaggerConfig {
    fn default() -> Self {
        Self {
            step: 0.2,
            base: 0.4,
        }
    }
}

/// Parallel parsing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel note parsing workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_processes.map(|n| n.min(cores)).unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely, arrays included.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Site Configuration
# ==================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Place this file at content/config.toml.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Identity and shared page metadata
# ---------------------------------------------------------------------------
[site]
# Appended to every page title: "Notes — Nitin Panwar".
author = "Nitin Panwar"
title_separator = " — "
description = "Software engineer from India. Latest explorations and projects."
# Keywords on every page, ahead of page-specific keywords.
keywords = ["Nitin Panwar", "nitintf", "Software Engineer", "Portfolio", "Web Development"]
# Absolute origin for social-preview image URLs (e.g. "https://example.com").
# Empty means root-relative URLs.
base_url = ""
# Social-preview image endpoint; receives ?title=...&description=...
og_image_path = "/api/og"
lang = "en"

# ---------------------------------------------------------------------------
# Navigation bar
# ---------------------------------------------------------------------------
[nav]
logo = "NP"

[[nav.links]]
label = "Home"
href = "/"

[[nav.links]]
label = "Notes"
href = "/notes/"

# ---------------------------------------------------------------------------
# Home page
# ---------------------------------------------------------------------------
[home]
name = "Nitin"
role = "software engineer"
location = "India"
tagline = "I believe in a practical approach, so here I present my latest explorations and projects. Thank you for visiting!"

# Hrefs are used verbatim.
[[home.links]]
label = "Github"
href = "https://github.com/nitintf"

[[home.links]]
label = "Linkedin"
href = "https://www.linkedin.com/in/nitin-panwarr/"

[[home.links]]
label = "Resume"
href = "/resume"

# ---------------------------------------------------------------------------
# Notes listing
# ---------------------------------------------------------------------------
[notes]
# Directory of note markdown files, relative to the content root.
dir = "notes"
title = "Notes"
# Meta description of the listing page.
description = "Diving into Dev: Thoughts on code, design, and more."
# Shown under the listing heading.
subheading = "Diving into Dev: Thoughts on code, design and more."
keywords = ["Notes", "Thoughts", "Code", "Design"]

# ---------------------------------------------------------------------------
# Colors - Light mode (prefers-color-scheme: light)
# ---------------------------------------------------------------------------
[colors.light]
background = "#fffcf7"
foreground = "#1c1917"
border = "#e7e5e4"
highlight = "#ffffff"     # Active navbar link
secondary = "#78716c"     # Subheadings, dates, summaries
nav_bg = "#f5f5f4"        # Navbar pill

# ---------------------------------------------------------------------------
# Colors - Dark mode (prefers-color-scheme: dark)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#0c0a09"
foreground = "#e7e5e4"
border = "#292524"
highlight = "#292524"
secondary = "#a8a29e"
nav_bg = "#1c1917"

# ---------------------------------------------------------------------------
# Fonts (referenced by family name, never downloaded)
# ---------------------------------------------------------------------------
[fonts]
moranga = '"Moranga", Georgia, serif'
silka = '"Silka", system-ui, sans-serif'

# ---------------------------------------------------------------------------
# Layout
# ---------------------------------------------------------------------------
[layout]
navbar_height = "4.5rem"
logo = "2.5rem"
container_padding = "4vw"
container_max = "1400px"
base_font_size = "14px"

[shadows]
link = "0 1px 2px rgba(0, 0, 0, 0.06)"
link_hover = "0 6px 20px rgba(0, 0, 0, 0.12)"

# ---------------------------------------------------------------------------
# Reveal animation
# ---------------------------------------------------------------------------
[animation]
duration = "0.5s"
easing = "cubic-bezier(0.25, 0.1, 0.25, 1)"
# Distance the content slides up from.
offset = "20px"
# "mount" starts on page load; "viewport" waits until the element is visible.
trigger = "mount"

# List item i starts after i * step + base seconds.
[animation.stagger]
step = 0.2
base = 0.4

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel note-parsing workers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}

/// Generate CSS custom properties from the color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
    --background: {light_bg};
    --foreground: {light_fg};
    --border: {light_border};
    --nav-link-highlight: {light_highlight};
    --secondary: {light_secondary};
    --nav-link-bg: {light_nav_bg};
}}

@media (prefers-color-scheme: dark) {{
    :root {{
        --background: {dark_bg};
        --foreground: {dark_fg};
        --border: {dark_border};
        --nav-link-highlight: {dark_highlight};
        --secondary: {dark_secondary};
        --nav-link-bg: {dark_nav_bg};
    }}
}}"#,
        light_bg = colors.light.background,
        light_fg = colors.light.foreground,
        light_border = colors.light.border,
        light_highlight = colors.light.highlight,
        light_secondary = colors.light.secondary,
        light_nav_bg = colors.light.nav_bg,
        dark_bg = colors.dark.background,
        dark_fg = colors.dark.foreground,
        dark_border = colors.dark.border,
        dark_highlight = colors.dark.highlight,
        dark_secondary = colors.dark.secondary,
        dark_nav_bg = colors.dark.nav_bg,
    )
}

/// Generate CSS custom properties for fonts, layout, shadows, and animation.
pub fn generate_theme_css(config: &SiteConfig) -> String {
    format!(
        r#":root {{
    --font-moranga: {moranga};
    --font-silka: {silka};
    --top-navbar-height: {navbar_height};
    --logo: {logo};
    --container-padding: {container_padding};
    --container-max: {container_max};
    --base-font-size: {base_font_size};
    --link: {link};
    --link-hover: {link_hover};
    --reveal-duration: {duration};
    --reveal-easing: {easing};
    --reveal-offset: {offset};
}}"#,
        moranga = config.fonts.moranga,
        silka = config.fonts.silka,
        navbar_height = config.layout.navbar_height,
        logo = config.layout.logo,
        container_padding = config.layout.container_padding,
        container_max = config.layout.container_max,
        base_font_size = config.layout.base_font_size,
        link = config.shadows.link,
        link_hover = config.shadows.link_hover,
        duration = config.animation.duration,
        easing = config.animation.easing,
        offset = config.animation.offset,
    )
}
