//! Where the bridge finds things in the document, plus the bridge-level
//! config wrapper around [`PageConfig`].

use folio_core::PageConfig;
use serde::{Deserialize, Serialize};

use crate::errors::FolioError;

/// Id of the optional inline JSON config block.
pub const CONFIG_SCRIPT_ID: &str = "folio-config";

/// CSS selectors for every element the page reacts to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selectors {
    pub navbar: String,
    pub nav_menu: String,
    pub mobile_menu: String,
    /// Links whose `href` is `#<section id>`.
    pub nav_link: String,
    pub section: String,
    pub contact_form: String,
    pub subtitle: String,
    pub fade: String,
    /// Fade elements that take a per-sibling delay.
    pub stagger: String,
    pub skill_item: String,
    pub counter: String,
    pub slide: String,
    pub slide_next: String,
    pub slide_prev: String,
    /// Slide dots; the attribute value is the slide index.
    pub slide_dot: String,
    pub shape: String,
    pub filter_button: String,
    pub portfolio_item: String,
    pub preloader: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            navbar: "#navbar".into(),
            nav_menu: "#nav-menu".into(),
            mobile_menu: "#mobile-menu".into(),
            nav_link: ".nav-link".into(),
            section: "section[id]".into(),
            contact_form: "#contactForm".into(),
            subtitle: ".hero-subtitle".into(),
            fade: ".fade-in, .fade-in-left, .fade-in-right, .fade-in-up".into(),
            stagger: ".portfolio-item, .skill-category".into(),
            skill_item: ".skill-item".into(),
            counter: ".stat-number".into(),
            slide: "[data-slide]".into(),
            slide_next: "[data-slide-next]".into(),
            slide_prev: "[data-slide-prev]".into(),
            slide_dot: "[data-slide-to]".into(),
            shape: ".shape".into(),
            filter_button: ".filter-btn[data-filter]".into(),
            portfolio_item: ".portfolio-item".into(),
            preloader: ".preloader".into(),
        }
    }
}

/// Class names of bridge-created elements and their parts.
pub mod created {
    pub const SCROLL_TOP: &str = "scroll-to-top";
    pub const THEME_TOGGLE: &str = "dark-mode-toggle";
    pub const TOAST: &str = "notification";
    pub const TOAST_CONTENT: &str = "notification-content";
    pub const TOAST_MESSAGE: &str = "notification-message";
    pub const TOAST_CLOSE: &str = "notification-close";
    /// Attribute on a toast's close button holding the toast id.
    pub const TOAST_ID_ATTR: &str = "data-toast";
    pub const PRELOADER: &str = "preloader";
}

/// Page tuning plus document selectors, as one JSON object.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BridgeConfig {
    #[serde(flatten)]
    pub page: PageConfig,
    #[serde(default)]
    pub selectors: Selectors,
}

impl BridgeConfig {
    pub fn from_json(json: &str) -> Result<Self, FolioError> {
        let config: Self = serde_json::from_str(json)?;
        config.page.validate()?;
        Ok(config)
    }
}

/// Section id addressed by an in-page link, e.g. `#about`.
pub fn parse_section_href(href: &str) -> Option<&str> {
    let id = href.trim().strip_prefix('#')?;
    if id.is_empty() || id.contains(|c: char| c == '#' || c.is_whitespace()) {
        return None;
    }
    Some(id)
}

/// Slide index from a dot's attribute value.
pub fn parse_slide_index(value: &str) -> Option<usize> {
    value.trim().parse().ok()
}
