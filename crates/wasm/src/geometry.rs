use folio_core::geometry::{PageGeometry, Section};
use web_sys::{HtmlElement, Window};

/// Live layout reads against the window and the scanned sections.
pub struct DomGeometry {
    window: Window,
    sections: Vec<(String, HtmlElement)>,
}

impl DomGeometry {
    pub fn new(window: Window, sections: Vec<(String, HtmlElement)>) -> Self {
        Self { window, sections }
    }
}

impl PageGeometry for DomGeometry {
    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or_default()
    }

    fn viewport_width(&self) -> f64 {
        self.window
            .inner_width()
            .ok()
            .and_then(|w| w.as_f64())
            .unwrap_or_default()
    }

    fn sections(&self) -> Vec<Section> {
        self.sections
            .iter()
            .map(|(id, el)| Section::new(id.clone(), f64::from(el.offset_top()), f64::from(el.offset_height())))
            .collect()
    }
}
