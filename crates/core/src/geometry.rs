use folio_protocol::ElementBox;

/// A top-level scrollable content region.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub id: String,
    pub bounds: ElementBox,
}

impl Section {
    pub fn new(id: impl Into<String>, top: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            bounds: ElementBox::new(top, height),
        }
    }
}

/// Live read access to the document's scroll state and layout.
///
/// Implementations must re-measure on every call; callers never cache the
/// result across events.
pub trait PageGeometry {
    /// Vertical scroll offset of the window.
    fn scroll_y(&self) -> f64;

    /// Inner width of the viewport.
    fn viewport_width(&self) -> f64;

    /// All sections in document order.
    fn sections(&self) -> Vec<Section>;

    /// Bounds of one section, if it exists.
    fn section(&self, id: &str) -> Option<Section> {
        self.sections().into_iter().find(|s| s.id == id)
    }
}

/// Fixed geometry snapshot, for tests and headless drivers.
#[derive(Debug, Clone, Default)]
pub struct StaticGeometry {
    pub scroll_y: f64,
    pub viewport_width: f64,
    pub sections: Vec<Section>,
}

impl StaticGeometry {
    pub fn new(sections: Vec<Section>) -> Self {
        Self {
            scroll_y: 0.0,
            viewport_width: 1280.0,
            sections,
        }
    }

    /// Lay sections out back to back from `y = 0`.
    pub fn stacked(sections: &[(&str, f64)]) -> Self {
        let mut top = 0.0;
        let sections = sections
            .iter()
            .map(|&(id, height)| {
                let s = Section::new(id, top, height);
                top += height;
                s
            })
            .collect();
        Self::new(sections)
    }

    pub fn at(mut self, scroll_y: f64) -> Self {
        self.scroll_y = scroll_y;
        self
    }
}

impl PageGeometry for StaticGeometry {
    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    fn sections(&self) -> Vec<Section> {
        self.sections.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stacked_sections_are_contiguous() {
        let g = StaticGeometry::stacked(&[("home", 600.0), ("about", 400.0)]);
        assert_eq!(g.sections[1].bounds.top, 600.0);
        assert_eq!(g.section("about").map(|s| s.bounds.height), Some(400.0));
        assert!(g.section("missing").is_none());
    }
}
