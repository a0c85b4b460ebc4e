use folio_protocol::{Target, ViewCommand};

use crate::geometry::{PageGeometry, Section};

const ACTIVE: &str = "active";

/// Find the section under `scroll_y + lookahead`.
///
/// Linear scan in document order; if ranges overlap the last match wins.
/// Returns `None` when the probe point lies outside every section.
pub fn resolve_active_section(scroll_y: f64, sections: &[Section], lookahead: f64) -> Option<&str> {
    let probe = scroll_y + lookahead;
    sections
        .iter()
        .rev()
        .find(|s| s.bounds.contains(probe))
        .map(|s| s.id.as_str())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub target_section_id: String,
    pub is_active: bool,
}

/// Active-link state for the navigation bar.
#[derive(Debug, Clone, Default)]
pub struct NavLinks {
    links: Vec<NavLink>,
}

impl NavLinks {
    pub fn new(targets: impl IntoIterator<Item = String>) -> Self {
        Self {
            links: targets
                .into_iter()
                .map(|target_section_id| NavLink {
                    target_section_id,
                    is_active: false,
                })
                .collect(),
        }
    }

    pub fn links(&self) -> &[NavLink] {
        &self.links
    }

    pub fn active(&self) -> Option<&str> {
        self.links
            .iter()
            .find(|l| l.is_active)
            .map(|l| l.target_section_id.as_str())
    }

    /// Make the link for `resolved` the only active one.
    ///
    /// Every link is cleared first, then the matching link (if any) is set.
    /// Only links whose flag actually flipped produce a command.
    pub fn sync(&mut self, resolved: Option<&str>) -> Vec<ViewCommand> {
        let mut commands = Vec::new();
        for link in &mut self.links {
            let should = resolved == Some(link.target_section_id.as_str());
            if link.is_active != should {
                link.is_active = should;
                commands.push(ViewCommand::toggle_class(
                    Target::NavLink(link.target_section_id.clone()),
                    ACTIVE,
                    should,
                ));
            }
        }
        commands
    }

    /// Resolve against live geometry and sync.
    pub fn update<G: PageGeometry + ?Sized>(&mut self, geometry: &G, lookahead: f64) -> Vec<ViewCommand> {
        let sections = geometry.sections();
        let resolved = resolve_active_section(geometry.scroll_y(), &sections, lookahead);
        self.sync(resolved)
    }
}

/// Where to scroll when a nav link for `section_id` is clicked.
///
/// The section's top minus the fixed navbar height. `None` if the section
/// does not exist.
pub fn scroll_target<G: PageGeometry + ?Sized>(
    geometry: &G,
    section_id: &str,
    navbar_offset: f64,
) -> Option<ViewCommand> {
    let section = geometry.section(section_id)?;
    Some(ViewCommand::ScrollTo {
        top: section.bounds.top - navbar_offset,
        smooth: true,
    })
}

/// Open/closed state of the collapsible mobile menu.
///
/// Mirrored as the `active` class on both the toggle and the nav container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MobileMenu {
    open: bool,
}

impl MobileMenu {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) -> Vec<ViewCommand> {
        self.open = !self.open;
        Self::render(self.open)
    }

    /// Close the menu. Emits nothing if it is already closed.
    pub fn close(&mut self) -> Vec<ViewCommand> {
        if !self.open {
            return Vec::new();
        }
        self.open = false;
        Self::render(false)
    }

    /// Force-close when the viewport grows past the desktop breakpoint.
    pub fn on_resize(&mut self, viewport_width: f64, breakpoint: f64) -> Vec<ViewCommand> {
        if viewport_width > breakpoint {
            self.close()
        } else {
            Vec::new()
        }
    }

    fn render(open: bool) -> Vec<ViewCommand> {
        vec![
            ViewCommand::toggle_class(Target::MobileMenuToggle, ACTIVE, open),
            ViewCommand::toggle_class(Target::NavMenu, ACTIVE, open),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::StaticGeometry;

    fn page() -> StaticGeometry {
        StaticGeometry::stacked(&[
            ("home", 800.0),
            ("about", 600.0),
            ("portfolio", 900.0),
            ("contact", 500.0),
        ])
    }

    fn links() -> NavLinks {
        NavLinks::new(
            ["home", "about", "portfolio", "contact"]
                .into_iter()
                .map(String::from),
        )
    }

    #[test]
    fn lookahead_shifts_the_probe() {
        let g = page();
        // 750 + 100 = 850 falls into "about" even though the viewport top is still in "home".
        assert_eq!(resolve_active_section(750.0, &g.sections, 100.0), Some("about"));
        assert_eq!(resolve_active_section(699.0, &g.sections, 100.0), Some("home"));
    }

    #[test]
    fn outside_every_section_resolves_nothing() {
        let g = page();
        assert_eq!(resolve_active_section(5000.0, &g.sections, 100.0), None);
    }

    #[test]
    fn overlapping_ranges_last_match_wins() {
        let sections = vec![Section::new("a", 0.0, 500.0), Section::new("b", 200.0, 500.0)];
        assert_eq!(resolve_active_section(300.0, &sections, 0.0), Some("b"));
    }

    #[test]
    fn exactly_one_link_active_inside_union() {
        let g = page();
        let mut nav = links();
        let end = g.sections.last().map(|s| s.bounds.bottom()).unwrap_or(0.0);
        let mut y = -100.0;
        while y + 100.0 < end {
            nav.update(&g.clone().at(y), 100.0);
            assert_eq!(nav.links().iter().filter(|l| l.is_active).count(), 1, "y = {y}");
            y += 37.0;
        }
        nav.update(&g.at(end), 100.0);
        assert_eq!(nav.links().iter().filter(|l| l.is_active).count(), 0);
    }

    #[test]
    fn sync_only_emits_changes() {
        let mut nav = links();
        let first = nav.sync(Some("about"));
        assert_eq!(first, vec![ViewCommand::add_class(Target::NavLink("about".into()), "active")]);
        assert!(nav.sync(Some("about")).is_empty());

        let moved = nav.sync(Some("contact"));
        assert_eq!(moved.len(), 2);
        assert_eq!(nav.active(), Some("contact"));
    }

    #[test]
    fn section_without_link_clears_all() {
        let mut nav = links();
        nav.sync(Some("home"));
        nav.sync(Some("footer"));
        assert_eq!(nav.active(), None);
    }

    #[test]
    fn scroll_target_compensates_navbar() {
        let g = page();
        assert_eq!(
            scroll_target(&g, "about", 70.0),
            Some(ViewCommand::ScrollTo {
                top: 730.0,
                smooth: true
            })
        );
        assert_eq!(scroll_target(&g, "nowhere", 70.0), None);
    }

    #[test]
    fn mobile_menu_closes_above_breakpoint() {
        let mut menu = MobileMenu::default();
        menu.toggle();
        assert!(menu.is_open());
        assert!(menu.on_resize(600.0, 768.0).is_empty());
        assert_eq!(menu.on_resize(1024.0, 768.0).len(), 2);
        assert!(!menu.is_open());
        assert!(menu.close().is_empty());
    }
}
