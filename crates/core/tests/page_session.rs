//! Integration tests driving a whole `Page` with synthetic events and a
//! virtual clock.

use folio_core::contact::ContactForm;
use folio_core::geometry::StaticGeometry;
use folio_core::page::{ClickTarget, Effects, Page, PageEvent, PageLayout};
use folio_core::reveal::{IntersectionEntry, RevealSpec};
use folio_core::schedule::TimerQueue;
use folio_core::theme::MemoryStore;
use folio_core::PageConfig;
use folio_protocol::{ElementId, Severity, Target, Theme, ViewCommand};

/// Page plus a virtual clock and an applied-command log.
struct Session {
    page: Page,
    geometry: StaticGeometry,
    timers: TimerQueue,
    now: f64,
    log: Vec<ViewCommand>,
}

impl Session {
    fn new(layout: PageLayout, store: MemoryStore) -> Self {
        let geometry = StaticGeometry::stacked(&[
            ("home", 800.0),
            ("about", 700.0),
            ("skills", 600.0),
            ("portfolio", 900.0),
            ("contact", 600.0),
        ]);
        let mut page = Page::new(PageConfig::default(), layout, Box::new(store));
        let mounted = page.mount(&geometry);
        let mut session = Self {
            page,
            geometry,
            timers: TimerQueue::new(),
            now: 0.0,
            log: Vec::new(),
        };
        session.absorb(mounted);
        session
    }

    fn absorb(&mut self, effects: Effects) {
        self.timers.arm_all(self.now, effects.timers);
        self.log.extend(effects.commands);
    }

    fn send(&mut self, event: PageEvent) -> Vec<ViewCommand> {
        let effects = self.page.handle(&event, &self.geometry, self.now);
        let commands = effects.commands.clone();
        self.absorb(effects);
        commands
    }

    fn scroll_to(&mut self, y: f64) -> Vec<ViewCommand> {
        self.geometry.scroll_y = y;
        self.send(PageEvent::Scroll)
    }

    /// Advance the clock, firing due timers in order.
    fn advance(&mut self, ms: f64) {
        let until = self.now + ms;
        while let Some((due, request)) = self.timers.pop_due(until) {
            self.now = due;
            self.send(PageEvent::Timer(request));
        }
        self.now = until;
    }

    fn toasts_in_document(&self) -> usize {
        let mut live = Vec::new();
        for cmd in &self.log {
            match cmd {
                ViewCommand::InsertToast { id, .. } => live.push(*id),
                ViewCommand::Remove {
                    target: Target::Toast(id),
                } => live.retain(|t| t != id),
                _ => {}
            }
        }
        live.len()
    }
}

fn layout() -> PageLayout {
    PageLayout {
        nav_targets: ["home", "about", "skills", "portfolio", "contact"]
            .into_iter()
            .map(String::from)
            .collect(),
        reveal: vec![
            RevealSpec::fade(0),
            RevealSpec::staggered(1, 0),
            RevealSpec::staggered(2, 1),
            RevealSpec::skill_bar(3),
            RevealSpec::counter(4, "150+"),
        ],
        slide_count: 4,
        shape_count: 3,
        filter_buttons: vec!["all".into(), "web".into()],
        portfolio_items: vec![vec!["web".into()], vec!["design".into()]],
        has_subtitle: true,
    }
}

fn session() -> Session {
    Session::new(layout(), MemoryStore::new())
}

#[test]
fn contact_form_end_to_end() {
    let mut s = session();
    let cmds = s.send(PageEvent::Submit(ContactForm::new("Ada", "ada@x.io", "Hi", "Hello")));

    let url = cmds
        .iter()
        .find_map(|c| match c {
            ViewCommand::OpenUrl { url } => Some(url.clone()),
            _ => None,
        })
        .expect("mail handoff");
    assert!(url.starts_with("mailto:mohamed.maamar@example.com?subject=Hi&body="));
    assert!(url.contains("Name%3A%20Ada"));
    assert!(url.contains("Email%3A%20ada%40x.io"));
    assert!(url.contains("Hello"));

    let toast = s.page.toasts().current().expect("success toast");
    assert_eq!(toast.severity, Severity::Success);
    assert!(cmds.contains(&ViewCommand::ResetForm {
        target: Target::ContactForm
    }));
}

#[test]
fn invalid_submission_keeps_form_and_reports_error() {
    let mut s = session();
    let cmds = s.send(PageEvent::Submit(ContactForm::new("Ada", "not-an-email", "Hi", "Hello")));
    assert!(!cmds.iter().any(|c| matches!(c, ViewCommand::OpenUrl { .. } | ViewCommand::ResetForm { .. })));
    let toast = s.page.toasts().current().expect("error toast");
    assert_eq!(toast.severity, Severity::Error);
    assert_eq!(toast.text, "Please enter a valid email address");

    s.send(PageEvent::Submit(ContactForm::new("", "ada@x.io", "Hi", "Hello")));
    assert_eq!(
        s.page.toasts().current().map(|t| t.text.as_str()),
        Some("Please fill in all fields")
    );
    assert_eq!(s.toasts_in_document(), 1);
}

#[test]
fn toast_auto_dismisses() {
    let mut s = session();
    s.send(PageEvent::Submit(ContactForm::default()));
    assert_eq!(s.toasts_in_document(), 1);
    s.advance(4_999.0);
    assert_eq!(s.toasts_in_document(), 1);
    s.advance(400.0);
    assert_eq!(s.toasts_in_document(), 0);
    assert!(s.page.toasts().current().is_none());
}

#[test]
fn rapid_toasts_collapse_to_last() {
    let mut s = session();
    for n in 0..5 {
        s.send(PageEvent::Submit(ContactForm::new(format!("n{n}"), "bad", "s", "m")));
        s.advance(10.0);
    }
    s.send(PageEvent::Submit(ContactForm::new("Ada", "ada@x.io", "Hi", "Hello")));
    assert_eq!(s.toasts_in_document(), 1);
    assert_eq!(s.page.toasts().current().map(|t| t.severity), Some(Severity::Success));
    // Timers left behind by the replaced toasts must not remove the live one.
    s.advance(4_990.0);
    assert_eq!(s.toasts_in_document(), 1);
}

#[test]
fn scrolling_tracks_sections_and_thresholds() {
    let mut s = session();
    assert_eq!(s.page.nav().active(), Some("home"));

    let cmds = s.scroll_to(60.0);
    assert!(cmds.contains(&ViewCommand::add_class(Target::Navbar, "scrolled")));
    assert!(!cmds.iter().any(|c| c.target() == Some(&Target::ScrollTopButton)));

    let cmds = s.scroll_to(1_450.0);
    assert!(cmds.contains(&ViewCommand::add_class(Target::ScrollTopButton, "visible")));
    assert_eq!(s.page.nav().active(), Some("skills"));

    // Same offset again: nothing to change.
    s.now += 200.0;
    let repeat = s.scroll_to(1_450.0);
    assert!(repeat.is_empty(), "{repeat:?}");

    s.scroll_to(10_000.0);
    assert_eq!(s.page.nav().active(), None);
    assert_eq!(s.page.nav().links().iter().filter(|l| l.is_active).count(), 0);

    let cmds = s.scroll_to(0.0);
    assert!(cmds.contains(&ViewCommand::remove_class(Target::Navbar, "scrolled")));
    assert!(cmds.contains(&ViewCommand::remove_class(Target::ScrollTopButton, "visible")));
}

#[test]
fn nav_click_scrolls_below_navbar_and_closes_menu() {
    let mut s = session();
    s.send(PageEvent::Click(ClickTarget::MobileMenuToggle));
    let cmds = s.send(PageEvent::Click(ClickTarget::NavLink("about".into())));
    assert!(cmds.contains(&ViewCommand::ScrollTo {
        top: 730.0,
        smooth: true
    }));
    assert!(!s.page.menu().is_open());
}

#[test]
fn counters_and_reveals_fire_once() {
    let mut s = session();
    let entry = |id, ratio| {
        PageEvent::Intersection(IntersectionEntry {
            element: ElementId(id),
            ratio,
        })
    };

    let cmds = s.send(entry(2, 0.4));
    assert!(cmds.contains(&ViewCommand::set_var(
        Target::Element(ElementId(2)),
        "--reveal-delay",
        "0.1s"
    )));
    assert!(s.send(entry(2, 0.9)).is_empty());

    s.send(entry(4, 0.6));
    s.advance(2_500.0);
    let last_text = s.log.iter().rev().find_map(|c| match c {
        ViewCommand::SetText {
            target: Target::Element(ElementId(4)),
            text,
        } => Some(text.clone()),
        _ => None,
    });
    assert_eq!(last_text.as_deref(), Some("150+"));
}

#[test]
fn typing_effect_cycles_subtitle() {
    let mut s = session();
    s.advance(999.0);
    assert!(!s.log.iter().any(|c| c.target() == Some(&Target::Subtitle)));
    s.advance(1.0);
    assert!(s.log.contains(&ViewCommand::set_text(Target::Subtitle, "F")));
    // "Full Stack Developer" is 20 chars: 19 more at 100ms, then the hold.
    s.advance(1_900.0);
    assert!(s.log.contains(&ViewCommand::set_text(Target::Subtitle, "Full Stack Developer")));
}

#[test]
fn slideshow_cycles_with_clicks_and_keys() {
    let mut s = session();
    assert_eq!(s.page.slides().index(), 0);
    for _ in 0..4 {
        s.send(PageEvent::Click(ClickTarget::NextSlide));
    }
    assert_eq!(s.page.slides().index(), 0);
    s.send(PageEvent::key("ArrowLeft"));
    assert_eq!(s.page.slides().index(), 3);
    s.send(PageEvent::Click(ClickTarget::SlideDot(9)));
    assert_eq!(s.page.slides().index(), 0);
}

#[test]
fn arrow_keys_while_typing_leave_slides_alone() {
    let mut s = session();
    s.send(PageEvent::key_in_editable("ArrowRight"));
    s.send(PageEvent::key_in_editable("ArrowLeft"));
    s.send(PageEvent::key_in_editable("ArrowRight"));
    assert_eq!(s.page.slides().index(), 0);
    s.send(PageEvent::key("ArrowRight"));
    assert_eq!(s.page.slides().index(), 1);
}

#[test]
fn theme_toggle_persists_across_pages() {
    let store = MemoryStore::with("theme", "dark");
    let mut s = Session::new(layout(), store);
    assert_eq!(s.page.theme().theme(), Theme::Dark);
    assert!(s.log.contains(&ViewCommand::set_attribute(Target::Root, "data-theme", "dark")));

    s.send(PageEvent::Click(ClickTarget::ThemeToggle));
    assert_eq!(s.page.theme().theme(), Theme::Light);
}

#[test]
fn preloader_leaves_after_load() {
    let mut s = session();
    s.send(PageEvent::Load);
    s.advance(1_000.0);
    assert!(s.log.contains(&ViewCommand::add_class(Target::Preloader, "hidden")));
    s.advance(500.0);
    assert!(s.log.contains(&ViewCommand::Remove {
        target: Target::Preloader
    }));
}

#[test]
fn teardown_silences_pending_timers() {
    let mut s = session();
    s.send(PageEvent::Intersection(IntersectionEntry {
        element: ElementId(4),
        ratio: 1.0,
    }));
    s.send(PageEvent::Submit(ContactForm::default()));
    s.advance(50.0);
    let before = s.log.len();

    s.page.teardown();
    s.advance(10_000.0);
    assert_eq!(s.log.len(), before);
}
