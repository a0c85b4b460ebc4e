//! Event kind → handler routing.
//!
//! The table is data, so the full wiring (including handlers deliberately
//! registered more than once) can be inspected and tested.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Scroll,
    Resize,
    KeyDown,
    MouseDown,
    Click,
    Submit,
    Intersection,
    Timer,
    Load,
    ScriptError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handler {
    NavbarStyle,
    ActiveSection,
    ScrollTopButton,
    Parallax,
    /// Navbar style and active section again, behind the scroll throttle.
    ThrottledScrollSync,
    MenuBreakpoint,
    MenuEscape,
    KeyboardFocus,
    SlideKeys,
    PointerFocus,
    Clicks,
    ContactSubmit,
    Reveal,
    Timers,
    Preloader,
    ErrorReport,
}

impl fmt::Display for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Debug, Clone, Default)]
pub struct DispatchTable {
    routes: Vec<(EventKind, Handler)>,
}

impl DispatchTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The page's wiring.
    ///
    /// Scroll runs the navbar and active-section sync both directly and
    /// through the throttle. Both paths are idempotent, so the throttled copy
    /// only ever re-asserts state the direct copy already applied.
    pub fn standard() -> Self {
        use EventKind as E;
        use Handler as H;

        let mut table = Self::new();
        for handler in [
            H::NavbarStyle,
            H::ActiveSection,
            H::ScrollTopButton,
            H::Parallax,
            H::ThrottledScrollSync,
        ] {
            table.register(E::Scroll, handler);
        }
        table.register(E::Resize, H::MenuBreakpoint);
        table.register(E::KeyDown, H::MenuEscape);
        table.register(E::KeyDown, H::KeyboardFocus);
        table.register(E::KeyDown, H::SlideKeys);
        table.register(E::MouseDown, H::PointerFocus);
        table.register(E::Click, H::Clicks);
        table.register(E::Submit, H::ContactSubmit);
        table.register(E::Intersection, H::Reveal);
        table.register(E::Timer, H::Timers);
        table.register(E::Load, H::Preloader);
        table.register(E::ScriptError, H::ErrorReport);
        table
    }

    /// Append a handler; it runs after those already registered for `kind`.
    pub fn register(&mut self, kind: EventKind, handler: Handler) {
        self.routes.push((kind, handler));
    }

    /// Handlers for `kind`, in registration order.
    pub fn handlers_for(&self, kind: EventKind) -> impl Iterator<Item = Handler> + '_ {
        self.routes
            .iter()
            .filter(move |(k, _)| *k == kind)
            .map(|(_, h)| *h)
    }

    /// How many times `handler` is registered under `kind`.
    pub fn registrations(&self, kind: EventKind, handler: Handler) -> usize {
        self.handlers_for(kind).filter(|h| *h == handler).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_fanout_order() {
        let table = DispatchTable::standard();
        let scroll: Vec<_> = table.handlers_for(EventKind::Scroll).collect();
        assert_eq!(
            scroll,
            vec![
                Handler::NavbarStyle,
                Handler::ActiveSection,
                Handler::ScrollTopButton,
                Handler::Parallax,
                Handler::ThrottledScrollSync,
            ]
        );
    }

    #[test]
    fn every_event_kind_is_routed() {
        let table = DispatchTable::standard();
        for kind in [
            EventKind::Scroll,
            EventKind::Resize,
            EventKind::KeyDown,
            EventKind::MouseDown,
            EventKind::Click,
            EventKind::Submit,
            EventKind::Intersection,
            EventKind::Timer,
            EventKind::Load,
            EventKind::ScriptError,
        ] {
            assert!(table.handlers_for(kind).next().is_some(), "{kind:?}");
        }
    }

    #[test]
    fn duplicate_registration_is_visible() {
        let mut table = DispatchTable::standard();
        assert_eq!(table.registrations(EventKind::Click, Handler::Clicks), 1);
        table.register(EventKind::Click, Handler::Clicks);
        assert_eq!(table.registrations(EventKind::Click, Handler::Clicks), 2);
    }
}
