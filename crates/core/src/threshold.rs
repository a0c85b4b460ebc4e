use folio_protocol::{Target, ViewCommand};

/// Binary state engaged once the scroll offset passes a fixed line.
///
/// `engaged = y > threshold` (strict). [`update`](Self::update) reports only
/// transitions, so feeding the same offset repeatedly is a harmless no-op.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdTrigger {
    threshold: f64,
    engaged: bool,
}

impl ThresholdTrigger {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            engaged: false,
        }
    }

    pub fn engaged_at(&self, y: f64) -> bool {
        y > self.threshold
    }

    pub fn is_engaged(&self) -> bool {
        self.engaged
    }

    /// Returns the new state if it changed.
    pub fn update(&mut self, y: f64) -> Option<bool> {
        let next = self.engaged_at(y);
        if next == self.engaged {
            return None;
        }
        self.engaged = next;
        Some(next)
    }
}

/// A threshold trigger bound to one class on one element.
#[derive(Debug, Clone)]
pub struct ClassTrigger {
    trigger: ThresholdTrigger,
    target: Target,
    class: &'static str,
}

impl ClassTrigger {
    /// Navbar switches to its compact `scrolled` style.
    pub fn navbar(threshold: f64) -> Self {
        Self {
            trigger: ThresholdTrigger::new(threshold),
            target: Target::Navbar,
            class: "scrolled",
        }
    }

    /// Floating scroll-to-top button becomes `visible`.
    pub fn scroll_top_button(threshold: f64) -> Self {
        Self {
            trigger: ThresholdTrigger::new(threshold),
            target: Target::ScrollTopButton,
            class: "visible",
        }
    }

    pub fn is_engaged(&self) -> bool {
        self.trigger.is_engaged()
    }

    pub fn update(&mut self, y: f64) -> Option<ViewCommand> {
        self.trigger
            .update(y)
            .map(|on| ViewCommand::toggle_class(self.target.clone(), self.class, on))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_strict() {
        let t = ThresholdTrigger::new(50.0);
        assert!(!t.engaged_at(50.0));
        assert!(t.engaged_at(50.5));
    }

    #[test]
    fn repeated_offsets_are_silent() {
        let mut navbar = ClassTrigger::navbar(50.0);
        assert!(navbar.update(10.0).is_none());
        assert_eq!(
            navbar.update(120.0),
            Some(ViewCommand::add_class(Target::Navbar, "scrolled"))
        );
        assert!(navbar.update(120.0).is_none());
        assert!(navbar.update(400.0).is_none());
        assert_eq!(
            navbar.update(0.0),
            Some(ViewCommand::remove_class(Target::Navbar, "scrolled"))
        );
    }

    #[test]
    fn scroll_top_button_uses_its_own_line() {
        let mut button = ClassTrigger::scroll_top_button(300.0);
        assert!(button.update(250.0).is_none());
        assert!(button.update(301.0).is_some());
        assert!(button.is_engaged());
    }
}
