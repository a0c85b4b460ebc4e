use serde::{Deserialize, Serialize};

/// Handle for an element the bridge registered at mount time (animated
/// elements, counters, skill bars).
///
/// Index into the bridge's element table. Stable for the page's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(pub u32);

/// Identity of one toast instance.
///
/// Monotonically increasing per page, so timers armed for an earlier toast
/// can never act on a later one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ToastId(pub u64);

/// Vertical extent of an element in document coordinates (CSS pixels).
///
/// Only the vertical axis matters for scroll-driven state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementBox {
    pub top: f64,
    pub height: f64,
}

impl ElementBox {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Half-open membership test: `[top, bottom)`.
    pub fn contains(&self, y: f64) -> bool {
        y >= self.top && y < self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_half_open() {
        let b = ElementBox::new(100.0, 50.0);
        assert!(b.contains(100.0));
        assert!(b.contains(149.9));
        assert!(!b.contains(150.0));
        assert!(!b.contains(99.9));
    }

    #[test]
    fn zero_height_contains_nothing() {
        let b = ElementBox::new(10.0, 0.0);
        assert!(!b.contains(10.0));
    }
}
