use folio_protocol::{Target, ViewCommand};

/// Shows exactly one of `count` slides.
///
/// Indices wrap at both ends: past the last slide goes to the first, before
/// the first goes to the last.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideSelector {
    count: usize,
    index: usize,
}

impl SlideSelector {
    pub fn new(count: usize) -> Self {
        Self { count, index: 0 }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Normalize `i` into `[0, count)`: `i >= count → 0`, `i < 0 → count - 1`.
    pub fn wrap(&self, i: isize) -> Option<usize> {
        if self.count == 0 {
            return None;
        }
        let wrapped = if i < 0 {
            self.count - 1
        } else if i as usize >= self.count {
            0
        } else {
            i as usize
        };
        Some(wrapped)
    }

    /// Store the wrapped index and show only that slide.
    ///
    /// With no slides this does nothing.
    pub fn show_slide(&mut self, i: isize) -> Vec<ViewCommand> {
        let Some(index) = self.wrap(i) else {
            return Vec::new();
        };
        self.index = index;
        (0..self.count)
            .map(|n| {
                if n == index {
                    ViewCommand::Show {
                        target: Target::Slide(n),
                    }
                } else {
                    ViewCommand::Hide {
                        target: Target::Slide(n),
                    }
                }
            })
            .collect()
    }

    pub fn next_slide(&mut self) -> Vec<ViewCommand> {
        self.show_slide(self.index as isize + 1)
    }

    pub fn prev_slide(&mut self) -> Vec<ViewCommand> {
        self.show_slide(self.index as isize - 1)
    }

    /// Arrow keys step through slides; other keys are ignored.
    pub fn on_key(&mut self, key: &str) -> Vec<ViewCommand> {
        match key {
            "ArrowRight" => self.next_slide(),
            "ArrowLeft" => self.prev_slide(),
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shown(commands: &[ViewCommand]) -> Vec<usize> {
        commands
            .iter()
            .filter_map(|c| match c {
                ViewCommand::Show {
                    target: Target::Slide(n),
                } => Some(*n),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn wraps_both_directions() {
        let mut s = SlideSelector::new(4);
        assert_eq!(shown(&s.show_slide(4)), vec![0]);
        assert_eq!(shown(&s.show_slide(-1)), vec![3]);
        assert_eq!(s.index(), 3);
        assert_eq!(shown(&s.next_slide()), vec![0]);
        assert_eq!(shown(&s.prev_slide()), vec![3]);
    }

    #[test]
    fn wrapped_index_always_in_range() {
        let s = SlideSelector::new(5);
        for i in -3..12 {
            let w = s.wrap(i).unwrap();
            assert!(w < 5, "{i} -> {w}");
        }
    }

    #[test]
    fn exactly_one_slide_visible() {
        let mut s = SlideSelector::new(3);
        for _ in 0..7 {
            let cmds = s.next_slide();
            assert_eq!(cmds.len(), 3);
            assert_eq!(shown(&cmds).len(), 1);
        }
    }

    #[test]
    fn full_cycle_returns_to_start() {
        for n in 1..6 {
            let mut s = SlideSelector::new(n);
            s.show_slide(0);
            for _ in 0..n {
                s.next_slide();
            }
            assert_eq!(s.index(), 0, "n = {n}");
        }
    }

    #[test]
    fn empty_slideshow_is_a_no_op() {
        let mut s = SlideSelector::new(0);
        assert!(s.show_slide(0).is_empty());
        assert!(s.next_slide().is_empty());
        assert!(s.prev_slide().is_empty());
        assert_eq!(s.index(), 0);
    }

    #[test]
    fn arrow_keys_step() {
        let mut s = SlideSelector::new(2);
        assert_eq!(shown(&s.on_key("ArrowRight")), vec![1]);
        assert!(s.on_key("Enter").is_empty());
    }
}
