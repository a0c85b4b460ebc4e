use folio_protocol::{Target, ViewCommand};

use crate::config::FilterConfig;
use crate::schedule::{Effects, TimerTask};

/// Filter value that matches every item.
pub const ALL: &str = "all";
const SHOWN: &str = "shown";
const ACTIVE: &str = "active";

/// Category filter over the portfolio grid.
///
/// Showing is two-phase (display, then the `shown` transition 100ms later);
/// hiding is the reverse (drop `shown`, then hide after 300ms). Each
/// selection bumps a counter carried by its timers, so a quick second click
/// cancels the first click's pending phases.
#[derive(Debug, Clone)]
pub struct PortfolioFilter {
    buttons: Vec<String>,
    items: Vec<Vec<String>>,
    selection: u64,
    config: FilterConfig,
}

impl PortfolioFilter {
    /// `buttons`: each button's filter value. `items`: each item's categories.
    pub fn new(buttons: Vec<String>, items: Vec<Vec<String>>, config: FilterConfig) -> Self {
        Self {
            buttons,
            items,
            selection: 0,
            config,
        }
    }

    pub fn matches(&self, item: usize, filter: &str) -> bool {
        filter == ALL
            || self
                .items
                .get(item)
                .is_some_and(|cats| cats.iter().any(|c| c == filter))
    }

    /// Every item starts in its shown state.
    pub fn mount(&self) -> Vec<ViewCommand> {
        (0..self.items.len())
            .map(|i| ViewCommand::add_class(Target::PortfolioItem(i), SHOWN))
            .collect()
    }

    pub fn select(&mut self, filter: &str) -> Effects {
        self.selection += 1;
        let selection = self.selection;
        let mut effects = Effects::new();

        for button in &self.buttons {
            effects.push(ViewCommand::toggle_class(
                Target::FilterButton(button.clone()),
                ACTIVE,
                button == filter,
            ));
        }

        for item in 0..self.items.len() {
            let target = Target::PortfolioItem(item);
            if self.matches(item, filter) {
                effects.push(ViewCommand::Show { target });
                effects.after(self.config.show_ms, TimerTask::FilterReveal { selection, item });
            } else {
                effects.push(ViewCommand::remove_class(target, SHOWN));
                effects.after(self.config.hide_ms, TimerTask::FilterHide { selection, item });
            }
        }
        effects
    }

    pub fn on_reveal(&self, selection: u64, item: usize) -> Effects {
        if selection != self.selection {
            return Effects::new();
        }
        Effects::from_commands(vec![ViewCommand::add_class(Target::PortfolioItem(item), SHOWN)])
    }

    pub fn on_hide(&self, selection: u64, item: usize) -> Effects {
        if selection != self.selection {
            return Effects::new();
        }
        Effects::from_commands(vec![ViewCommand::Hide {
            target: Target::PortfolioItem(item),
        }])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter() -> PortfolioFilter {
        PortfolioFilter::new(
            vec!["all".into(), "web".into(), "design".into()],
            vec![
                vec!["web".into()],
                vec!["design".into()],
                vec!["web".into(), "design".into()],
            ],
            FilterConfig::default(),
        )
    }

    fn shown_items(effects: &Effects) -> Vec<usize> {
        effects
            .commands
            .iter()
            .filter_map(|c| match c {
                ViewCommand::Show {
                    target: Target::PortfolioItem(i),
                } => Some(*i),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn all_shows_everything() {
        let mut f = filter();
        assert_eq!(shown_items(&f.select("all")), vec![0, 1, 2]);
    }

    #[test]
    fn category_shows_matches_only() {
        let mut f = filter();
        let fx = f.select("design");
        assert_eq!(shown_items(&fx), vec![1, 2]);
        assert!(fx.commands.contains(&ViewCommand::add_class(
            Target::FilterButton("design".into()),
            "active"
        )));
        assert!(fx.commands.contains(&ViewCommand::remove_class(
            Target::FilterButton("all".into()),
            "active"
        )));
        assert!(fx.timers.iter().any(|t| t.delay_ms == 300.0
            && t.task == TimerTask::FilterHide { selection: 1, item: 0 }));
    }

    #[test]
    fn newer_selection_cancels_pending_phases() {
        let mut f = filter();
        f.select("web");
        f.select("all");
        assert!(f.on_hide(1, 1).is_empty());
        assert_eq!(f.on_reveal(2, 1).commands.len(), 1);
    }
}
