use folio_protocol::{Target, ViewCommand};

use crate::config::PreloaderConfig;
use crate::schedule::{Effects, TimerTask};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Showing,
    Holding,
    Fading,
    Gone,
}

/// Full-screen loading overlay, dismissed after the page's `load` event.
#[derive(Debug, Clone)]
pub struct Preloader {
    phase: Phase,
    config: PreloaderConfig,
}

impl Preloader {
    pub fn new(config: PreloaderConfig) -> Self {
        Self {
            phase: Phase::Showing,
            config,
        }
    }

    pub fn is_gone(&self) -> bool {
        self.phase == Phase::Gone
    }

    /// Window finished loading: hold briefly, then fade.
    pub fn on_load(&mut self) -> Effects {
        let mut effects = Effects::new();
        if self.phase == Phase::Showing {
            self.phase = Phase::Holding;
            effects.after(self.config.hold_ms, TimerTask::PreloaderFade);
        }
        effects
    }

    pub fn fade(&mut self) -> Effects {
        let mut effects = Effects::new();
        if self.phase == Phase::Holding {
            self.phase = Phase::Fading;
            effects.push(ViewCommand::add_class(Target::Preloader, "hidden"));
            effects.after(self.config.fade_ms, TimerTask::PreloaderRemove);
        }
        effects
    }

    pub fn remove(&mut self) -> Effects {
        let mut effects = Effects::new();
        if self.phase == Phase::Fading {
            self.phase = Phase::Gone;
            effects.push(ViewCommand::Remove {
                target: Target::Preloader,
            });
        }
        effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_hold_fade_remove() {
        let mut p = Preloader::new(PreloaderConfig::default());
        let loaded = p.on_load();
        assert_eq!(loaded.timers[0].delay_ms, 1000.0);
        assert!(p.on_load().is_empty());

        let faded = p.fade();
        assert_eq!(faded.commands, vec![ViewCommand::add_class(Target::Preloader, "hidden")]);
        assert_eq!(faded.timers[0].task, TimerTask::PreloaderRemove);

        assert_eq!(p.remove().commands.len(), 1);
        assert!(p.is_gone());
        assert!(p.remove().is_empty());
    }

    #[test]
    fn timers_before_load_do_nothing() {
        let mut p = Preloader::new(PreloaderConfig::default());
        assert!(p.fade().is_empty());
        assert!(p.remove().is_empty());
    }
}
