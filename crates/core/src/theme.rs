use std::collections::HashMap;

use folio_protocol::{Target, Theme, ViewCommand};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("preference storage unavailable")]
    Unavailable,
    #[error("preference storage rejected the write: {0}")]
    Write(String),
}

/// Process-wide persistent string key-value storage.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory store for tests and hosts without persistence.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.values.insert(key.to_string(), value.to_string());
        store
    }

    pub fn value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Owns the current theme and its persisted copy.
#[derive(Debug, Clone)]
pub struct ThemeController {
    theme: Theme,
    key: String,
}

impl ThemeController {
    /// Read the stored preference once. Missing, unknown or unreadable values
    /// fall back to light.
    pub fn load(store: &dyn PreferenceStore, key: impl Into<String>) -> Self {
        let key = key.into();
        let theme = match store.get(&key) {
            Ok(Some(value)) => Theme::parse(&value).unwrap_or_else(|| {
                tracing::warn!(%value, "ignoring unknown stored theme");
                Theme::default()
            }),
            Ok(None) => Theme::default(),
            Err(err) => {
                tracing::warn!("reading theme preference failed: {err}");
                Theme::default()
            }
        };
        Self { theme, key }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Commands that reflect the current theme on the document root.
    pub fn apply(&self) -> Vec<ViewCommand> {
        vec![ViewCommand::set_attribute(Target::Root, "data-theme", self.theme.as_str())]
    }

    /// Flip the theme, persist it, and update root and toggle icon.
    ///
    /// A failed write is logged; the in-page theme still changes.
    pub fn toggle(&mut self, store: &mut dyn PreferenceStore) -> Vec<ViewCommand> {
        self.theme = self.theme.toggled();
        if let Err(err) = store.set(&self.key, self.theme.as_str()) {
            tracing::warn!("persisting theme failed: {err}");
        }
        let mut commands = self.apply();
        commands.push(ViewCommand::set_attribute(
            Target::ThemeToggle,
            "data-icon",
            self.theme.toggle_icon(),
        ));
        commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenStore;

    impl PreferenceStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::Unavailable)
        }

        fn set(&mut self, _key: &str, value: &str) -> Result<(), StoreError> {
            Err(StoreError::Write(value.to_string()))
        }
    }

    #[test]
    fn defaults_to_light() {
        assert_eq!(ThemeController::load(&MemoryStore::new(), "theme").theme(), Theme::Light);
        assert_eq!(
            ThemeController::load(&MemoryStore::with("theme", "purple"), "theme").theme(),
            Theme::Light
        );
        assert_eq!(ThemeController::load(&BrokenStore, "theme").theme(), Theme::Light);
    }

    #[test]
    fn restores_saved_theme() {
        let store = MemoryStore::with("theme", "dark");
        let controller = ThemeController::load(&store, "theme");
        assert_eq!(
            controller.apply(),
            vec![ViewCommand::set_attribute(Target::Root, "data-theme", "dark")]
        );
    }

    #[test]
    fn toggle_persists() {
        let mut store = MemoryStore::new();
        let mut controller = ThemeController::load(&store, "theme");
        let cmds = controller.toggle(&mut store);
        assert_eq!(store.value("theme"), Some("dark"));
        assert!(cmds.contains(&ViewCommand::set_attribute(Target::ThemeToggle, "data-icon", "sun")));
        controller.toggle(&mut store);
        assert_eq!(store.value("theme"), Some("light"));
    }

    #[test]
    fn failed_write_still_switches() {
        let mut controller = ThemeController::load(&BrokenStore, "theme");
        controller.toggle(&mut BrokenStore);
        assert_eq!(controller.theme(), Theme::Dark);
    }
}
