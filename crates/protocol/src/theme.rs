use serde::{Deserialize, Serialize};

/// Page color scheme, persisted as `"light"` / `"dark"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Parse a stored value. Anything other than the two known names is
    /// rejected so a corrupted entry falls back to the default.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Icon shown on the toggle: a moon offers dark mode, a sun offers light.
    pub fn toggle_icon(self) -> &'static str {
        match self {
            Self::Light => "moon",
            Self::Dark => "sun",
        }
    }
}

/// Toast severity. Drives the `notification-<severity>` class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Success,
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Error => "error",
        }
    }

    pub fn class_name(self) -> String {
        format!("notification-{}", self.as_str())
    }
}
