//! Page tuning knobs.
//!
//! Every field has a default matching the shipped page, so an empty JSON
//! object (or no config at all) yields the stock behavior. Partial objects
//! override only what they name.

mod defaults;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    #[error("{field} must be in (0, 1], got {value}")]
    RatioOutOfRange { field: &'static str, value: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub scroll: ScrollConfig,
    pub reveal: RevealConfig,
    pub counter: CounterConfig,
    pub toast: ToastConfig,
    pub typing: TypingConfig,
    pub contact: ContactConfig,
    pub theme: ThemeConfig,
    pub menu: MenuConfig,
    pub preloader: PreloaderConfig,
    pub filter: FilterConfig,
    pub parallax: ParallaxConfig,
    pub errors: ErrorConfig,
    #[serde(default = "defaults::log_level")]
    pub log_level: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            scroll: ScrollConfig::default(),
            reveal: RevealConfig::default(),
            counter: CounterConfig::default(),
            toast: ToastConfig::default(),
            typing: TypingConfig::default(),
            contact: ContactConfig::default(),
            theme: ThemeConfig::default(),
            menu: MenuConfig::default(),
            preloader: PreloaderConfig::default(),
            filter: FilterConfig::default(),
            parallax: ParallaxConfig::default(),
            errors: ErrorConfig::default(),
            log_level: defaults::log_level(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Added to the scroll offset before section range tests.
    #[serde(default = "defaults::section_lookahead")]
    pub section_lookahead: f64,
    #[serde(default = "defaults::navbar_threshold")]
    pub navbar_threshold: f64,
    #[serde(default = "defaults::scroll_top_threshold")]
    pub scroll_top_threshold: f64,
    #[serde(default = "defaults::scroll_throttle_ms")]
    pub throttle_ms: f64,
    /// Fixed navbar height compensated for when scrolling to a section.
    #[serde(default = "defaults::navbar_offset")]
    pub navbar_offset: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            section_lookahead: defaults::section_lookahead(),
            navbar_threshold: defaults::navbar_threshold(),
            scroll_top_threshold: defaults::scroll_top_threshold(),
            throttle_ms: defaults::scroll_throttle_ms(),
            navbar_offset: defaults::navbar_offset(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevealConfig {
    #[serde(default = "defaults::fade_threshold")]
    pub fade_threshold: f64,
    /// Observer root margin for fade targets only; skill bars and counters
    /// observe the bare viewport.
    #[serde(default = "defaults::fade_root_margin")]
    pub fade_root_margin: String,
    #[serde(default = "defaults::skill_threshold")]
    pub skill_threshold: f64,
    #[serde(default = "defaults::counter_threshold")]
    pub counter_threshold: f64,
    #[serde(default = "defaults::stagger_unit_secs")]
    pub stagger_unit_secs: f64,
    #[serde(default = "defaults::skill_delay_secs")]
    pub skill_delay_secs: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            fade_threshold: defaults::fade_threshold(),
            fade_root_margin: defaults::fade_root_margin(),
            skill_threshold: defaults::skill_threshold(),
            counter_threshold: defaults::counter_threshold(),
            stagger_unit_secs: defaults::stagger_unit_secs(),
            skill_delay_secs: defaults::skill_delay_secs(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CounterConfig {
    #[serde(default = "defaults::counter_duration_ms")]
    pub duration_ms: f64,
    #[serde(default = "defaults::counter_step_ms")]
    pub step_ms: f64,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            duration_ms: defaults::counter_duration_ms(),
            step_ms: defaults::counter_step_ms(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToastConfig {
    #[serde(default = "defaults::toast_dismiss_ms")]
    pub dismiss_ms: f64,
    #[serde(default = "defaults::toast_enter_ms")]
    pub enter_ms: f64,
    #[serde(default = "defaults::toast_exit_ms")]
    pub exit_ms: f64,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            dismiss_ms: defaults::toast_dismiss_ms(),
            enter_ms: defaults::toast_enter_ms(),
            exit_ms: defaults::toast_exit_ms(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypingConfig {
    #[serde(default = "defaults::typing_roles")]
    pub roles: Vec<String>,
    #[serde(default = "defaults::typing_start_delay_ms")]
    pub start_delay_ms: f64,
    #[serde(default = "defaults::typing_type_ms")]
    pub type_ms: f64,
    #[serde(default = "defaults::typing_delete_ms")]
    pub delete_ms: f64,
    #[serde(default = "defaults::typing_word_pause_ms")]
    pub word_pause_ms: f64,
    #[serde(default = "defaults::typing_next_word_ms")]
    pub next_word_ms: f64,
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            roles: defaults::typing_roles(),
            start_delay_ms: defaults::typing_start_delay_ms(),
            type_ms: defaults::typing_type_ms(),
            delete_ms: defaults::typing_delete_ms(),
            word_pause_ms: defaults::typing_word_pause_ms(),
            next_word_ms: defaults::typing_next_word_ms(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactConfig {
    #[serde(default = "defaults::contact_recipient")]
    pub recipient: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            recipient: defaults::contact_recipient(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeConfig {
    #[serde(default = "defaults::theme_storage_key")]
    pub storage_key: String,
    /// Insert the floating theme toggle. The stored theme is applied either way.
    #[serde(default)]
    pub show_toggle: bool,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: defaults::theme_storage_key(),
            show_toggle: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MenuConfig {
    /// Viewport width above which the mobile menu is force-closed on resize.
    #[serde(default = "defaults::menu_breakpoint")]
    pub breakpoint: f64,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            breakpoint: defaults::menu_breakpoint(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PreloaderConfig {
    #[serde(default = "defaults::preloader_hold_ms")]
    pub hold_ms: f64,
    #[serde(default = "defaults::preloader_fade_ms")]
    pub fade_ms: f64,
}

impl Default for PreloaderConfig {
    fn default() -> Self {
        Self {
            hold_ms: defaults::preloader_hold_ms(),
            fade_ms: defaults::preloader_fade_ms(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    #[serde(default = "defaults::filter_show_ms")]
    pub show_ms: f64,
    #[serde(default = "defaults::filter_hide_ms")]
    pub hide_ms: f64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            show_ms: defaults::filter_show_ms(),
            hide_ms: defaults::filter_hide_ms(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParallaxConfig {
    #[serde(default = "defaults::parallax_rate")]
    pub rate: f64,
    #[serde(default = "defaults::parallax_speed_unit")]
    pub speed_unit: f64,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            rate: defaults::parallax_rate(),
            speed_unit: defaults::parallax_speed_unit(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ErrorConfig {
    /// Surface uncaught script errors as an error toast.
    #[serde(default)]
    pub notify_user: bool,
}

impl PageConfig {
    /// Parse and validate a JSON config document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("scroll.throttle_ms", self.scroll.throttle_ms),
            ("counter.duration_ms", self.counter.duration_ms),
            ("counter.step_ms", self.counter.step_ms),
            ("toast.dismiss_ms", self.toast.dismiss_ms),
            ("typing.type_ms", self.typing.type_ms),
            ("typing.delete_ms", self.typing.delete_ms),
        ];
        for (field, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }

        let ratios = [
            ("reveal.fade_threshold", self.reveal.fade_threshold),
            ("reveal.skill_threshold", self.reveal.skill_threshold),
            ("reveal.counter_threshold", self.reveal.counter_threshold),
        ];
        for (field, value) in ratios {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ConfigError::RatioOutOfRange { field, value });
            }
        }
        Ok(())
    }
}
