use serde::{Deserialize, Serialize};

use crate::theme::Severity;
use crate::types::{ElementId, ToastId};

/// A document element addressed by a [`ViewCommand`].
///
/// The bridge resolves each variant to a concrete node through its selector
/// table. Targets that do not resolve are skipped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Target {
    /// `<html>`; carries `data-theme`.
    Root,
    Body,
    Navbar,
    NavMenu,
    MobileMenuToggle,
    /// The nav link whose href is `#<section id>`.
    NavLink(String),
    ScrollTopButton,
    ThemeToggle,
    Preloader,
    /// Hero subtitle driven by the typing effect.
    Subtitle,
    ContactForm,
    /// An element registered for reveal or counter animation.
    Element(ElementId),
    Slide(usize),
    /// Hero background shape, by document order.
    Shape(usize),
    /// Filter button by its `data-filter` value.
    FilterButton(String),
    PortfolioItem(usize),
    Toast(ToastId),
}

/// A single, stateless display instruction.
///
/// The core emits a `Vec<ViewCommand>` per handled event. The bridge applies
/// them in order; each command carries all the data it needs. State reaches
/// the stylesheet only through classes, `data-*` attributes and custom
/// properties, never inline style strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ViewCommand {
    AddClass {
        target: Target,
        class: String,
    },
    RemoveClass {
        target: Target,
        class: String,
    },
    SetText {
        target: Target,
        text: String,
    },
    SetAttribute {
        target: Target,
        name: String,
        value: String,
    },
    /// Set a CSS custom property (e.g. `--reveal-delay`) on the element.
    SetVar {
        target: Target,
        name: String,
        value: String,
    },
    /// Make the element display-visible (clears the `hidden` attribute).
    Show { target: Target },
    /// Hide the element (sets the `hidden` attribute).
    Hide { target: Target },
    /// Detach the element from the document. No-op if already gone.
    Remove { target: Target },
    /// Create and append a toast with a close button.
    InsertToast {
        id: ToastId,
        text: String,
        severity: Severity,
    },
    /// Create the overlay button that scrolls back to the top.
    InsertScrollTopButton,
    /// Create the theme toggle button showing the given icon name.
    InsertThemeToggle { icon: String },
    /// Stop delivering intersection notifications for the element.
    Unobserve { target: Target },
    ScrollTo { top: f64, smooth: bool },
    /// Navigate to a URL; used for the `mailto:` handoff.
    OpenUrl { url: String },
    /// Clear every field of a form.
    ResetForm { target: Target },
}

impl ViewCommand {
    pub fn add_class(target: Target, class: impl Into<String>) -> Self {
        Self::AddClass {
            target,
            class: class.into(),
        }
    }

    pub fn remove_class(target: Target, class: impl Into<String>) -> Self {
        Self::RemoveClass {
            target,
            class: class.into(),
        }
    }

    /// `AddClass` when `on`, `RemoveClass` otherwise.
    pub fn toggle_class(target: Target, class: impl Into<String>, on: bool) -> Self {
        if on {
            Self::add_class(target, class)
        } else {
            Self::remove_class(target, class)
        }
    }

    pub fn set_text(target: Target, text: impl Into<String>) -> Self {
        Self::SetText {
            target,
            text: text.into(),
        }
    }

    pub fn set_attribute(target: Target, name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::SetAttribute {
            target,
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn set_var(target: Target, name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::SetVar {
            target,
            name: name.into(),
            value: value.into(),
        }
    }

    /// The element this command acts on, if it addresses one.
    pub fn target(&self) -> Option<&Target> {
        match self {
            Self::AddClass { target, .. }
            | Self::RemoveClass { target, .. }
            | Self::SetText { target, .. }
            | Self::SetAttribute { target, .. }
            | Self::SetVar { target, .. }
            | Self::Show { target }
            | Self::Hide { target }
            | Self::Remove { target }
            | Self::Unobserve { target }
            | Self::ResetForm { target } => Some(target),
            Self::InsertToast { .. }
            | Self::InsertScrollTopButton
            | Self::InsertThemeToggle { .. }
            | Self::ScrollTo { .. }
            | Self::OpenUrl { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_cross_the_boundary_as_json() {
        let cmds = vec![
            ViewCommand::add_class(Target::NavLink("about".into()), "active"),
            ViewCommand::InsertToast {
                id: ToastId(3),
                text: "hi".into(),
                severity: Severity::Success,
            },
        ];
        let json = serde_json::to_string(&cmds).unwrap();
        assert!(json.contains("\"NavLink\":\"about\""));
        assert!(json.contains("\"severity\":\"success\""));
        let back: Vec<ViewCommand> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cmds);
    }

    #[test]
    fn toggle_class_picks_direction() {
        assert!(matches!(
            ViewCommand::toggle_class(Target::Navbar, "scrolled", false),
            ViewCommand::RemoveClass { .. }
        ));
    }

    #[test]
    fn global_commands_have_no_target() {
        let cmd = ViewCommand::ScrollTo {
            top: 0.0,
            smooth: true,
        };
        assert_eq!(cmd.target(), None);
    }
}
