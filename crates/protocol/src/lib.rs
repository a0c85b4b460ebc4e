pub mod commands;
pub mod theme;
pub mod types;

pub use commands::{Target, ViewCommand};
pub use theme::{Severity, Theme};
pub use types::{ElementBox, ElementId, ToastId};
