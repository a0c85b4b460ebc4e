//! State and logic for the folio portfolio page.
//!
//! Every component consumes plain inputs (scroll offset, section geometry,
//! intersection ratios, timestamps in milliseconds) and answers with
//! [`ViewCommand`](folio_protocol::ViewCommand)s for the browser bridge to
//! apply. Deferred work is returned as [`schedule::TimerRequest`]s instead of
//! being slept on. [`page::Page`] owns all component state and routes
//! [`page::PageEvent`]s through its [`dispatch::DispatchTable`].

pub mod config;
pub mod contact;
pub mod counter;
pub mod dispatch;
pub mod filter;
pub mod geometry;
pub mod nav;
pub mod page;
pub mod parallax;
pub mod preloader;
pub mod reveal;
pub mod schedule;
pub mod slideshow;
pub mod theme;
pub mod threshold;
pub mod throttle;
pub mod toast;
pub mod typing;

pub use config::PageConfig;
pub use page::{Effects, Page, PageEvent, PageLayout};
