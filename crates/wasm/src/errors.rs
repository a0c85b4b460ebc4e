//! Bridge errors and the window-level error sink.

use folio_core::config::ConfigError;
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{ErrorEvent, Event, PromiseRejectionEvent, Window};

use crate::listeners::Listener;

#[derive(Debug, Error)]
pub enum FolioError {
    #[error("no global window")]
    NoWindow,
    #[error("document has no {0}")]
    MissingElement(&'static str),
    #[error("page is already mounted")]
    AlreadyMounted,
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("invalid bridge config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("DOM call failed: {0}")]
    Js(String),
}

impl From<JsValue> for FolioError {
    fn from(value: JsValue) -> Self {
        Self::Js(describe(&value))
    }
}

/// Best-effort human text for a thrown JS value.
pub fn describe(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    format!("{value:?}")
}

/// Log uncaught errors and unhandled rejections, then pass their message on.
///
/// Rejections are marked handled so the browser does not print them twice.
pub fn listen(window: &Window, report: impl Fn(String) + Clone + 'static) -> Result<Vec<Listener>, FolioError> {
    let on_error = report.clone();
    let error = Listener::new(window, "error", move |event: Event| {
        let Some(event) = event.dyn_ref::<ErrorEvent>() else {
            return;
        };
        let message = event.message();
        tracing::error!(
            %message,
            file = %event.filename(),
            line = event.lineno(),
            "uncaught error"
        );
        on_error(message);
    })?;

    let rejection = Listener::new(window, "unhandledrejection", move |event: Event| {
        event.prevent_default();
        let reason = event
            .dyn_ref::<PromiseRejectionEvent>()
            .map_or_else(|| "unknown rejection".to_string(), |e| describe(&e.reason()));
        tracing::error!(%reason, "unhandled promise rejection");
        report(reason);
    })?;

    Ok(vec![error, rejection])
}
