//! Browser bridge for the folio page.
//!
//! [`mount`] scans the document, builds a [`Page`] from what it finds, and
//! subscribes to window and document events. Every event is forwarded to the
//! page; the returned commands are applied to the DOM and the returned timer
//! requests are armed with `setTimeout`. [`unmount`] tears all of it down.

mod dom;
pub mod errors;
mod geometry;
mod listeners;
mod logging;
mod observe;
pub mod selectors;
mod storage;
mod timers;

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use folio_core::page::{ClickTarget, Effects, Page, PageEvent, TimerRequest};
use folio_core::reveal::IntersectionEntry;
use folio_protocol::{Target, ViewCommand};
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event, KeyboardEvent, Window};

use crate::dom::Dom;
use crate::errors::FolioError;
use crate::geometry::DomGeometry;
use crate::listeners::Listener;
use crate::observe::Observers;
use crate::selectors::{BridgeConfig, CONFIG_SCRIPT_ID};
use crate::storage::LocalStorage;
use crate::timers::Timers;

type Shared = Rc<RefCell<Bridge>>;

thread_local! {
    static MOUNTED: RefCell<Option<Shared>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

/// Mount using the inline `#folio-config` JSON block, if the page has one.
#[wasm_bindgen]
pub fn mount() -> Result<(), JsError> {
    let json = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(CONFIG_SCRIPT_ID))
        .and_then(|el| el.text_content());
    let config = match json {
        Some(json) => BridgeConfig::from_json(&json).map_err(|e| JsError::new(&e.to_string()))?,
        None => BridgeConfig::default(),
    };
    install(config).map_err(|e| JsError::new(&e.to_string()))
}

/// Mount with an explicit JSON config.
#[wasm_bindgen]
pub fn mount_with_config(json: &str) -> Result<(), JsError> {
    let config = BridgeConfig::from_json(json).map_err(|e| JsError::new(&e.to_string()))?;
    install(config).map_err(|e| JsError::new(&e.to_string()))
}

/// Remove listeners and observers and cancel pending timers.
#[wasm_bindgen]
pub fn unmount() {
    if let Some(bridge) = MOUNTED.with(|m| m.borrow_mut().take()) {
        bridge.borrow_mut().teardown();
    }
}

fn install(config: BridgeConfig) -> Result<(), FolioError> {
    if MOUNTED.with(|m| m.borrow().is_some()) {
        return Err(FolioError::AlreadyMounted);
    }
    logging::init(&config.page.log_level);
    let bridge = Bridge::mount(config)?;
    MOUNTED.with(|m| *m.borrow_mut() = Some(bridge));
    Ok(())
}

struct Bridge {
    window: Window,
    page: Page,
    dom: Dom,
    geometry: DomGeometry,
    timers: Timers,
    observers: Option<Observers>,
    listeners: Vec<Listener>,
}

impl Bridge {
    fn mount(config: BridgeConfig) -> Result<Shared, FolioError> {
        let window = web_sys::window().ok_or(FolioError::NoWindow)?;
        let (dom, layout) = Dom::scan(window.clone(), config.selectors)?;
        let store = LocalStorage::open(&window);
        let page = Page::new(config.page, layout, Box::new(store));
        let geometry = DomGeometry::new(window.clone(), dom.sections().to_vec());

        let shared = Rc::new(RefCell::new(Self {
            timers: Timers::new(window.clone()),
            window,
            page,
            dom,
            geometry,
            observers: None,
            listeners: Vec::new(),
        }));
        let weak = Rc::downgrade(&shared);

        {
            let mut guard = shared.borrow_mut();
            let bridge = &mut *guard;
            let mounted = bridge.page.mount(&bridge.geometry);
            bridge.run(mounted, &weak);
            bridge.observers = Some(bridge.observe(&weak)?);
            bridge.listeners = bridge.listen(&weak)?;
            let loaded = bridge.dom.document().ready_state() == "complete";
            if loaded {
                bridge.handle(PageEvent::Load, &weak);
            }
        }
        Ok(shared)
    }

    fn teardown(&mut self) {
        self.page.teardown();
        self.timers.clear();
        self.observers = None;
        self.listeners.clear();
    }

    fn handle(&mut self, event: PageEvent, weak: &Weak<RefCell<Self>>) {
        let now = js_sys::Date::now();
        let effects = self.page.handle(&event, &self.geometry, now);
        self.run(effects, weak);
    }

    /// Apply commands in order, then arm timers.
    fn run(&mut self, effects: Effects, weak: &Weak<RefCell<Self>>) {
        for command in &effects.commands {
            if let ViewCommand::Unobserve {
                target: Target::Element(id),
            } = command
            {
                if let (Some(observers), Some(el)) = (&self.observers, self.dom.reveal_element(*id)) {
                    observers.unobserve(el);
                }
                continue;
            }
            if let Err(err) = self.dom.apply(command) {
                tracing::warn!(?command, "applying command failed: {err}");
            }
        }
        for request in effects.timers {
            let weak = weak.clone();
            let armed = self
                .timers
                .arm(request, move |key, request| fire_timer(&weak, key, request));
            if let Err(err) = armed {
                tracing::warn!("arming timer failed: {err}");
            }
        }
    }

    fn observe(&self, weak: &Weak<RefCell<Self>>) -> Result<Observers, FolioError> {
        let targets = self
            .page
            .reveal()
            .observations()
            .into_iter()
            .filter_map(|o| Some((self.dom.reveal_element(o.element)?.clone(), o.threshold, o.root_margin)))
            .collect();
        let weak = weak.clone();
        Observers::observe(targets, move |el: Element, ratio| {
            with_bridge(&weak, |bridge, weak| {
                let Some(element) = bridge.dom.reveal_id(&el) else {
                    return;
                };
                let entry = IntersectionEntry { element, ratio };
                bridge.handle(PageEvent::Intersection(entry), weak);
            });
        })
    }

    fn listen(&self, weak: &Weak<RefCell<Self>>) -> Result<Vec<Listener>, FolioError> {
        let document = self.dom.document();
        let mut listeners = vec![
            forward(&self.window, "scroll", weak, |_| Some(PageEvent::Scroll))?,
            forward(&self.window, "resize", weak, |_| Some(PageEvent::Resize))?,
            forward(&self.window, "load", weak, |_| Some(PageEvent::Load))?,
            forward(document, "keydown", weak, |event| {
                let key = event.dyn_ref::<KeyboardEvent>()?.key();
                Some(PageEvent::KeyDown {
                    key,
                    in_editable: targets_editable(event),
                })
            })?,
            forward(document, "mousedown", weak, |_| Some(PageEvent::MouseDown))?,
        ];

        let clicks = weak.clone();
        listeners.push(Listener::new(document, "click", move |event: Event| {
            with_bridge(&clicks, |bridge, weak| {
                let Some(el) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
                    return;
                };
                match bridge.dom.classify_click(&el) {
                    Ok(Some(target)) => {
                        if matches!(target, ClickTarget::NavLink(_)) {
                            event.prevent_default();
                        }
                        bridge.handle(PageEvent::Click(target), weak);
                    }
                    Ok(None) => {}
                    Err(err) => tracing::debug!("classifying click failed: {err}"),
                }
            });
        })?);

        if let Some(form) = self.dom.contact_form() {
            let submits = weak.clone();
            listeners.push(Listener::new(form, "submit", move |event: Event| {
                event.prevent_default();
                with_bridge(&submits, |bridge, weak| match bridge.dom.read_contact_form() {
                    Ok(form) => bridge.handle(PageEvent::Submit(form), weak),
                    Err(err) => tracing::warn!("reading contact form failed: {err}"),
                });
            })?);
        }

        let errors = weak.clone();
        listeners.extend(errors::listen(&self.window, move |message| {
            with_bridge(&errors, |bridge, weak| bridge.handle(PageEvent::ScriptError(message), weak));
        })?);

        Ok(listeners)
    }
}

/// Listener that turns a DOM event into a page event.
fn forward(
    target: &web_sys::EventTarget,
    kind: &'static str,
    weak: &Weak<RefCell<Bridge>>,
    translate: impl Fn(&Event) -> Option<PageEvent> + 'static,
) -> Result<Listener, FolioError> {
    let weak = weak.clone();
    Listener::new(target, kind, move |event: Event| {
        let Some(page_event) = translate(&event) else {
            return;
        };
        with_bridge(&weak, |bridge, weak| bridge.handle(page_event, weak));
    })
}

const EDITABLE: &str = "input, textarea, select, [contenteditable]";

fn targets_editable(event: &Event) -> bool {
    event
        .target()
        .and_then(|t| t.dyn_into::<Element>().ok())
        .and_then(|el| el.closest(EDITABLE).ok().flatten())
        .is_some()
}

fn fire_timer(weak: &Weak<RefCell<Bridge>>, key: u64, request: TimerRequest) {
    with_bridge(weak, |bridge, weak| {
        bridge.timers.retire(key);
        bridge.handle(PageEvent::Timer(request), weak);
    });
}

/// Run `f` on the live bridge. Events arriving after unmount, or while the
/// bridge is already busy, are dropped.
fn with_bridge(weak: &Weak<RefCell<Bridge>>, f: impl FnOnce(&mut Bridge, &Weak<RefCell<Bridge>>)) {
    let Some(shared) = weak.upgrade() else {
        return;
    };
    let Ok(mut bridge) = shared.try_borrow_mut() else {
        tracing::debug!("re-entrant event dropped");
        return;
    };
    f(&mut *bridge, weak);
}
