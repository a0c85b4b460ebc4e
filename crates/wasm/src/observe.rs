//! One `IntersectionObserver` per distinct reveal threshold and root margin.

use std::collections::BTreeMap;

use js_sys::Array;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::errors::FolioError;

type EntryCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

pub struct Observers {
    observers: Vec<IntersectionObserver>,
    _callback: EntryCallback,
}

impl Observers {
    /// Observe each element at its threshold and root margin. `on_entry`
    /// receives the target and its visible ratio (0 when not intersecting).
    pub fn observe(
        targets: Vec<(Element, f64, String)>,
        mut on_entry: impl FnMut(Element, f64) + 'static,
    ) -> Result<Self, FolioError> {
        let callback = EntryCallback::new(move |entries: Array, _observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                let ratio = if entry.is_intersecting() {
                    entry.intersection_ratio()
                } else {
                    0.0
                };
                on_entry(entry.target(), ratio);
            }
        });

        let mut groups: BTreeMap<(u64, String), Vec<Element>> = BTreeMap::new();
        for (el, threshold, margin) in targets {
            groups.entry((threshold.to_bits(), margin)).or_default().push(el);
        }

        let mut observers = Vec::with_capacity(groups.len());
        for ((bits, margin), elements) in groups {
            let threshold = f64::from_bits(bits);
            let init = IntersectionObserverInit::new();
            init.set_root_margin(&margin);
            init.set_threshold(&JsValue::from_f64(threshold));
            let observer =
                IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
            for el in &elements {
                observer.observe(el);
            }
            tracing::debug!(threshold, %margin, elements = elements.len(), "observing");
            observers.push(observer);
        }

        Ok(Self {
            observers,
            _callback: callback,
        })
    }

    pub fn unobserve(&self, el: &Element) {
        for observer in &self.observers {
            observer.unobserve(el);
        }
    }
}

impl Drop for Observers {
    fn drop(&mut self) {
        for observer in &self.observers {
            observer.disconnect();
        }
    }
}
