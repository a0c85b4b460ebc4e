use std::collections::HashMap;

use folio_core::page::TimerRequest;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::Window;

use crate::errors::FolioError;

type Callback = Closure<dyn FnMut()>;

/// Armed `setTimeout` handles and the closures behind them, keyed so a
/// firing timer can retire its own.
pub struct Timers {
    window: Window,
    next_key: u64,
    armed: HashMap<u64, (i32, Callback)>,
    /// The last closure to fire. It is still running when it retires itself,
    /// so it is freed when the next one retires or on `clear`.
    spent: Option<Callback>,
}

impl Timers {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            next_key: 0,
            armed: HashMap::new(),
            spent: None,
        }
    }

    /// Arm `request`; `fire` runs once with the key and the request.
    pub fn arm(
        &mut self,
        request: TimerRequest,
        fire: impl FnOnce(u64, TimerRequest) + 'static,
    ) -> Result<(), FolioError> {
        let key = self.next_key;
        self.next_key += 1;
        let delay = request.delay_ms.max(0.0).round() as i32;
        let callback: Callback = Closure::once(move || fire(key, request));
        let handle = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.as_ref().unchecked_ref(), delay)?;
        self.armed.insert(key, (handle, callback));
        Ok(())
    }

    /// Forget a timer that has fired.
    pub fn retire(&mut self, key: u64) {
        if let Some((_, callback)) = self.armed.remove(&key) {
            self.spent = Some(callback);
        }
    }

    /// Cancel every pending timer and free its closure.
    pub fn clear(&mut self) {
        for (_, (handle, _callback)) in self.armed.drain() {
            self.window.clear_timeout_with_handle(handle);
        }
        self.spent = None;
    }
}
