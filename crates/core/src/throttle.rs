/// Leading-edge throttle.
///
/// The first call in a window runs immediately and opens a window of
/// `interval_ms`. Calls inside the window are dropped: not queued, not
/// replayed at the trailing edge. The first call at or after the window's end
/// runs and opens the next window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Throttle {
    interval_ms: f64,
    window_start: Option<f64>,
}

impl Throttle {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            window_start: None,
        }
    }

    /// Whether a call at `now_ms` would run.
    fn is_open(&self, now_ms: f64) -> bool {
        self.window_start
            .is_none_or(|start| now_ms - start >= self.interval_ms)
    }

    /// Run `f` if the throttle admits a call at `now_ms`.
    pub fn call<R>(&mut self, now_ms: f64, f: impl FnOnce() -> R) -> Option<R> {
        if !self.is_open(now_ms) {
            return None;
        }
        self.window_start = Some(now_ms);
        Some(f())
    }
}

/// A callback bundled with its own [`Throttle`].
///
/// The callback takes one argument so it can borrow state the caller owns
/// for the duration of a single call.
pub struct Throttled<F> {
    f: F,
    throttle: Throttle,
}

impl<F> Throttled<F> {
    pub fn new(f: F, interval_ms: f64) -> Self {
        Self {
            f,
            throttle: Throttle::new(interval_ms),
        }
    }

    /// Invoke the callback with `arg` if the throttle admits a call at `now_ms`.
    pub fn call<A, R>(&mut self, now_ms: f64, arg: A) -> Option<R>
    where
        F: FnMut(A) -> R,
    {
        let f = &mut self.f;
        self.throttle.call(now_ms, || f(arg))
    }
}
