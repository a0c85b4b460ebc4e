//! Deferred work as data.
//!
//! Components never sleep. When something must happen later they return a
//! [`TimerRequest`]; the host arms a timer and feeds the request back as
//! [`PageEvent::Timer`](crate::page::PageEvent::Timer) when it fires.

use folio_protocol::{ElementId, ToastId, ViewCommand};

/// What to do when a timer fires.
#[derive(Debug, Clone, PartialEq)]
pub enum TimerTask {
    TypingStep,
    CounterStep(ElementId),
    ToastEnter(ToastId),
    ToastExpire(ToastId),
    ToastRemove(ToastId),
    FilterReveal { selection: u64, item: usize },
    FilterHide { selection: u64, item: usize },
    PreloaderFade,
    PreloaderRemove,
}

/// A request to run `task` after `delay_ms`.
///
/// `generation` is stamped by the [`Page`](crate::page::Page) that issued it;
/// requests from an older generation are ignored when they come back.
#[derive(Debug, Clone, PartialEq)]
pub struct TimerRequest {
    pub delay_ms: f64,
    pub task: TimerTask,
    pub generation: u64,
}

impl TimerRequest {
    pub fn new(delay_ms: f64, task: TimerTask) -> Self {
        Self {
            delay_ms,
            task,
            generation: 0,
        }
    }
}

/// What handling one event produced: commands to apply now, timers to arm.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Effects {
    pub commands: Vec<ViewCommand>,
    pub timers: Vec<TimerRequest>,
}

impl Effects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_commands(commands: Vec<ViewCommand>) -> Self {
        Self {
            commands,
            timers: Vec::new(),
        }
    }

    pub fn push(&mut self, command: ViewCommand) {
        self.commands.push(command);
    }

    pub fn after(&mut self, delay_ms: f64, task: TimerTask) {
        self.timers.push(TimerRequest::new(delay_ms, task));
    }

    pub fn merge(&mut self, other: Effects) {
        self.commands.extend(other.commands);
        self.timers.extend(other.timers);
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty() && self.timers.is_empty()
    }
}

/// Host-side queue of armed timers, keyed by absolute due time.
///
/// The browser bridge uses `setTimeout` directly; this queue lets tests and
/// headless drivers advance a virtual clock deterministically.
#[derive(Debug, Default)]
pub struct TimerQueue {
    pending: Vec<(f64, u64, TimerRequest)>,
    seq: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arm(&mut self, now_ms: f64, request: TimerRequest) {
        let due = now_ms + request.delay_ms.max(0.0);
        self.pending.push((due, self.seq, request));
        self.seq += 1;
    }

    pub fn arm_all(&mut self, now_ms: f64, requests: impl IntoIterator<Item = TimerRequest>) {
        for request in requests {
            self.arm(now_ms, request);
        }
    }

    /// Pop the earliest timer due at or before `now_ms`.
    ///
    /// Ties are broken by arming order, like the browser's timer queue.
    pub fn pop_due(&mut self, now_ms: f64) -> Option<(f64, TimerRequest)> {
        let idx = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, (due, _, _))| *due <= now_ms)
            .min_by(|(_, a), (_, b)| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)))
            .map(|(i, _)| i)?;
        let (due, _, request) = self.pending.swap_remove(idx);
        Some((due, request))
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_in_due_then_arming_order() {
        let mut q = TimerQueue::new();
        q.arm(0.0, TimerRequest::new(50.0, TimerTask::PreloaderRemove));
        q.arm(0.0, TimerRequest::new(10.0, TimerTask::TypingStep));
        q.arm(0.0, TimerRequest::new(10.0, TimerTask::PreloaderFade));

        assert!(q.pop_due(5.0).is_none());
        let (_, first) = q.pop_due(100.0).unwrap();
        assert_eq!(first.task, TimerTask::TypingStep);
        let (_, second) = q.pop_due(100.0).unwrap();
        assert_eq!(second.task, TimerTask::PreloaderFade);
        let (due, third) = q.pop_due(100.0).unwrap();
        assert_eq!((due, third.task), (50.0, TimerTask::PreloaderRemove));
        assert!(q.pop_due(f64::INFINITY).is_none());
    }
}
