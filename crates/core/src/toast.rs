use folio_protocol::{Severity, Target, ToastId, ViewCommand};

use crate::config::ToastConfig;
use crate::schedule::{Effects, TimerTask};

const ENTERED: &str = "entered";

#[derive(Debug, Clone, PartialEq)]
pub struct ToastMessage {
    pub id: ToastId,
    pub text: String,
    pub severity: Severity,
    pub created_at: f64,
    closing: bool,
}

/// Singleton, auto-dismissing notification.
///
/// At most one toast exists. Every timer carries the toast's id and every
/// handler checks it against the live toast first, so timers left over from a
/// replaced or already-closed toast do nothing.
#[derive(Debug)]
pub struct ToastEmitter {
    current: Option<ToastMessage>,
    next_id: u64,
    config: ToastConfig,
}

impl ToastEmitter {
    pub fn new(config: ToastConfig) -> Self {
        Self {
            current: None,
            next_id: 0,
            config,
        }
    }

    pub fn current(&self) -> Option<&ToastMessage> {
        self.current.as_ref()
    }

    /// Replace any visible toast with a new one.
    ///
    /// Order: remove the old toast, insert the new one, schedule its entrance,
    /// schedule its dismissal.
    pub fn notify(&mut self, text: impl Into<String>, severity: Severity, now_ms: f64) -> Effects {
        let mut effects = Effects::new();
        if let Some(old) = self.current.take() {
            effects.push(ViewCommand::Remove {
                target: Target::Toast(old.id),
            });
        }

        let id = ToastId(self.next_id);
        self.next_id += 1;
        let text = text.into();
        tracing::debug!(id = id.0, severity = severity.as_str(), %text, "toast");

        effects.push(ViewCommand::InsertToast {
            id,
            text: text.clone(),
            severity,
        });
        effects.after(self.config.enter_ms, TimerTask::ToastEnter(id));
        effects.after(self.config.dismiss_ms, TimerTask::ToastExpire(id));

        self.current = Some(ToastMessage {
            id,
            text,
            severity,
            created_at: now_ms,
            closing: false,
        });
        effects
    }

    /// Entrance transition.
    pub fn enter(&mut self, id: ToastId) -> Effects {
        let mut effects = Effects::new();
        if self.live(id).is_some_and(|t| !t.closing) {
            effects.push(ViewCommand::add_class(Target::Toast(id), ENTERED));
        }
        effects
    }

    /// Close button: start the exit transition, remove after it.
    pub fn close(&mut self, id: ToastId) -> Effects {
        let mut effects = Effects::new();
        let Some(toast) = self.current.as_mut().filter(|t| t.id == id && !t.closing) else {
            return effects;
        };
        toast.closing = true;
        effects.push(ViewCommand::remove_class(Target::Toast(id), ENTERED));
        effects.after(self.config.exit_ms, TimerTask::ToastRemove(id));
        effects
    }

    /// Auto-dismiss; same path as the close button, skipped if already closing.
    pub fn expire(&mut self, id: ToastId) -> Effects {
        self.close(id)
    }

    pub fn remove(&mut self, id: ToastId) -> Effects {
        let mut effects = Effects::new();
        if self.live(id).is_some() {
            self.current = None;
            effects.push(ViewCommand::Remove {
                target: Target::Toast(id),
            });
        }
        effects
    }

    fn live(&self, id: ToastId) -> Option<&ToastMessage> {
        self.current.as_ref().filter(|t| t.id == id)
    }
}
