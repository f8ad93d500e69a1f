use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};

use log::debug;
use tokio::time::Instant;

use crate::model::{StatusKind, StatusMessage};

/// What the status element currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusDisplay {
    pub message: Option<StatusMessage>,
    pub visible: bool,
}

impl StatusDisplay {
    /// Class list the element would carry, e.g. `status-message error show`.
    pub fn class_name(&self) -> String {
        let mut class = String::from("status-message");
        if let Some(message) = &self.message {
            class.push(' ');
            class.push_str(message.kind.class());
        }
        if self.visible {
            class.push_str(" show");
        }
        class
    }
}

/// Shared handle to the transient status element.
///
/// Every `show` replaces the message at once and spawns its own hide timer.
/// Timers are never cancelled, so an earlier timer may hide a later message.
#[derive(Clone)]
pub struct StatusIndicator {
    display: Arc<Mutex<StatusDisplay>>,
    dismiss_after: Duration,
}

impl StatusIndicator {
    pub fn new(dismiss_after: Duration) -> Self {
        Self {
            display: Arc::new(Mutex::new(StatusDisplay::default())),
            dismiss_after,
        }
    }

    /// Must be called from within a tokio runtime.
    pub fn show(&self, message: StatusMessage) {
        debug!("status [{}]: {}", message.kind.class(), message.text);
        {
            let mut display = lock(&self.display);
            display.message = Some(message);
            display.visible = true;
        }

        // Deadline is fixed at the call, not at the task's first poll.
        let deadline = Instant::now() + self.dismiss_after;
        let display = Arc::clone(&self.display);
        tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            lock(&display).visible = false;
        });
    }

    pub fn success(&self, text: impl Into<String>) {
        self.show(StatusMessage::success(text));
    }

    pub fn error(&self, text: impl Into<String>) {
        self.show(StatusMessage::error(text));
    }

    pub fn snapshot(&self) -> StatusDisplay {
        lock(&self.display).clone()
    }

    pub fn is_visible(&self) -> bool {
        lock(&self.display).visible
    }

    pub fn last_kind(&self) -> Option<StatusKind> {
        lock(&self.display).message.as_ref().map(|m| m.kind)
    }
}

fn lock(display: &Mutex<StatusDisplay>) -> MutexGuard<'_, StatusDisplay> {
    // The guarded value is plain data, a poisoned lock still holds a usable display.
    display.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
