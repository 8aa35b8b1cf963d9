// src/toast.rs

use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};

/// How long a toast stays visible, in milliseconds.
const TOAST_LIFETIME_MS: i64 = 3000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub created_at: DateTime<Utc>,
}

impl Toast {
    fn expired_at(&self, now: DateTime<Utc>) -> bool {
        now - self.created_at >= Duration::milliseconds(TOAST_LIFETIME_MS)
    }
}

/// Transient notification queue.
///
/// Pruning is caller-driven: the presentation layer asks for the `active`
/// toasts each frame instead of this helper arming timers.
#[derive(Default)]
pub struct ToastCenter {
    toasts: Mutex<Vec<Toast>>,
}

impl ToastCenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(message.into(), ToastKind::Success);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(message.into(), ToastKind::Error);
    }

    fn push(&self, message: String, kind: ToastKind) {
        self.toasts
            .lock()
            .expect("toast lock poisoned")
            .push(Toast {
                message,
                kind,
                created_at: Utc::now(),
            });
    }

    /// Toasts still within their lifetime at `now`. Expired toasts are
    /// dropped on the way out.
    pub fn active(&self, now: DateTime<Utc>) -> Vec<Toast> {
        let mut toasts = self.toasts.lock().expect("toast lock poisoned");
        toasts.retain(|toast| !toast.expired_at(now));
        toasts.clone()
    }
}
