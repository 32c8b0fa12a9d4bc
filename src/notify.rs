//! Toast Notifications
//!
//! A capped queue of transient messages. Successes clear after 3 s, errors
//! after 5 s.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;

pub const SUCCESS_MS: u32 = 3_000;
pub const ERROR_MS: u32 = 5_000;
/// Oldest toasts are dropped beyond this
pub const MAX_TOASTS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    pub fn lifetime_ms(&self) -> u32 {
        match self {
            ToastKind::Success => SUCCESS_MS,
            ToastKind::Error => ERROR_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToastQueue {
    next_id: u64,
    items: Vec<Toast>,
}

impl ToastQueue {
    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>) -> u64 {
        self.next_id += 1;
        self.items.push(Toast { id: self.next_id, kind, message: message.into() });
        if self.items.len() > MAX_TOASTS {
            let overflow = self.items.len() - MAX_TOASTS;
            self.items.drain(..overflow);
        }
        self.next_id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|t| t.id != id);
    }

    pub fn items(&self) -> &[Toast] {
        &self.items
    }
}

/// Handle to the app-wide toast queue
#[derive(Clone, Copy)]
pub struct Toasts {
    queue: RwSignal<ToastQueue>,
}

impl Toasts {
    pub fn new() -> Self {
        Self { queue: RwSignal::new(ToastQueue::default()) }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(ToastKind::Success, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(ToastKind::Error, message);
    }

    pub fn push(&self, kind: ToastKind, message: impl Into<String>) {
        let queue = self.queue;
        let Some(id) = queue.try_update(|q| q.push(kind, message)) else { return };
        Timeout::new(kind.lifetime_ms(), move || {
            queue.try_update(|q| q.dismiss(id));
        })
        .forget();
    }

    pub fn dismiss(&self, id: u64) {
        self.queue.update(|q| q.dismiss(id));
    }

    pub fn items(&self) -> Vec<Toast> {
        self.queue.with(|q| q.items().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_increase_and_dismiss_removes_one() {
        let mut queue = ToastQueue::default();
        let a = queue.push(ToastKind::Success, "saved");
        let b = queue.push(ToastKind::Error, "failed");
        assert!(b > a);
        queue.dismiss(a);
        assert_eq!(queue.items().len(), 1);
        assert_eq!(queue.items()[0].message, "failed");
        queue.dismiss(a);
        assert_eq!(queue.items().len(), 1);
    }

    #[test]
    fn test_queue_is_capped_oldest_first() {
        let mut queue = ToastQueue::default();
        for i in 0..MAX_TOASTS + 2 {
            queue.push(ToastKind::Success, format!("t{}", i));
        }
        let messages: Vec<_> = queue.items().iter().map(|t| t.message.as_str()).collect();
        assert_eq!(messages, vec!["t2", "t3", "t4", "t5"]);
    }

    #[test]
    fn test_lifetimes() {
        assert_eq!(ToastKind::Success.lifetime_ms(), 3_000);
        assert_eq!(ToastKind::Error.lifetime_ms(), 5_000);
    }
}
