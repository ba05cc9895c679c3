//! Timed notification queue.
//!
//! Actions report outcomes through [`Notifier`]; the center queues them
//! with a deadline and the host drops the expired ones on its tick. How
//! (and whether) toasts are drawn is the host's business.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::debug;

use crate::services::{Notifier, NotifyKind};

/// How long a toast stays visible by default.
pub const DEFAULT_TOAST_TTL: Duration = Duration::from_millis(2400);

/// Queue cap. The oldest toast is dropped first when exceeded.
const MAX_ACTIVE: usize = 8;

/// One visible notification.
#[derive(Clone, Debug)]
pub struct Toast {
    pub message: String,
    pub kind: NotifyKind,
    pub deadline: Instant,
}

/// Bounded queue of timed toasts.
pub struct ToastCenter {
    ttl: Duration,
    active: Mutex<VecDeque<Toast>>,
}

impl ToastCenter {
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_TOAST_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            active: Mutex::new(VecDeque::new()),
        }
    }

    pub fn push(&self, message: impl Into<String>, kind: NotifyKind) {
        self.push_at(message, kind, Instant::now());
    }

    /// Push with an explicit "now"; tests drive time by hand.
    pub fn push_at(&self, message: impl Into<String>, kind: NotifyKind, now: Instant) {
        let mut active = self.active.lock();
        if active.len() == MAX_ACTIVE {
            active.pop_front();
        }
        active.push_back(Toast {
            message: message.into(),
            kind,
            deadline: now + self.ttl,
        });
    }

    /// Drop everything expired as of `now`. Call from the host's tick.
    pub fn tick(&self, now: Instant) {
        self.active.lock().retain(|toast| toast.deadline > now);
    }

    /// Toasts still visible, oldest first.
    pub fn active(&self) -> Vec<Toast> {
        self.active.lock().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.active.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.lock().is_empty()
    }
}

impl Default for ToastCenter {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for ToastCenter {
    fn notify(&self, message: &str, kind: NotifyKind) {
        debug!(kind = kind.label(), message, "toast");
        self.push(message, kind);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toast_survives_until_its_deadline() {
        let center = ToastCenter::with_ttl(Duration::from_millis(100));
        let now = Instant::now();
        center.push_at("Device state sync started", NotifyKind::Success, now);

        center.tick(now + Duration::from_millis(50));
        assert_eq!(center.len(), 1);

        center.tick(now + Duration::from_millis(150));
        assert!(center.is_empty());
    }

    #[test]
    fn queue_drops_oldest_past_the_cap() {
        let center = ToastCenter::new();
        let now = Instant::now();
        for i in 0..10 {
            center.push_at(format!("toast {i}"), NotifyKind::Info, now);
        }
        let active = center.active();
        assert_eq!(active.len(), 8);
        assert_eq!(active[0].message, "toast 2");
        assert_eq!(active[7].message, "toast 9");
    }

    #[test]
    fn notifier_path_queues_a_toast() {
        let center = ToastCenter::new();
        center.notify("Reboot command sent", NotifyKind::Success);
        let active = center.active();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].kind, NotifyKind::Success);
    }

    #[test]
    fn active_keeps_arrival_order() {
        let center = ToastCenter::new();
        let now = Instant::now();
        center.push_at("first", NotifyKind::Info, now);
        center.push_at("second", NotifyKind::Warning, now);
        let active = center.active();
        let messages: Vec<&str> = active.iter().map(|t| t.message.as_str()).collect();
        assert_eq!(messages, vec!["first", "second"]);
    }
}
