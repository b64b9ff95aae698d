use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

use crate::domain::models::notification::{Notification, NotificationLevel};
use crate::infrastructure::logging::logger;

/// Queue of transient toasts waiting to be shown
pub struct NotificationService {
    queue: Mutex<VecDeque<Notification>>,
    capacity: usize,
}

impl NotificationService {
    pub fn new(capacity: usize) -> Self {
        Self {
            queue: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity: capacity.max(1),
        }
    }

    pub fn success(&self, message: impl Into<String>) -> Notification {
        self.push(NotificationLevel::Success, message.into())
    }

    pub fn error(&self, message: impl Into<String>) -> Notification {
        self.push(NotificationLevel::Error, message.into())
    }

    /// Take every pending toast, oldest first
    pub fn drain(&self) -> Vec<Notification> {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .drain(..)
            .collect()
    }

    /// Pending toasts without consuming them
    pub fn recent(&self) -> Vec<Notification> {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }

    fn push(&self, level: NotificationLevel, message: String) -> Notification {
        match level {
            NotificationLevel::Success => logger::info(&format!("Notify: {}", message)),
            NotificationLevel::Error => logger::warn(&format!("Notify: {}", message)),
        }

        let notification = Notification::new(level, message);
        let mut queue = self.queue.lock().unwrap_or_else(PoisonError::into_inner);
        while queue.len() >= self.capacity {
            queue.pop_front();
        }
        queue.push_back(notification.clone());
        notification
    }
}
