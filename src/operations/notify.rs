use crate::models::notification::Notification;
use std::collections::VecDeque;

pub trait Notifier {
    fn notify(&mut self, notification: Notification);
}

#[derive(Debug, Clone)]
pub struct ToastLog {
    entries: VecDeque<Notification>,
    capacity: usize,
}

impl ToastLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    pub fn latest(&self) -> Option<&Notification> {
        self.entries.back()
    }
}

#[cfg(test)]
impl ToastLog {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.entries.iter()
    }
}

impl Default for ToastLog {
    fn default() -> Self {
        Self::new(20)
    }
}

impl Notifier for ToastLog {
    fn notify(&mut self, notification: Notification) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(notification);
    }
}
