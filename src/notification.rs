//! Decode diagnostics.
//!
//! Non-fatal issues met while decoding objects or building geometry
//! (unknown EED codes, unsupported entity kinds, broken vertex chains) are
//! collected as [`Notification`] items. They are advisory: nothing in the
//! decoder changes its behaviour based on what has been recorded.

use std::fmt;

use crate::types::Handle;

/// Severity level of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationType {
    /// An object or entity kind has no decoder.
    NotImplemented,
    /// Content exists but cannot be represented (e.g. unsupported geometry).
    NotSupported,
    /// Non-fatal warning (malformed EED record, truncated chain).
    Warning,
    /// Error that was recovered from.
    Error,
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotImplemented => write!(f, "NotImplemented"),
            Self::NotSupported => write!(f, "NotSupported"),
            Self::Warning => write!(f, "Warning"),
            Self::Error => write!(f, "Error"),
        }
    }
}

/// A single diagnostic produced while decoding.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    /// The severity / category.
    pub notification_type: NotificationType,
    /// Handle of the object being decoded, when known.
    pub handle: Option<Handle>,
    /// A human-readable description of the issue.
    pub message: String,
}

impl Notification {
    /// Create a new notification.
    pub fn new(notification_type: NotificationType, message: impl Into<String>) -> Self {
        Self {
            notification_type,
            handle: None,
            message: message.into(),
        }
    }

    /// Attach the handle of the object the notification is about.
    pub fn with_handle(mut self, handle: Handle) -> Self {
        self.handle = Some(handle);
        self
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.handle {
            Some(h) => write!(f, "[{}] {}: {}", self.notification_type, h, self.message),
            None => write!(f, "[{}] {}", self.notification_type, self.message),
        }
    }
}

/// Collects notifications during a decode session.
#[derive(Debug, Clone, Default)]
pub struct NotificationCollection {
    items: Vec<Notification>,
}

impl NotificationCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Record a notification.
    pub fn notify(&mut self, notification_type: NotificationType, message: impl Into<String>) {
        self.items.push(Notification::new(notification_type, message));
    }

    /// Record a notification about a specific object.
    pub fn notify_for(
        &mut self,
        handle: Handle,
        notification_type: NotificationType,
        message: impl Into<String>,
    ) {
        self.items
            .push(Notification::new(notification_type, message).with_handle(handle));
    }

    /// Move every notification of `other` into this collection.
    pub fn append(&mut self, other: &mut NotificationCollection) {
        self.items.append(&mut other.items);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Notification> {
        self.items.iter()
    }

    /// Get all notifications of a specific type.
    pub fn of_type(&self, nt: NotificationType) -> Vec<&Notification> {
        self.items.iter().filter(|n| n.notification_type == nt).collect()
    }

    /// Check whether any notification of the given type exists.
    pub fn has_type(&self, nt: NotificationType) -> bool {
        self.items.iter().any(|n| n.notification_type == nt)
    }

    /// Drop everything recorded so far.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<'a> IntoIterator for &'a NotificationCollection {
    type Item = &'a Notification;
    type IntoIter = std::slice::Iter<'a, Notification>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_basics() {
        let mut c = NotificationCollection::new();
        assert!(c.is_empty());

        c.notify(NotificationType::Warning, "w1");
        c.notify_for(Handle::new(0x1F), NotificationType::Error, "e1");
        c.notify(NotificationType::Warning, "w2");

        assert_eq!(c.len(), 3);
        assert_eq!(c.of_type(NotificationType::Warning).len(), 2);
        assert!(c.has_type(NotificationType::Error));
        assert!(!c.has_type(NotificationType::NotImplemented));
    }

    #[test]
    fn test_append_moves_items() {
        let mut a = NotificationCollection::new();
        let mut b = NotificationCollection::new();
        b.notify(NotificationType::NotSupported, "spline frame");
        a.append(&mut b);
        assert_eq!(a.len(), 1);
        assert!(b.is_empty());
    }

    #[test]
    fn test_display() {
        let n = Notification::new(NotificationType::NotImplemented, "GROUP");
        assert_eq!(format!("{}", n), "[NotImplemented] GROUP");

        let n = n.with_handle(Handle::new(0xAB));
        assert_eq!(format!("{}", n), "[NotImplemented] 0xAB: GROUP");
    }
}
