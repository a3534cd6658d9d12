use std::collections::HashMap;

/// Identifier the desktop surface assigns to a visible notification.
pub type NotificationId = u32;

/// Maps each visible notification to the relative result URL its click
/// should open.
///
/// One shared map replaces per-notification click listeners: an entry is
/// created when the notification appears and removed the moment it is
/// clicked or dismissed, so the map never outgrows the set of notifications
/// currently on screen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NotificationRegistry {
    targets: HashMap<NotificationId, String>,
}

impl NotificationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: NotificationId, target_url: impl Into<String>) {
        self.targets.insert(id, target_url.into());
    }

    /// Removes and returns the target for `id`, if the notification is still
    /// tracked. Used on click: the entry must not fire twice.
    pub fn take(&mut self, id: NotificationId) -> Option<String> {
        self.targets.remove(&id)
    }

    /// Drops the entry for a notification dismissed without a click.
    pub fn remove(&mut self, id: NotificationId) -> bool {
        self.targets.remove(&id).is_some()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}
