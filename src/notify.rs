//! Transient notifications shown in the status area.

use std::time::{Duration, Instant};

/// Notification severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
}

/// One notification with its display deadline.
#[derive(Debug, Clone)]
pub struct Notification {
    pub level: Level,
    pub message: String,
    expires_at: Instant,
}

/// Queue of live notifications, newest last.
#[derive(Debug)]
pub struct Notifications {
    items: Vec<Notification>,
    ttl: Duration,
}

impl Notifications {
    pub fn new(ttl: Duration) -> Self {
        Self {
            items: Vec::new(),
            ttl,
        }
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(Level::Success, message.into());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(Level::Error, message.into());
    }

    fn push(&mut self, level: Level, message: String) {
        self.items.push(Notification {
            level,
            message,
            expires_at: Instant::now() + self.ttl,
        });
    }

    /// Drop notifications whose deadline has passed.
    pub fn prune(&mut self, now: Instant) {
        self.items.retain(|n| n.expires_at > now);
    }

    /// Most recent live notification.
    pub fn latest(&self) -> Option<&Notification> {
        self.items.last()
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_is_newest() {
        let mut notes = Notifications::new(Duration::from_secs(5));
        notes.success("Button created successfully.");
        notes.error("Button not found");
        let latest = notes.latest().unwrap();
        assert_eq!(latest.level, Level::Error);
        assert_eq!(latest.message, "Button not found");
        assert_eq!(notes.iter().count(), 2);
    }

    #[test]
    fn test_prune_expired() {
        let mut notes = Notifications::new(Duration::from_secs(5));
        notes.success("saved");
        notes.prune(Instant::now());
        assert!(notes.latest().is_some());
        notes.prune(Instant::now() + Duration::from_secs(6));
        assert!(notes.latest().is_none());
    }
}
