use std::collections::VecDeque;
use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Number of entries the feed keeps before evicting the oldest.
pub const FEED_CAPACITY: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(pub u64);

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationCategory {
    Return,
    Maintenance,
    Booking,
    #[serde(rename = "checkin")]
    CheckIn,
    #[serde(untagged)]
    Other(String),
}

impl NotificationCategory {
    pub fn label(&self) -> &str {
        match self {
            Self::Return => "return",
            Self::Maintenance => "maintenance",
            Self::Booking => "booking",
            Self::CheckIn => "checkin",
            Self::Other(label) => label,
        }
    }
}

impl fmt::Display for NotificationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One feed entry. Only the `read` flag changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub id: NotificationId,
    pub category: NotificationCategory,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub read: bool,
}

impl Notification {
    pub fn display_time(&self, now: DateTime<Utc>) -> String {
        relative_time(now - self.created_at)
    }

    pub fn view(&self, now: DateTime<Utc>) -> NotificationView {
        NotificationView {
            id: self.id,
            category: self.category.clone(),
            message: self.message.clone(),
            time: self.display_time(now),
            read: self.read,
        }
    }
}

/// Rendered form of a notification with its time relative to the moment of rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationView {
    pub id: NotificationId,
    pub category: NotificationCategory,
    pub message: String,
    pub time: String,
    pub read: bool,
}

fn relative_time(elapsed: Duration) -> String {
    let minutes = elapsed.num_minutes();
    if minutes < 1 {
        return "Just now".to_string();
    }
    if minutes < 60 {
        return format!("{minutes} min ago");
    }

    let hours = elapsed.num_hours();
    match hours {
        1 => "1 hour ago".to_string(),
        2..=23 => format!("{hours} hours ago"),
        _ => match elapsed.num_days() {
            1 => "1 day ago".to_string(),
            days => format!("{days} days ago"),
        },
    }
}

/// Bounded, most-recent-first event feed.
#[derive(Debug, Clone)]
pub struct NotificationFeed {
    entries: VecDeque<Notification>,
    next_id: u64,
}

impl Default for NotificationFeed {
    fn default() -> Self {
        Self {
            entries: VecDeque::with_capacity(FEED_CAPACITY + 1),
            next_id: 1,
        }
    }
}

impl NotificationFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(
        &mut self,
        category: NotificationCategory,
        message: impl Into<String>,
    ) -> Notification {
        self.push_at(category, message, Utc::now())
    }

    pub fn push_at(
        &mut self,
        category: NotificationCategory,
        message: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Notification {
        let notification = Notification {
            id: NotificationId(self.next_id),
            category,
            message: message.into(),
            created_at,
            read: false,
        };
        self.next_id += 1;

        self.entries.push_front(notification.clone());
        self.entries.truncate(FEED_CAPACITY);
        notification
    }

    /// Returns `true` only when a previously unread entry was flipped.
    pub fn mark_read(&mut self, id: NotificationId) -> bool {
        match self
            .entries
            .iter_mut()
            .find(|entry| entry.id == id && !entry.read)
        {
            Some(entry) => {
                entry.read = true;
                true
            }
            None => false,
        }
    }

    pub fn mark_all_read(&mut self) -> usize {
        let mut flipped = 0;
        for entry in self.entries.iter_mut().filter(|entry| !entry.read) {
            entry.read = true;
            flipped += 1;
        }
        flipped
    }

    pub fn unread_count(&self) -> usize {
        self.entries.iter().filter(|entry| !entry.read).count()
    }

    pub fn recent(&self, limit: usize) -> Vec<&Notification> {
        self.entries.iter().take(limit).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
