use super::common::*;
use chrono::Duration;

use crate::workflows::fleet::notifications::{
    NotificationCategory, NotificationFeed, NotificationId, FEED_CAPACITY,
};

#[test]
fn push_prepends_unread_entries() {
    let mut feed = NotificationFeed::new();
    let first = feed.push_at(NotificationCategory::Booking, "first", now());
    let second = feed.push_at(NotificationCategory::Return, "second", now());

    assert!(second.id > first.id);
    assert!(!second.read);
    let recent = feed.recent(FEED_CAPACITY);
    assert_eq!(recent[0].message, "second");
    assert_eq!(recent[1].message, "first");
    assert_eq!(feed.unread_count(), 2);
}

#[test]
fn feed_keeps_five_most_recent_entries() {
    let mut feed = NotificationFeed::new();
    for index in 0..12 {
        feed.push_at(
            NotificationCategory::CheckIn,
            format!("event {index}"),
            now() + Duration::minutes(index),
        );
    }

    assert_eq!(feed.len(), FEED_CAPACITY);
    let messages: Vec<&str> = feed
        .recent(usize::MAX)
        .iter()
        .map(|entry| entry.message.as_str())
        .collect();
    assert_eq!(
        messages,
        ["event 11", "event 10", "event 9", "event 8", "event 7"]
    );
}

#[test]
fn recent_truncates_to_limit() {
    let feed = seeded_feed();
    assert_eq!(feed.recent(2).len(), 2);
    assert_eq!(feed.recent(0).len(), 0);
    assert_eq!(feed.recent(50).len(), 3);
}

#[test]
fn mark_read_is_idempotent() {
    let mut feed = seeded_feed();
    let target = feed.recent(1)[0].id;
    assert_eq!(feed.unread_count(), 3);

    assert!(feed.mark_read(target));
    assert_eq!(feed.unread_count(), 2);

    assert!(!feed.mark_read(target));
    assert_eq!(feed.unread_count(), 2);
}

#[test]
fn mark_read_ignores_unknown_ids() {
    let mut feed = seeded_feed();
    assert!(!feed.mark_read(NotificationId(9_999)));
    assert_eq!(feed.unread_count(), 3);
}

#[test]
fn mark_read_ignores_evicted_entries() {
    let mut feed = NotificationFeed::new();
    let evicted = feed.push_at(NotificationCategory::Booking, "oldest", now());
    for index in 0..FEED_CAPACITY {
        feed.push_at(NotificationCategory::Return, format!("newer {index}"), now());
    }

    assert!(!feed.mark_read(evicted.id));
    assert_eq!(feed.unread_count(), FEED_CAPACITY);
}

#[test]
fn mark_all_read_reports_flipped_entries() {
    let mut feed = seeded_feed();
    let first = feed.recent(1)[0].id;
    feed.mark_read(first);

    assert_eq!(feed.mark_all_read(), 2);
    assert_eq!(feed.unread_count(), 0);
    assert_eq!(feed.mark_all_read(), 0);
}

#[test]
fn seeded_feed_renders_relative_times() {
    let feed = seeded_feed();
    let times: Vec<String> = feed
        .recent(FEED_CAPACITY)
        .iter()
        .map(|entry| entry.display_time(now()))
        .collect();
    assert_eq!(times, ["10 min ago", "1 hour ago", "2 hours ago"]);

    let latest = feed.recent(1)[0];
    assert_eq!(latest.category, NotificationCategory::Return);
    assert_eq!(latest.view(now()).time, "10 min ago");
}
