use chrono::{DateTime, Duration, Utc};

use super::import::{FleetImportError, FleetImporter};
use super::notifications::{NotificationCategory, NotificationFeed};
use super::registry::FleetRegistry;

const SEED_FLEET_CSV: &str = include_str!("seed_fleet.csv");

/// Demo fleet used when no CSV export is configured.
pub fn seed_registry() -> Result<FleetRegistry, FleetImportError> {
    FleetImporter::from_reader(SEED_FLEET_CSV.as_bytes())
}

/// Demo feed entries, timestamped relative to `now`.
pub fn seed_feed(now: DateTime<Utc>) -> NotificationFeed {
    let mut feed = NotificationFeed::new();
    feed.push_at(
        NotificationCategory::Booking,
        "New catalog booking request received",
        now - Duration::hours(2),
    );
    feed.push_at(
        NotificationCategory::Maintenance,
        "DEF-456 maintenance completed",
        now - Duration::hours(1),
    );
    feed.push_at(
        NotificationCategory::Return,
        "Vehicle ABC-123 due for return in 2 hours",
        now - Duration::minutes(10),
    );
    feed
}
