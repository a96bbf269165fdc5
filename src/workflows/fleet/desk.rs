use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use super::checkin::{
    CheckInDraft, CheckInError, CheckInPhase, CheckInReceipt, CheckInWorkflow, DraftField,
    FieldEdit,
};
use super::domain::{FleetStatistics, ScanCode, StatusFilter, Vehicle};
use super::import::FleetImportError;
use super::notifications::{NotificationFeed, NotificationId, NotificationView, FEED_CAPACITY};
use super::registry::FleetRegistry;
use super::seed;

/// Dashboard payload: live statistics plus the notification panel.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub statistics: FleetStatistics,
    pub unread_notifications: usize,
    pub notifications: Vec<NotificationView>,
}

/// Current check-in form as the presentation layer renders it.
#[derive(Debug, Clone, Serialize)]
pub struct CheckInView {
    pub phase: CheckInPhase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draft: Option<CheckInDraft>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle: Option<Vehicle>,
}

/// Owns the registry, the feed and the single check-in for one process.
#[derive(Debug, Clone, Default)]
pub struct FleetDesk {
    registry: FleetRegistry,
    feed: NotificationFeed,
    check_in: CheckInWorkflow,
}

impl FleetDesk {
    pub fn new(registry: FleetRegistry, feed: NotificationFeed) -> Self {
        Self {
            registry,
            feed,
            check_in: CheckInWorkflow::new(),
        }
    }

    /// Desk loaded with the demo fleet and feed.
    pub fn seeded(now: DateTime<Utc>) -> Result<Self, FleetImportError> {
        Ok(Self::new(seed::seed_registry()?, seed::seed_feed(now)))
    }

    pub fn registry(&self) -> &FleetRegistry {
        &self.registry
    }

    pub fn feed(&self) -> &NotificationFeed {
        &self.feed
    }

    pub fn check_in(&self) -> &CheckInWorkflow {
        &self.check_in
    }

    pub fn vehicles(&self, filter: StatusFilter) -> Vec<&Vehicle> {
        let vehicles = self.registry.filter_by_status(filter);
        debug!(filter = filter.label(), matched = vehicles.len(), "vehicle listing");
        vehicles
    }

    pub fn statistics(&self) -> FleetStatistics {
        self.registry.statistics()
    }

    pub fn dashboard(&self, now: DateTime<Utc>) -> DashboardSnapshot {
        DashboardSnapshot {
            statistics: self.registry.statistics(),
            unread_notifications: self.feed.unread_count(),
            notifications: self.notifications(FEED_CAPACITY, now),
        }
    }

    pub fn notifications(&self, limit: usize, now: DateTime<Utc>) -> Vec<NotificationView> {
        self.feed
            .recent(limit)
            .into_iter()
            .map(|notification| notification.view(now))
            .collect()
    }

    pub fn acknowledge(&mut self, id: NotificationId) -> bool {
        let flipped = self.feed.mark_read(id);
        debug!(notification = %id, flipped, "notification acknowledged");
        flipped
    }

    pub fn acknowledge_all(&mut self) -> usize {
        self.feed.mark_all_read()
    }

    pub fn scan(&mut self, code: &ScanCode) -> Result<Vehicle, CheckInError> {
        match self.check_in.resolve(&self.registry, code) {
            Ok(vehicle) => {
                info!(scan_code = %code, vehicle = %vehicle.id, "check-in started");
                Ok(vehicle.clone())
            }
            Err(err) => {
                info!(scan_code = %code, error = %err, "scan did not start a check-in");
                Err(err)
            }
        }
    }

    pub fn edit_draft(
        &mut self,
        field: DraftField,
        raw: &str,
    ) -> Result<FieldEdit, CheckInError> {
        self.check_in.edit_field(field, raw)
    }

    pub fn submit_check_in(&mut self) -> Result<CheckInReceipt, CheckInError> {
        self.check_in.submit(&mut self.registry, &mut self.feed)
    }

    pub fn cancel_check_in(&mut self) -> Result<(), CheckInError> {
        self.check_in.cancel()?;
        info!("check-in cancelled");
        Ok(())
    }

    pub fn check_in_view(&self) -> CheckInView {
        let draft = self.check_in.draft().cloned();
        let vehicle = draft
            .as_ref()
            .and_then(|draft| self.registry.get(&draft.vehicle_id))
            .cloned();

        CheckInView {
            phase: self.check_in.phase(),
            draft,
            vehicle,
        }
    }
}
