//! Vehicle lifecycle and check-in workflow for the rental fleet desk.
//!
//! The registry owns vehicle records, the feed owns notification entries, and the check-in
//! workflow owns the single in-progress draft. [`FleetDesk`] ties the three together and is
//! the only thing the HTTP router and CLI talk to.

pub mod checkin;
pub mod desk;
pub mod domain;
pub mod import;
pub mod notifications;
pub mod registry;
pub mod router;
mod seed;

#[cfg(test)]
mod tests;

pub use checkin::{
    CheckInDraft, CheckInError, CheckInPhase, CheckInReceipt, CheckInWorkflow, DraftField,
    DraftFieldError, FieldEdit, VehicleCondition,
};
pub use desk::{CheckInView, DashboardSnapshot, FleetDesk};
pub use domain::{
    FleetStatistics, FuelLevel, ScanCode, StatusFilter, StatusFilterError, Vehicle, VehicleId,
    VehicleStatus, VehicleStatusKind,
};
pub use import::{FleetImportError, FleetImporter, RowError};
pub use notifications::{
    Notification, NotificationCategory, NotificationFeed, NotificationId, NotificationView,
    FEED_CAPACITY,
};
pub use registry::{CheckInReadings, FleetRegistry, RegistryError};
pub use router::{fleet_router, SharedDesk};
pub use seed::{seed_feed, seed_registry};
