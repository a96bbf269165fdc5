use chrono::{DateTime, Utc};
use fleet_desk::error::AppError;
use fleet_desk::workflows::fleet::{
    seed_feed, FleetDesk, FleetImporter, SharedDesk, StatusFilter,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Builds a desk from a fleet CSV export, or from the bundled demo fleet when none is given.
pub(crate) fn load_desk(
    vehicles_csv: Option<&Path>,
    now: DateTime<Utc>,
) -> Result<FleetDesk, AppError> {
    match vehicles_csv {
        Some(path) => {
            let registry = FleetImporter::from_path(path)?;
            info!(path = %path.display(), vehicles = registry.len(), "fleet export loaded");
            Ok(FleetDesk::new(registry, seed_feed(now)))
        }
        None => Ok(FleetDesk::seeded(now)?),
    }
}

pub(crate) fn share(desk: FleetDesk) -> SharedDesk {
    Arc::new(Mutex::new(desk))
}

pub(crate) fn parse_status_filter(raw: &str) -> Result<StatusFilter, String> {
    raw.parse::<StatusFilter>().map_err(|err| err.to_string())
}
