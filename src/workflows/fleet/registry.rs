use tracing::warn;

use super::domain::{
    FleetStatistics, FuelLevel, ScanCode, StatusFilter, Vehicle, VehicleId, VehicleStatus,
    VehicleStatusKind,
};

/// Operator readings applied during a check-in. `None` keeps the vehicle's prior value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CheckInReadings {
    pub mileage: Option<u32>,
    pub fuel_level: Option<FuelLevel>,
}

/// Lenient parse of a form reading: anything that is not a valid odometer value is dropped.
pub fn parse_mileage(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok()
}

pub fn parse_fuel_level(raw: &str) -> Option<FuelLevel> {
    raw.trim().parse::<u8>().ok().and_then(FuelLevel::new)
}

/// Error enumeration for registry operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("vehicle {0} not found")]
    NotFound(VehicleId),
    #[error("vehicle id or scan code already registered: {0}")]
    Conflict(String),
    #[error("invalid vehicle {id}: {reason}")]
    InvalidVehicle { id: VehicleId, reason: String },
}

/// Authoritative, insertion-ordered collection of vehicle records.
#[derive(Debug, Clone, Default)]
pub struct FleetRegistry {
    vehicles: Vec<Vehicle>,
}

impl FleetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    pub fn list_all(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn filter_by_status(&self, filter: StatusFilter) -> Vec<&Vehicle> {
        self.vehicles
            .iter()
            .filter(|vehicle| filter.matches(&vehicle.status))
            .collect()
    }

    pub fn find_by_scan_code(&self, code: &ScanCode) -> Option<&Vehicle> {
        self.vehicles
            .iter()
            .find(|vehicle| vehicle.scan_code == *code)
    }

    pub fn get(&self, id: &VehicleId) -> Option<&Vehicle> {
        self.vehicles.iter().find(|vehicle| vehicle.id == *id)
    }

    pub fn statistics(&self) -> FleetStatistics {
        let mut stats = FleetStatistics {
            total_vehicles: self.vehicles.len(),
            ..FleetStatistics::default()
        };

        for vehicle in &self.vehicles {
            match vehicle.status.kind() {
                VehicleStatusKind::Available => stats.available += 1,
                VehicleStatusKind::Rented => {
                    stats.rented += 1;
                    stats.revenue += u64::from(vehicle.daily_rate);
                }
                VehicleStatusKind::Maintenance => stats.maintenance += 1,
            }
            if vehicle.catalog_listed {
                stats.catalog_listed += 1;
            }
        }

        stats
    }

    /// Register a new vehicle, enforcing unique ids and scan codes.
    pub fn insert(&mut self, vehicle: Vehicle) -> Result<&Vehicle, RegistryError> {
        let blank = if vehicle.id.0.trim().is_empty() {
            Some("vehicle id must not be blank")
        } else if vehicle.scan_code.0.trim().is_empty() {
            Some("scan code must not be blank")
        } else {
            None
        };
        if let Some(reason) = blank {
            return Err(RegistryError::InvalidVehicle {
                id: vehicle.id,
                reason: reason.to_string(),
            });
        }

        if vehicle.daily_rate == 0 {
            return Err(RegistryError::InvalidVehicle {
                id: vehicle.id,
                reason: "daily rate must be positive".to_string(),
            });
        }

        if self.get(&vehicle.id).is_some() {
            return Err(RegistryError::Conflict(vehicle.id.0));
        }
        if self.find_by_scan_code(&vehicle.scan_code).is_some() {
            return Err(RegistryError::Conflict(vehicle.scan_code.0));
        }

        self.vehicles.push(vehicle);
        Ok(&self.vehicles[self.vehicles.len() - 1])
    }

    /// Return a vehicle to service with the supplied readings and list it in the catalog.
    pub fn apply_check_in(
        &mut self,
        id: &VehicleId,
        readings: CheckInReadings,
    ) -> Result<Vehicle, RegistryError> {
        let vehicle = self
            .vehicles
            .iter_mut()
            .find(|vehicle| vehicle.id == *id)
            .ok_or_else(|| RegistryError::NotFound(id.clone()))?;

        if let Some(mileage) = readings.mileage {
            if mileage < vehicle.mileage {
                warn!(
                    vehicle = %vehicle.id,
                    previous = vehicle.mileage,
                    reported = mileage,
                    "check-in mileage is lower than the recorded odometer"
                );
            }
            vehicle.mileage = mileage;
        }
        if let Some(fuel_level) = readings.fuel_level {
            vehicle.fuel_level = fuel_level;
        }
        vehicle.status = VehicleStatus::Available;
        vehicle.catalog_listed = true;

        Ok(vehicle.clone())
    }
}
