use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for fleet units (e.g. `V001`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VehicleId(pub String);

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Token printed on the vehicle, standing in for a QR payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScanCode(pub String);

impl fmt::Display for ScanCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Operational state of a vehicle. Each variant carries exactly the metadata valid for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum VehicleStatus {
    Available,
    Rented {
        customer: String,
        return_date: NaiveDate,
    },
    Maintenance {
        issue: String,
    },
}

impl VehicleStatus {
    pub const fn kind(&self) -> VehicleStatusKind {
        match self {
            Self::Available => VehicleStatusKind::Available,
            Self::Rented { .. } => VehicleStatusKind::Rented,
            Self::Maintenance { .. } => VehicleStatusKind::Maintenance,
        }
    }
}

/// Status discriminant without the per-state payload, used for filtering and counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleStatusKind {
    Available,
    Rented,
    Maintenance,
}

impl VehicleStatusKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Rented => "rented",
            Self::Maintenance => "maintenance",
        }
    }
}

impl fmt::Display for VehicleStatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for VehicleStatusKind {
    type Err = StatusFilterError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "available" => Ok(Self::Available),
            "rented" => Ok(Self::Rented),
            "maintenance" => Ok(Self::Maintenance),
            other => Err(StatusFilterError(other.to_string())),
        }
    }
}

/// Selection forwarded by the dashboard filter control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(VehicleStatusKind),
}

impl StatusFilter {
    pub fn matches(self, status: &VehicleStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(kind) => status.kind() == kind,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Only(kind) => kind.label(),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = StatusFilterError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        value.parse().map(Self::Only)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown vehicle status '{0}' (expected all, available, rented, or maintenance)")]
pub struct StatusFilterError(pub String);

/// Fuel gauge reading in percent, always within `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct FuelLevel(u8);

impl FuelLevel {
    pub const MAX: u8 = 100;

    pub const fn new(percent: u8) -> Option<Self> {
        if percent <= Self::MAX {
            Some(Self(percent))
        } else {
            None
        }
    }

    pub const fn percent(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for FuelLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("fuel level {value} exceeds 100"))
    }
}

impl From<FuelLevel> for u8 {
    fn from(value: FuelLevel) -> Self {
        value.0
    }
}

/// One fleet unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: VehicleId,
    pub make: String,
    pub model: String,
    pub year: u16,
    pub license_plate: String,
    #[serde(flatten)]
    pub status: VehicleStatus,
    pub location: String,
    pub mileage: u32,
    pub fuel_level: FuelLevel,
    pub daily_rate: u32,
    pub category: String,
    pub scan_code: ScanCode,
    pub catalog_listed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_service: Option<NaiveDate>,
}

impl Vehicle {
    pub fn title(&self) -> String {
        format!("{} {} {}", self.year, self.make, self.model)
    }

    pub fn is_rented(&self) -> bool {
        matches!(self.status, VehicleStatus::Rented { .. })
    }
}

/// Aggregate dashboard figures, always derived from the registry's current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FleetStatistics {
    pub total_vehicles: usize,
    pub available: usize,
    pub rented: usize,
    pub maintenance: usize,
    /// Sum of daily rates over rented vehicles.
    pub revenue: u64,
    pub catalog_listed: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_filter_parses_known_values() {
        assert_eq!("all".parse::<StatusFilter>(), Ok(StatusFilter::All));
        assert_eq!(
            " Rented ".parse::<StatusFilter>(),
            Ok(StatusFilter::Only(VehicleStatusKind::Rented))
        );
        assert!("parked".parse::<StatusFilter>().is_err());
    }

    #[test]
    fn fuel_level_rejects_values_above_full() {
        assert_eq!(FuelLevel::new(100).map(FuelLevel::percent), Some(100));
        assert!(FuelLevel::new(101).is_none());
    }

    #[test]
    fn rented_status_flattens_into_vehicle_json() {
        let vehicle = Vehicle {
            id: VehicleId("V002".to_string()),
            make: "Honda".to_string(),
            model: "CR-V".to_string(),
            year: 2022,
            license_plate: "XYZ-789".to_string(),
            status: VehicleStatus::Rented {
                customer: "John Smith".to_string(),
                return_date: NaiveDate::from_ymd_opt(2025, 6, 22).expect("valid date"),
            },
            location: "Airport Branch".to_string(),
            mileage: 28750,
            fuel_level: FuelLevel::new(60).expect("valid fuel"),
            daily_rate: 65,
            category: "SUV".to_string(),
            scan_code: ScanCode("QR002".to_string()),
            catalog_listed: false,
            last_service: None,
        };

        let json = serde_json::to_value(&vehicle).expect("serializes");
        assert_eq!(json["status"], "rented");
        assert_eq!(json["customer"], "John Smith");
        assert_eq!(json["return_date"], "2025-06-22");
        assert!(json.get("issue").is_none());
        assert!(json.get("last_service").is_none());
    }
}
