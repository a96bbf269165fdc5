use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use std::io::Read;

use crate::workflows::fleet::domain::{
    FuelLevel, ScanCode, Vehicle, VehicleId, VehicleStatus, VehicleStatusKind,
};

/// A row that could not be turned into a vehicle, with its 1-based data row number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    pub row: usize,
    pub reason: String,
}

pub(crate) fn parse_vehicles<R: Read>(
    reader: R,
) -> Result<Vec<Result<Vehicle, RowError>>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut vehicles = Vec::new();

    for (index, record) in csv_reader.deserialize::<FleetRow>().enumerate() {
        let row = record?;
        vehicles.push(row.into_vehicle().map_err(|reason| RowError {
            row: index + 1,
            reason,
        }));
    }

    Ok(vehicles)
}

#[derive(Debug, Deserialize)]
struct FleetRow {
    id: String,
    make: String,
    model: String,
    year: u16,
    license_plate: String,
    status: String,
    location: String,
    mileage: u32,
    fuel_level: u8,
    daily_rate: u32,
    category: String,
    scan_code: String,
    #[serde(default, deserialize_with = "flexible_bool")]
    catalog_listed: bool,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    customer: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    return_date: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    issue: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    last_service: Option<String>,
}

impl FleetRow {
    fn into_vehicle(self) -> Result<Vehicle, String> {
        if self.id.is_empty() {
            return Err("id is required".into());
        }
        if self.scan_code.is_empty() {
            return Err(format!("scan_code is required for vehicle {}", self.id));
        }

        let kind: VehicleStatusKind = self.status.parse().map_err(|err| format!("{err}"))?;
        let status = match (kind, self.customer, self.return_date, self.issue) {
            (VehicleStatusKind::Available, None, None, None) => VehicleStatus::Available,
            (VehicleStatusKind::Rented, Some(customer), Some(return_date), None) => {
                VehicleStatus::Rented {
                    customer,
                    return_date: parse_date("return_date", &return_date)?,
                }
            }
            (VehicleStatusKind::Maintenance, None, None, Some(issue)) => {
                VehicleStatus::Maintenance { issue }
            }
            (VehicleStatusKind::Rented, ..) => {
                return Err("rented vehicles need customer and return_date and no issue".into())
            }
            (VehicleStatusKind::Maintenance, ..) => {
                return Err("maintenance vehicles need an issue and no rental fields".into())
            }
            (VehicleStatusKind::Available, ..) => {
                return Err("available vehicles cannot carry rental or maintenance fields".into())
            }
        };

        let fuel_level = FuelLevel::new(self.fuel_level)
            .ok_or_else(|| format!("fuel_level {} is above 100", self.fuel_level))?;
        let last_service = self
            .last_service
            .as_deref()
            .map(|value| parse_date("last_service", value))
            .transpose()?;

        Ok(Vehicle {
            id: VehicleId(self.id),
            make: self.make,
            model: self.model,
            year: self.year,
            license_plate: self.license_plate,
            status,
            location: self.location,
            mileage: self.mileage,
            fuel_level,
            daily_rate: self.daily_rate,
            category: self.category,
            scan_code: ScanCode(self.scan_code),
            catalog_listed: self.catalog_listed,
            last_service,
        })
    }
}

fn parse_date(column: &str, value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|err| format!("{column} '{value}' is not YYYY-MM-DD ({err})"))
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn flexible_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Ok(true),
        "false" | "no" | "n" | "0" | "" => Ok(false),
        other => Err(serde::de::Error::custom(format!(
            "expected a boolean for catalog_listed, got '{other}'"
        ))),
    }
}
