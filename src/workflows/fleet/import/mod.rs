mod parser;

use crate::workflows::fleet::registry::{FleetRegistry, RegistryError};
use std::io::Read;
use std::path::Path;

pub use parser::RowError;

#[derive(Debug)]
pub enum FleetImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Row(RowError),
    Registry(RegistryError),
}

impl std::fmt::Display for FleetImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FleetImportError::Io(err) => write!(f, "failed to read fleet export: {}", err),
            FleetImportError::Csv(err) => write!(f, "invalid fleet CSV data: {}", err),
            FleetImportError::Row(err) => {
                write!(f, "fleet export row {} rejected: {}", err.row, err.reason)
            }
            FleetImportError::Registry(err) => {
                write!(f, "could not register imported vehicle: {}", err)
            }
        }
    }
}

impl std::error::Error for FleetImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FleetImportError::Io(err) => Some(err),
            FleetImportError::Csv(err) => Some(err),
            FleetImportError::Row(_) => None,
            FleetImportError::Registry(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for FleetImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for FleetImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<RowError> for FleetImportError {
    fn from(err: RowError) -> Self {
        Self::Row(err)
    }
}

impl From<RegistryError> for FleetImportError {
    fn from(err: RegistryError) -> Self {
        Self::Registry(err)
    }
}

/// Builds a registry from a fleet CSV export.
pub struct FleetImporter;

impl FleetImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<FleetRegistry, FleetImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<FleetRegistry, FleetImportError> {
        let mut registry = FleetRegistry::new();
        for vehicle in parser::parse_vehicles(reader)? {
            registry.insert(vehicle?)?;
        }
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::fleet::domain::{StatusFilter, VehicleStatus, VehicleStatusKind};
    use std::io::Cursor;

    const HEADER: &str = "id,make,model,year,license_plate,status,location,mileage,fuel_level,daily_rate,category,scan_code,catalog_listed,customer,return_date,issue,last_service\n";

    fn import(rows: &str) -> Result<FleetRegistry, FleetImportError> {
        FleetImporter::from_reader(Cursor::new(format!("{HEADER}{rows}")))
    }

    #[test]
    fn importer_builds_status_variants_from_columns() {
        let registry = import(
            "V010,Kia,Rio,2021,KIA-010,rented,Airport Branch,30100,55,39,Economy,QR010,no,Ana Ruiz,2025-07-01,,\n\
V011,Jeep,Wrangler,2020,JEP-011,maintenance,Service Center,61000,20,95,SUV,QR011,yes,,,Transmission noise,2024-12-01\n",
        )
        .expect("import succeeds");

        assert_eq!(registry.len(), 2);
        let rented = registry.filter_by_status(StatusFilter::Only(VehicleStatusKind::Rented));
        match &rented[0].status {
            VehicleStatus::Rented { customer, .. } => assert_eq!(customer, "Ana Ruiz"),
            other => panic!("expected rented status, got {other:?}"),
        }
        assert!(registry.list_all()[1].catalog_listed);
        assert!(registry.list_all()[1].last_service.is_some());
    }

    #[test]
    fn importer_rejects_rental_fields_on_available_rows() {
        let error = import(
            "V010,Kia,Rio,2021,KIA-010,available,Airport Branch,30100,55,39,Economy,QR010,no,Ana Ruiz,,,\n",
        )
        .expect_err("conflicting fields rejected");

        match error {
            FleetImportError::Row(RowError { row, .. }) => assert_eq!(row, 1),
            other => panic!("expected row error, got {other:?}"),
        }
    }

    #[test]
    fn importer_rejects_rented_rows_without_return_date() {
        let error = import(
            "V010,Kia,Rio,2021,KIA-010,rented,Airport Branch,30100,55,39,Economy,QR010,no,Ana Ruiz,,,\n",
        )
        .expect_err("incomplete rental rejected");
        assert!(matches!(error, FleetImportError::Row(_)));
    }

    #[test]
    fn importer_rejects_fuel_above_full_tank() {
        let error = import(
            "V010,Kia,Rio,2021,KIA-010,available,Airport Branch,30100,130,39,Economy,QR010,no,,,,\n",
        )
        .expect_err("fuel out of range");
        assert!(error.to_string().contains("fuel_level 130"));
    }

    #[test]
    fn importer_rejects_rows_without_identifiers() {
        let error = import(
            "V010,Kia,Rio,2021,KIA-010,available,Airport Branch,30100,55,39,Economy,QR010,no,,,,\n\
V011,Kia,Rio,2021,KIA-011,available,Airport Branch,30100,55,39,Economy,  ,no,,,,\n",
        )
        .expect_err("blank scan code rejected");
        match error {
            FleetImportError::Row(RowError { row, reason }) => {
                assert_eq!(row, 2);
                assert!(reason.contains("scan_code"), "reason was {reason}");
            }
            other => panic!("expected row error, got {other:?}"),
        }

        let error = import(
            ",Kia,Rio,2021,KIA-010,available,Airport Branch,30100,55,39,Economy,QR010,no,,,,\n",
        )
        .expect_err("blank id rejected");
        assert!(matches!(error, FleetImportError::Row(RowError { row: 1, .. })));
    }

    #[test]
    fn importer_propagates_duplicate_scan_codes() {
        let error = import(
            "V010,Kia,Rio,2021,KIA-010,available,Airport Branch,30100,55,39,Economy,QR010,no,,,,\n\
V011,Kia,Rio,2021,KIA-011,available,Airport Branch,30100,55,39,Economy,QR010,no,,,,\n",
        )
        .expect_err("duplicate scan code");
        assert!(matches!(
            error,
            FleetImportError::Registry(RegistryError::Conflict(_))
        ));
    }

    #[test]
    fn importer_from_path_propagates_io_errors() {
        let error = FleetImporter::from_path("./does-not-exist.csv").expect_err("io error");
        match error {
            FleetImportError::Io(_) => {}
            other => panic!("expected io error, got {other:?}"),
        }
    }
}
