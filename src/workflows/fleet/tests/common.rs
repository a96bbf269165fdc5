use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde_json::Value;

use crate::workflows::fleet::domain::{FuelLevel, ScanCode, Vehicle, VehicleId, VehicleStatus};
use crate::workflows::fleet::notifications::NotificationFeed;
use crate::workflows::fleet::registry::{
    parse_fuel_level, parse_mileage, CheckInReadings, FleetRegistry,
};
use crate::workflows::fleet::{fleet_router, seed_feed, seed_registry, FleetDesk, SharedDesk};

pub(super) fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 20, 9, 30, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn seeded_registry() -> FleetRegistry {
    seed_registry().expect("seed fleet imports")
}

pub(super) fn registry_of<const N: usize>(vehicles: [Vehicle; N]) -> FleetRegistry {
    let mut registry = FleetRegistry::new();
    for vehicle in vehicles {
        registry.insert(vehicle).expect("vehicle registers");
    }
    registry
}

pub(super) fn readings(mileage: &str, fuel_level: &str) -> CheckInReadings {
    CheckInReadings {
        mileage: parse_mileage(mileage),
        fuel_level: parse_fuel_level(fuel_level),
    }
}

pub(super) fn seeded_feed() -> NotificationFeed {
    seed_feed(now())
}

pub(super) fn seeded_desk() -> FleetDesk {
    FleetDesk::seeded(now()).expect("seed desk builds")
}

pub(super) fn vehicle_id(raw: &str) -> VehicleId {
    VehicleId(raw.to_string())
}

pub(super) fn scan_code(raw: &str) -> ScanCode {
    ScanCode(raw.to_string())
}

pub(super) fn vehicle(id: &str, code: &str, status: VehicleStatus) -> Vehicle {
    Vehicle {
        id: vehicle_id(id),
        make: "Nissan".to_string(),
        model: "Leaf".to_string(),
        year: 2021,
        license_plate: format!("EV-{id}"),
        status,
        location: "Downtown Branch".to_string(),
        mileage: 12000,
        fuel_level: FuelLevel::new(70).expect("valid fuel"),
        daily_rate: 50,
        category: "Electric".to_string(),
        scan_code: scan_code(code),
        catalog_listed: false,
        last_service: None,
    }
}

pub(super) fn rented(customer: &str) -> VehicleStatus {
    VehicleStatus::Rented {
        customer: customer.to_string(),
        return_date: NaiveDate::from_ymd_opt(2025, 7, 1).expect("valid date"),
    }
}

pub(super) fn shared_desk() -> SharedDesk {
    Arc::new(Mutex::new(seeded_desk()))
}

pub(super) fn router_with_desk(desk: SharedDesk) -> axum::Router {
    fleet_router(desk)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
