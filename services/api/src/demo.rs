use crate::infra::{load_desk, parse_status_filter};
use chrono::{DateTime, Utc};
use clap::Args;
use fleet_desk::error::AppError;
use fleet_desk::workflows::fleet::{
    DraftField, FieldEdit, FleetDesk, FleetStatistics, ScanCode, StatusFilter, Vehicle,
    VehicleStatus, VehicleStatusKind,
};
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct FleetReportArgs {
    /// Status filter: all, available, rented or maintenance
    #[arg(long, default_value = "all", value_parser = parse_status_filter)]
    pub(crate) status: StatusFilter,
    /// Optional fleet CSV export to load instead of the bundled demo fleet
    #[arg(long)]
    pub(crate) vehicles_csv: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Scan code of the vehicle to check in
    #[arg(long, default_value = "QR002")]
    pub(crate) scan_code: String,
    /// Odometer reading entered on the check-in form
    #[arg(long)]
    pub(crate) mileage: Option<String>,
    /// Fuel percentage entered on the check-in form
    #[arg(long)]
    pub(crate) fuel: Option<String>,
    /// Optional fleet CSV export to load instead of the bundled demo fleet
    #[arg(long)]
    pub(crate) vehicles_csv: Option<PathBuf>,
}

pub(crate) fn run_fleet_report(args: FleetReportArgs) -> Result<(), AppError> {
    let FleetReportArgs {
        status,
        vehicles_csv,
    } = args;

    let now = Utc::now();
    let desk = load_desk(vehicles_csv.as_deref(), now)?;
    println!("Fleet report ({} vehicles)", status.label());
    render_statistics(&desk.statistics());
    render_vehicles(&desk.vehicles(status));
    render_notifications(&desk, now);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        scan_code,
        mileage,
        fuel,
        vehicles_csv,
    } = args;

    let now = Utc::now();
    let mut desk = load_desk(vehicles_csv.as_deref(), now)?;

    println!("Fleet check-in demo");
    println!("\nBefore check-in");
    render_statistics(&desk.statistics());

    let vehicle = desk.scan(&ScanCode(scan_code))?;
    println!("\nScanned {} ({})", vehicle.title(), vehicle.license_plate);
    render_vehicles(&[&vehicle]);
    if vehicle.is_rented() {
        println!("Submitting closes the rental and lists the vehicle in the catalog");
    }

    for (field, value) in [(DraftField::Mileage, mileage), (DraftField::FuelLevel, fuel)] {
        let Some(value) = value else { continue };
        match desk.edit_draft(field, &value)? {
            FieldEdit::Accepted { .. } => println!("- {field}: recorded '{value}'"),
            FieldEdit::Ignored { .. } => println!("- {field}: '{value}' ignored, keeping prior value"),
        }
    }

    let receipt = desk.submit_check_in()?;
    println!("\nAfter check-in");
    render_vehicles(&[&receipt.vehicle]);
    render_statistics(&desk.statistics());
    println!(
        "Condition recorded: {} | catalog listed: {}",
        receipt.condition.label(),
        yes_no(receipt.vehicle.catalog_listed)
    );
    render_notifications(&desk, now);
    Ok(())
}

fn render_statistics(stats: &FleetStatistics) {
    println!(
        "- {} vehicles | {} available | {} rented | {} maintenance",
        stats.total_vehicles, stats.available, stats.rented, stats.maintenance
    );
    println!(
        "- Revenue ${}/day | {} listed in catalog",
        stats.revenue, stats.catalog_listed
    );
}

fn render_vehicles(vehicles: &[&Vehicle]) {
    if vehicles.is_empty() {
        println!("No vehicles match this filter");
        return;
    }

    for vehicle in vehicles {
        println!(
            "- {} {} [{}] {} | {} mi | fuel {}% | ${}/day | {}",
            vehicle.id,
            vehicle.title(),
            vehicle.license_plate,
            status_line(&vehicle.status),
            vehicle.mileage,
            vehicle.fuel_level.percent(),
            vehicle.daily_rate,
            vehicle.location
        );
    }
}

fn render_notifications(desk: &FleetDesk, now: DateTime<Utc>) {
    println!("\nNotifications ({} unread)", desk.feed().unread_count());
    for notification in desk.dashboard(now).notifications {
        let marker = if notification.read { " " } else { "*" };
        println!(
            "{marker} [{}] {} ({})",
            notification.category.label(),
            notification.message,
            notification.time
        );
    }
}

fn status_line(status: &VehicleStatus) -> String {
    match status {
        VehicleStatus::Available => VehicleStatusKind::Available.label().to_string(),
        VehicleStatus::Rented {
            customer,
            return_date,
        } => format!("rented to {customer} until {return_date}"),
        VehicleStatus::Maintenance { issue } => format!("maintenance: {issue}"),
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
