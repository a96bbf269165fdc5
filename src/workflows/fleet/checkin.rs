use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::domain::{FuelLevel, ScanCode, Vehicle, VehicleId};
use super::notifications::{Notification, NotificationCategory, NotificationFeed};
use super::registry::{
    parse_fuel_level, parse_mileage, CheckInReadings, FleetRegistry, RegistryError,
};

/// Condition reported by the operator at drop-off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleCondition {
    Excellent,
    #[default]
    Good,
    Fair,
    Poor,
}

impl VehicleCondition {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair - Minor Issues",
            Self::Poor => "Poor - Needs Attention",
        }
    }

    pub fn from_form_value(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "excellent" => Some(Self::Excellent),
            "good" => Some(Self::Good),
            "fair" => Some(Self::Fair),
            "poor" => Some(Self::Poor),
            _ => None,
        }
    }
}

/// Editable fields of the check-in form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftField {
    Mileage,
    FuelLevel,
    Condition,
    Notes,
}

impl DraftField {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Mileage => "mileage",
            Self::FuelLevel => "fuel_level",
            Self::Condition => "condition",
            Self::Notes => "notes",
        }
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DraftField {
    type Err = DraftFieldError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "mileage" => Ok(Self::Mileage),
            "fuel_level" | "fuelLevel" | "fuel" => Ok(Self::FuelLevel),
            "condition" => Ok(Self::Condition),
            "notes" => Ok(Self::Notes),
            other => Err(DraftFieldError(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown check-in field '{0}'")]
pub struct DraftFieldError(pub String);

/// In-progress check-in form for the selected vehicle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckInDraft {
    pub vehicle_id: VehicleId,
    pub mileage: Option<u32>,
    pub fuel_level: Option<FuelLevel>,
    pub condition: VehicleCondition,
    pub notes: String,
}

impl CheckInDraft {
    fn new(vehicle_id: VehicleId) -> Self {
        Self {
            vehicle_id,
            mileage: None,
            fuel_level: None,
            condition: VehicleCondition::default(),
            notes: String::new(),
        }
    }

    pub fn readings(&self) -> CheckInReadings {
        CheckInReadings {
            mileage: self.mileage,
            fuel_level: self.fuel_level,
        }
    }
}

/// Outcome of a single field edit. Invalid input is dropped rather than rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FieldEdit {
    Accepted { field: DraftField },
    Ignored { field: DraftField },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckInPhase {
    Idle,
    Selected,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum CheckInState {
    #[default]
    Idle,
    Selected(CheckInDraft),
}

/// Result of a committed check-in.
#[derive(Debug, Clone, Serialize)]
pub struct CheckInReceipt {
    pub vehicle: Vehicle,
    pub condition: VehicleCondition,
    pub notes: String,
    pub notification: Notification,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CheckInError {
    #[error("no vehicle matches scan code {0}")]
    UnknownScanCode(ScanCode),
    #[error("cannot {action} while the check-in is {phase:?}")]
    InvalidTransition {
        action: &'static str,
        phase: CheckInPhase,
    },
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Single in-progress check-in: `idle -> selected -> (submit | cancel) -> idle`.
#[derive(Debug, Clone, Default)]
pub struct CheckInWorkflow {
    state: CheckInState,
}

impl CheckInWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> CheckInPhase {
        match self.state {
            CheckInState::Idle => CheckInPhase::Idle,
            CheckInState::Selected(_) => CheckInPhase::Selected,
        }
    }

    pub fn draft(&self) -> Option<&CheckInDraft> {
        match &self.state {
            CheckInState::Idle => None,
            CheckInState::Selected(draft) => Some(draft),
        }
    }

    /// Select the vehicle behind a scan code. Scanning again while a vehicle is selected
    /// retargets the draft and keeps the readings already entered. An unknown code leaves
    /// the current state untouched.
    pub fn resolve<'r>(
        &mut self,
        registry: &'r FleetRegistry,
        code: &ScanCode,
    ) -> Result<&'r Vehicle, CheckInError> {
        let vehicle = registry
            .find_by_scan_code(code)
            .ok_or_else(|| CheckInError::UnknownScanCode(code.clone()))?;

        match &mut self.state {
            CheckInState::Selected(draft) => {
                debug!(
                    scan_code = %code,
                    previous = %draft.vehicle_id,
                    vehicle = %vehicle.id,
                    "check-in retargeted"
                );
                draft.vehicle_id = vehicle.id.clone();
            }
            CheckInState::Idle => {
                debug!(scan_code = %code, vehicle = %vehicle.id, "scan code resolved");
                self.state = CheckInState::Selected(CheckInDraft::new(vehicle.id.clone()));
            }
        }
        Ok(vehicle)
    }

    pub fn edit_field(
        &mut self,
        field: DraftField,
        raw: &str,
    ) -> Result<FieldEdit, CheckInError> {
        let draft = match &mut self.state {
            CheckInState::Selected(draft) => draft,
            CheckInState::Idle => {
                return Err(CheckInError::InvalidTransition {
                    action: "edit the draft",
                    phase: CheckInPhase::Idle,
                })
            }
        };

        let accepted = match field {
            DraftField::Mileage => {
                draft.mileage = parse_mileage(raw);
                draft.mileage.is_some()
            }
            DraftField::FuelLevel => {
                draft.fuel_level = parse_fuel_level(raw);
                draft.fuel_level.is_some()
            }
            DraftField::Condition => match VehicleCondition::from_form_value(raw) {
                Some(condition) => {
                    draft.condition = condition;
                    true
                }
                None => false,
            },
            DraftField::Notes => {
                draft.notes = raw.to_string();
                true
            }
        };

        if accepted {
            Ok(FieldEdit::Accepted { field })
        } else {
            debug!(%field, raw, "ignoring invalid check-in input");
            Ok(FieldEdit::Ignored { field })
        }
    }

    /// Commit the draft: update the registry, then announce the check-in on the feed.
    pub fn submit(
        &mut self,
        registry: &mut FleetRegistry,
        feed: &mut NotificationFeed,
    ) -> Result<CheckInReceipt, CheckInError> {
        let draft = match std::mem::take(&mut self.state) {
            CheckInState::Selected(draft) => draft,
            CheckInState::Idle => {
                return Err(CheckInError::InvalidTransition {
                    action: "submit",
                    phase: CheckInPhase::Idle,
                })
            }
        };

        let vehicle = match registry.apply_check_in(&draft.vehicle_id, draft.readings()) {
            Ok(vehicle) => vehicle,
            Err(err) => {
                // The operator can retry or cancel; keep the draft they entered.
                self.state = CheckInState::Selected(draft);
                return Err(err.into());
            }
        };
        let notification = feed.push(
            NotificationCategory::CheckIn,
            format!("Vehicle {} checked in and added to catalog", vehicle.id),
        );

        info!(
            vehicle = %vehicle.id,
            mileage = vehicle.mileage,
            fuel = vehicle.fuel_level.percent(),
            condition = draft.condition.label(),
            "vehicle checked in"
        );

        Ok(CheckInReceipt {
            vehicle,
            condition: draft.condition,
            notes: draft.notes,
            notification,
        })
    }

    pub fn cancel(&mut self) -> Result<(), CheckInError> {
        self.require_phase("cancel", CheckInPhase::Selected)?;
        self.state = CheckInState::Idle;
        Ok(())
    }

    fn require_phase(
        &self,
        action: &'static str,
        expected: CheckInPhase,
    ) -> Result<(), CheckInError> {
        let phase = self.phase();
        if phase == expected {
            Ok(())
        } else {
            Err(CheckInError::InvalidTransition { action, phase })
        }
    }
}
