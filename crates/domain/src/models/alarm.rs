//! Alarm rule domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::{Validate, ValidationError};

use super::Entity;
use crate::forms::input::{
    add_unique, join_ids, parse_flag, parse_id, parse_id_list, parse_optional_number,
    remove_value, yes_no,
};
use crate::forms::{
    DrawerMode, EntityForm, FieldInputError, FieldKind, FieldSpec, FormErrors, OptionSource,
};
use crate::listing::{Listable, SortColumn, SortKey};

/// Kind of event an alarm watches for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlarmType {
    Overspeed,
    Idle,
    Geofence,
    HarshBraking,
    HarshAcceleration,
    LowFuel,
    PowerCut,
}

pub const ALARM_TYPE_CODES: &[&str] = &[
    "overspeed",
    "idle",
    "geofence",
    "harsh_braking",
    "harsh_acceleration",
    "low_fuel",
    "power_cut",
];

impl AlarmType {
    pub const ALL: [AlarmType; 7] = [
        AlarmType::Overspeed,
        AlarmType::Idle,
        AlarmType::Geofence,
        AlarmType::HarshBraking,
        AlarmType::HarshAcceleration,
        AlarmType::LowFuel,
        AlarmType::PowerCut,
    ];

    /// Backend code.
    pub fn code(&self) -> &'static str {
        match self {
            AlarmType::Overspeed => "overspeed",
            AlarmType::Idle => "idle",
            AlarmType::Geofence => "geofence",
            AlarmType::HarshBraking => "harsh_braking",
            AlarmType::HarshAcceleration => "harsh_acceleration",
            AlarmType::LowFuel => "low_fuel",
            AlarmType::PowerCut => "power_cut",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AlarmType::Overspeed => "Overspeed",
            AlarmType::Idle => "Excessive idle",
            AlarmType::Geofence => "Geofence",
            AlarmType::HarshBraking => "Harsh braking",
            AlarmType::HarshAcceleration => "Harsh acceleration",
            AlarmType::LowFuel => "Low fuel",
            AlarmType::PowerCut => "Power cut",
        }
    }

    /// Unit of the threshold, for types that take one.
    pub fn threshold_unit(&self) -> Option<&'static str> {
        match self {
            AlarmType::Overspeed => Some("km/h"),
            AlarmType::Idle => Some("minutes"),
            AlarmType::LowFuel => Some("%"),
            _ => None,
        }
    }

    pub fn requires_threshold(&self) -> bool {
        self.threshold_unit().is_some()
    }

    pub fn is_geofence(&self) -> bool {
        matches!(self, AlarmType::Geofence)
    }
}

impl fmt::Display for AlarmType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for AlarmType {
    type Err = String;

    /// Accepts the backend code or the label, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        AlarmType::ALL
            .into_iter()
            .find(|t| t.code() == needle || t.label().to_lowercase() == needle)
            .ok_or_else(|| format!("Invalid alarm type: {}", s.trim()))
    }
}

/// Severity category of an alarm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

pub const SEVERITY_CODES: &[&str] = &["low", "medium", "high", "critical"];

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Low,
        Severity::Medium,
        Severity::High,
        Severity::Critical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }

    /// Position in escalation order; sorting uses this, not the name.
    pub fn rank(&self) -> i64 {
        match self {
            Severity::Low => 0,
            Severity::Medium => 1,
            Severity::High => 2,
            Severity::Critical => 3,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Severity::ALL
            .into_iter()
            .find(|sev| sev.as_str() == needle)
            .ok_or_else(|| format!("Invalid severity: {}", s.trim()))
    }
}

/// An alarm rule attached to vehicle and geofence groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alarm {
    pub id: Option<i64>,
    #[serde(rename = "type")]
    pub alarm_type: AlarmType,
    pub severity: Severity,
    pub description: Option<String>,
    pub threshold: Option<f64>,
    #[serde(default)]
    pub status: bool,
    #[serde(default)]
    pub active_trip: bool,
    #[serde(default)]
    pub geofence_in: bool,
    #[serde(default)]
    pub geofence_out: bool,
    #[serde(default)]
    pub vehicle_group_ids: Vec<i64>,
    #[serde(default)]
    pub geofence_group_ids: Vec<i64>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for Alarm {
    fn default() -> Self {
        Self {
            id: None,
            alarm_type: AlarmType::Overspeed,
            severity: Severity::Medium,
            description: None,
            threshold: None,
            status: true,
            active_trip: false,
            geofence_in: false,
            geofence_out: false,
            vehicle_group_ids: Vec::new(),
            geofence_group_ids: Vec::new(),
            created_at: None,
            updated_at: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmSortField {
    Id,
    Type,
    Severity,
    Threshold,
    Status,
    CreatedAt,
}

impl SortColumn for AlarmSortField {
    fn all() -> &'static [Self] {
        &[
            AlarmSortField::Id,
            AlarmSortField::Type,
            AlarmSortField::Severity,
            AlarmSortField::Threshold,
            AlarmSortField::Status,
            AlarmSortField::CreatedAt,
        ]
    }

    fn key(&self) -> &'static str {
        match self {
            AlarmSortField::Id => "id",
            AlarmSortField::Type => "type",
            AlarmSortField::Severity => "severity",
            AlarmSortField::Threshold => "threshold",
            AlarmSortField::Status => "status",
            AlarmSortField::CreatedAt => "createdAt",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            AlarmSortField::Id => "ID",
            AlarmSortField::Type => "Type",
            AlarmSortField::Severity => "Severity",
            AlarmSortField::Threshold => "Threshold",
            AlarmSortField::Status => "Status",
            AlarmSortField::CreatedAt => "Created",
        }
    }
}

impl Listable for Alarm {
    type SortField = AlarmSortField;

    fn search_fields(&self) -> Vec<String> {
        vec![
            self.alarm_type.label().to_string(),
            self.severity.as_str().to_string(),
            self.description.clone().unwrap_or_default(),
            self.id.map(|id| id.to_string()).unwrap_or_default(),
        ]
    }

    fn sort_key(&self, field: AlarmSortField) -> SortKey {
        match field {
            AlarmSortField::Id => SortKey::Integer(self.id.unwrap_or_default()),
            AlarmSortField::Type => SortKey::text(self.alarm_type.label()),
            AlarmSortField::Severity => SortKey::Integer(self.severity.rank()),
            // Alarms without a threshold sort first.
            AlarmSortField::Threshold => SortKey::Decimal(self.threshold.unwrap_or(-1.0)),
            AlarmSortField::Status => SortKey::Flag(self.status),
            AlarmSortField::CreatedAt => SortKey::Timestamp(self.created_at),
        }
    }
}

impl Entity for Alarm {
    const NAME: &'static str = "Alarm";
    type Form = AlarmForm;

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn title(&self) -> String {
        format!("{} ({})", self.alarm_type.label(), self.severity)
    }
}

/// Drawer form for alarms.
#[derive(Debug, Clone, Validate)]
pub struct AlarmForm {
    pub alarm_type: Option<AlarmType>,
    pub severity: Option<Severity>,
    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: String,
    pub threshold: Option<f64>,
    pub status: bool,
    pub active_trip: bool,
    pub geofence_in: bool,
    pub geofence_out: bool,
    pub vehicle_group_ids: Vec<i64>,
    pub geofence_group_ids: Vec<i64>,
}

impl Default for AlarmForm {
    fn default() -> Self {
        Self {
            alarm_type: None,
            severity: None,
            description: String::new(),
            threshold: None,
            status: true,
            active_trip: false,
            geofence_in: false,
            geofence_out: false,
            vehicle_group_ids: Vec::new(),
            geofence_group_ids: Vec::new(),
        }
    }
}

const ALARM_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("type", "Type", FieldKind::Choice(ALARM_TYPE_CODES)).required(),
    FieldSpec::new("severity", "Severity", FieldKind::Choice(SEVERITY_CODES)).required(),
    FieldSpec::new("description", "Description", FieldKind::Text),
    FieldSpec::new("threshold", "Threshold", FieldKind::Number),
    FieldSpec::new("status", "Enabled", FieldKind::Flag),
    FieldSpec::new("activeTrip", "Active trip only", FieldKind::Flag),
    FieldSpec::new("geofenceIn", "On geofence entry", FieldKind::Flag),
    FieldSpec::new("geofenceOut", "On geofence exit", FieldKind::Flag),
    FieldSpec::new(
        "vehicleGroupIds",
        "Vehicle groups",
        FieldKind::MultiSelect {
            source: Some(OptionSource::VehicleGroups),
        },
    ),
    FieldSpec::new(
        "geofenceGroupIds",
        "Geofence groups",
        FieldKind::MultiSelect {
            source: Some(OptionSource::GeofenceGroups),
        },
    ),
];

fn add_validation_error(errors: &mut FormErrors, field: &str, error: ValidationError) {
    let message = error
        .message
        .map(|m| m.to_string())
        .unwrap_or_else(|| format!("{} is invalid", field));
    errors.add(field, message);
}

impl AlarmForm {
    fn ids_mut(&mut self, field: &str) -> Result<&mut Vec<i64>, FieldInputError> {
        match field {
            "vehicleGroupIds" => Ok(&mut self.vehicle_group_ids),
            "geofenceGroupIds" => Ok(&mut self.geofence_group_ids),
            _ if Self::field_spec(field).is_some() => {
                Err(FieldInputError::NotMultiSelect(field.to_string()))
            }
            _ => Err(FieldInputError::UnknownField(field.to_string())),
        }
    }
}

impl EntityForm for AlarmForm {
    type Entity = Alarm;

    fn fields() -> &'static [FieldSpec] {
        ALARM_FIELDS
    }

    fn from_entity(alarm: &Alarm) -> Self {
        Self {
            alarm_type: Some(alarm.alarm_type),
            severity: Some(alarm.severity),
            description: alarm.description.clone().unwrap_or_default(),
            threshold: alarm.threshold,
            status: alarm.status,
            active_trip: alarm.active_trip,
            geofence_in: alarm.geofence_in,
            geofence_out: alarm.geofence_out,
            vehicle_group_ids: alarm.vehicle_group_ids.clone(),
            geofence_group_ids: alarm.geofence_group_ids.clone(),
        }
    }

    fn build(&self, base: Option<&Alarm>) -> Alarm {
        let mut alarm = base.cloned().unwrap_or_default();
        if let Some(alarm_type) = self.alarm_type {
            alarm.alarm_type = alarm_type;
        }
        if let Some(severity) = self.severity {
            alarm.severity = severity;
        }
        alarm.description = if self.description.is_empty() {
            None
        } else {
            Some(self.description.clone())
        };
        // Thresholds only travel with the types that use them.
        alarm.threshold = if alarm.alarm_type.requires_threshold() {
            self.threshold
        } else {
            None
        };
        alarm.status = self.status;
        alarm.active_trip = self.active_trip;
        alarm.geofence_in = self.geofence_in;
        alarm.geofence_out = self.geofence_out;
        alarm.vehicle_group_ids = self.vehicle_group_ids.clone();
        alarm.geofence_group_ids = self.geofence_group_ids.clone();
        alarm
    }

    fn set_field(&mut self, field: &str, value: &str) -> Result<(), FieldInputError> {
        match field {
            "type" => {
                self.alarm_type = if value.trim().is_empty() {
                    None
                } else {
                    Some(
                        value
                            .parse()
                            .map_err(|e: String| FieldInputError::invalid(field, e))?,
                    )
                }
            }
            "severity" => {
                self.severity = if value.trim().is_empty() {
                    None
                } else {
                    Some(
                        value
                            .parse()
                            .map_err(|e: String| FieldInputError::invalid(field, e))?,
                    )
                }
            }
            "description" => self.description = value.trim().to_string(),
            "threshold" => self.threshold = parse_optional_number(field, value)?,
            "status" => self.status = parse_flag(field, value)?,
            "activeTrip" => self.active_trip = parse_flag(field, value)?,
            "geofenceIn" => self.geofence_in = parse_flag(field, value)?,
            "geofenceOut" => self.geofence_out = parse_flag(field, value)?,
            _ => *self.ids_mut(field)? = parse_id_list(field, value)?,
        }
        Ok(())
    }

    fn add_value(&mut self, field: &str, value: &str) -> Result<(), FieldInputError> {
        let id = parse_id(field, value);
        add_unique(self.ids_mut(field)?, id?);
        Ok(())
    }

    fn remove_value(&mut self, field: &str, value: &str) -> Result<(), FieldInputError> {
        let id = parse_id(field, value);
        remove_value(self.ids_mut(field)?, &id?);
        Ok(())
    }

    fn display_value(&self, field: &str) -> String {
        match field {
            "type" => self
                .alarm_type
                .map(|t| t.label().to_string())
                .unwrap_or_default(),
            "severity" => self
                .severity
                .map(|s| s.as_str().to_string())
                .unwrap_or_default(),
            "description" => self.description.clone(),
            "threshold" => match (self.threshold, self.alarm_type.and_then(|t| t.threshold_unit())) {
                (Some(value), Some(unit)) => format!("{} {}", value, unit),
                (Some(value), None) => value.to_string(),
                (None, _) => String::new(),
            },
            "status" => yes_no(self.status).to_string(),
            "activeTrip" => yes_no(self.active_trip).to_string(),
            "geofenceIn" => yes_no(self.geofence_in).to_string(),
            "geofenceOut" => yes_no(self.geofence_out).to_string(),
            "vehicleGroupIds" => join_ids(&self.vehicle_group_ids),
            "geofenceGroupIds" => join_ids(&self.geofence_group_ids),
            _ => String::new(),
        }
    }

    fn extra_checks(&self, _mode: DrawerMode) -> FormErrors {
        let mut errors = FormErrors::new();

        if self.severity.is_none() {
            add_validation_error(
                &mut errors,
                "severity",
                shared::validation::required("Severity is required"),
            );
        }

        let Some(alarm_type) = self.alarm_type else {
            add_validation_error(
                &mut errors,
                "type",
                shared::validation::required("Type is required"),
            );
            return errors;
        };

        if alarm_type.requires_threshold() {
            match self.threshold {
                None => add_validation_error(
                    &mut errors,
                    "threshold",
                    shared::validation::required("Threshold is required"),
                ),
                Some(value) => {
                    if let Err(e) = shared::validation::validate_threshold(value) {
                        add_validation_error(&mut errors, "threshold", e);
                    }
                }
            }
        }

        if alarm_type.is_geofence() {
            if !self.geofence_in && !self.geofence_out {
                errors.add("geofenceIn", "Choose entry, exit or both");
            }
            if self.geofence_group_ids.is_empty() {
                errors.add("geofenceGroupIds", "Select at least one geofence group");
            }
        }

        errors
    }
}
