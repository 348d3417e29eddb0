//! Alarm entity (backend body mapping).

use chrono::{DateTime, Utc};
use domain::models::{Alarm, AlarmType, Severity};
use serde::{Deserialize, Serialize};

use super::WireEntity;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlarmEntity {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "type")]
    pub alarm_type: AlarmType,
    pub severity: Severity,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
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
    #[serde(default, skip_serializing)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<AlarmEntity> for Alarm {
    fn from(entity: AlarmEntity) -> Self {
        Self {
            id: entity.id,
            alarm_type: entity.alarm_type,
            severity: entity.severity,
            description: entity.description,
            threshold: entity.threshold,
            status: entity.status,
            active_trip: entity.active_trip,
            geofence_in: entity.geofence_in,
            geofence_out: entity.geofence_out,
            vehicle_group_ids: entity.vehicle_group_ids,
            geofence_group_ids: entity.geofence_group_ids,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

impl From<&Alarm> for AlarmEntity {
    fn from(alarm: &Alarm) -> Self {
        Self {
            id: alarm.id,
            alarm_type: alarm.alarm_type,
            severity: alarm.severity,
            description: alarm.description.clone(),
            threshold: alarm.threshold,
            status: alarm.status,
            active_trip: alarm.active_trip,
            geofence_in: alarm.geofence_in,
            geofence_out: alarm.geofence_out,
            vehicle_group_ids: alarm.vehicle_group_ids.clone(),
            geofence_group_ids: alarm.geofence_group_ids.clone(),
            created_at: alarm.created_at,
            updated_at: alarm.updated_at,
        }
    }
}

impl WireEntity for AlarmEntity {
    type Model = Alarm;
    const RESOURCE: &'static str = "alarm";

    fn from_model(model: &Alarm) -> Self {
        Self::from(model)
    }
}
