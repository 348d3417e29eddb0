//! Geofence group entity (backend body mapping).

use chrono::{DateTime, Utc};
use domain::models::GeofenceGroup;
use serde::{Deserialize, Serialize};

use super::WireEntity;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeofenceGroupEntity {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub geo_group: String,
    #[serde(default)]
    pub geofence_ids: Vec<i64>,
    #[serde(default, skip_serializing)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<GeofenceGroupEntity> for GeofenceGroup {
    fn from(entity: GeofenceGroupEntity) -> Self {
        Self {
            id: entity.id,
            geo_group: entity.geo_group,
            geofence_ids: entity.geofence_ids,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

impl From<&GeofenceGroup> for GeofenceGroupEntity {
    fn from(group: &GeofenceGroup) -> Self {
        Self {
            id: group.id,
            geo_group: group.geo_group.clone(),
            geofence_ids: group.geofence_ids.clone(),
            created_at: group.created_at,
            updated_at: group.updated_at,
        }
    }
}

impl WireEntity for GeofenceGroupEntity {
    type Model = GeofenceGroup;
    const RESOURCE: &'static str = "geofence-group";

    fn from_model(model: &GeofenceGroup) -> Self {
        Self::from(model)
    }
}
