//! Vehicle group entity (backend body mapping).
//!
//! The backend names the group `group_name`; the console calls it `name`.

use chrono::{DateTime, Utc};
use domain::models::VehicleGroup;
use serde::{Deserialize, Serialize};

use super::WireEntity;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleGroupEntity {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub group_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub vehicle_ids: Vec<i64>,
    #[serde(default, skip_serializing)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<VehicleGroupEntity> for VehicleGroup {
    fn from(entity: VehicleGroupEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.group_name,
            description: entity.description,
            vehicle_ids: entity.vehicle_ids,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

impl From<&VehicleGroup> for VehicleGroupEntity {
    fn from(group: &VehicleGroup) -> Self {
        Self {
            id: group.id,
            group_name: group.name.clone(),
            description: group.description.clone(),
            vehicle_ids: group.vehicle_ids.clone(),
            created_at: group.created_at,
            updated_at: group.updated_at,
        }
    }
}

impl WireEntity for VehicleGroupEntity {
    type Model = VehicleGroup;
    const RESOURCE: &'static str = "groups";

    fn from_model(model: &VehicleGroup) -> Self {
        Self::from(model)
    }
}
