//! Option source entities (read-only lookups).

use domain::models::{Customer, Geofence, Vehicle};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct CustomerEntity {
    pub id: i64,
    pub name: String,
}

impl From<CustomerEntity> for Customer {
    fn from(entity: CustomerEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeofenceEntity {
    pub id: i64,
    pub name: String,
}

impl From<GeofenceEntity> for Geofence {
    fn from(entity: GeofenceEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct VehicleEntity {
    pub id: i64,
    #[serde(alias = "vehicle_name")]
    pub name: String,
    #[serde(default, alias = "plate")]
    pub plate_number: Option<String>,
}

impl From<VehicleEntity> for Vehicle {
    fn from(entity: VehicleEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            plate: entity.plate_number,
        }
    }
}
