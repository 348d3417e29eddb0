//! Read-only records that populate drawer multi-selects.

use serde::{Deserialize, Serialize};

use crate::forms::SelectOption;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Geofence {
    pub id: i64,
    pub name: String,
}

/// A vehicle, shown by name with its plate when known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: i64,
    pub name: String,
    pub plate: Option<String>,
}

impl From<Customer> for SelectOption {
    fn from(customer: Customer) -> Self {
        SelectOption {
            id: customer.id,
            name: customer.name,
        }
    }
}

impl From<Geofence> for SelectOption {
    fn from(geofence: Geofence) -> Self {
        SelectOption {
            id: geofence.id,
            name: geofence.name,
        }
    }
}

impl From<Vehicle> for SelectOption {
    fn from(vehicle: Vehicle) -> Self {
        let name = match vehicle.plate {
            Some(plate) if !plate.is_empty() => format!("{} ({})", vehicle.name, plate),
            _ => vehicle.name,
        };
        SelectOption {
            id: vehicle.id,
            name,
        }
    }
}
