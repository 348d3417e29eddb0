//! Wire entity definitions.
//!
//! Entities mirror backend request and response bodies (snake_case) and
//! convert to and from the camelCase domain models.

pub mod alarm;
pub mod customer_group;
pub mod geofence_group;
pub mod option;
pub mod user;
pub mod vehicle_group;

use domain::models::Entity;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub use alarm::AlarmEntity;
pub use customer_group::CustomerGroupEntity;
pub use geofence_group::GeofenceGroupEntity;
pub use option::{CustomerEntity, GeofenceEntity, VehicleEntity};
pub use user::UserEntity;
pub use vehicle_group::VehicleGroupEntity;

/// A backend resource served under `/{RESOURCE}`.
pub trait WireEntity: Serialize + DeserializeOwned + Send + Sync + 'static {
    type Model: Entity + From<Self>;

    /// Path segment of the resource.
    const RESOURCE: &'static str;

    /// Builds the request body for a create or update.
    fn from_model(model: &Self::Model) -> Self;
}
