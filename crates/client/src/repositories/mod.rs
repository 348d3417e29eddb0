//! Repository implementations over the REST backend.

pub mod options;
pub mod resource;

pub use options::RestOptionProvider;
pub use resource::{
    AlarmRepository, CustomerGroupRepository, GeofenceGroupRepository, ResourceRepository,
    UserRepository, VehicleGroupRepository,
};
