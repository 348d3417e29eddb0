//! Domain models for the fleet admin console.

pub mod alarm;
pub mod customer_group;
pub mod geofence_group;
pub mod option;
pub mod user;
pub mod vehicle_group;

use std::fmt;

use crate::forms::EntityForm;
use crate::listing::Listable;

pub use alarm::{Alarm, AlarmForm, AlarmSortField, AlarmType, Severity};
pub use customer_group::{CustomerGroup, CustomerGroupForm, CustomerGroupSortField};
pub use geofence_group::{GeofenceGroup, GeofenceGroupForm, GeofenceGroupSortField};
pub use option::{Customer, Geofence, Vehicle};
pub use user::{User, UserForm, UserSortField};
pub use vehicle_group::{VehicleGroup, VehicleGroupForm, VehicleGroupSortField};

/// A record managed by one admin screen.
pub trait Entity: Listable + Clone + fmt::Debug + Send + Sync + 'static {
    /// Human name used in titles and toasts ("Customer group").
    const NAME: &'static str;

    type Form: EntityForm<Entity = Self>;

    /// Backend-assigned id; `None` until the record has been created.
    fn id(&self) -> Option<i64>;

    fn set_id(&mut self, id: i64);

    /// Short label of this record for confirmations.
    fn title(&self) -> String;
}
