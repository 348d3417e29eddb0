//! Domain layer for the fleet admin console.
//!
//! This crate contains:
//! - Entity models (users, customer/vehicle/geofence groups, alarms)
//! - The list controller (filter, sort, paginate)
//! - Drawer forms and their validation
//! - Service seams for data access and notifications

pub mod forms;
pub mod listing;
pub mod models;
pub mod services;
