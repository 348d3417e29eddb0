//! User entity (backend body mapping).

use domain::models::User;
use serde::{Deserialize, Serialize};

use super::WireEntity;

/// Backend user body.
///
/// `password` is sent on create and update when set, and never read back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserEntity {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub user_types: Vec<String>,
    #[serde(default)]
    pub vehicle_groups: Vec<String>,
    #[serde(default)]
    pub geofence_groups: Vec<String>,
    #[serde(default)]
    pub customer_groups: Vec<String>,
}

impl From<UserEntity> for User {
    fn from(entity: UserEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            username: entity.username,
            email: entity.email,
            phone: entity.phone,
            password: None,
            active: entity.is_active,
            role: entity.role.unwrap_or_default(),
            tag: entity.tag,
            user_types: entity.user_types,
            vehicle_groups: entity.vehicle_groups,
            geofence_groups: entity.geofence_groups,
            customer_groups: entity.customer_groups,
        }
    }
}

impl From<&User> for UserEntity {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            password: user.password.clone().filter(|p| !p.is_empty()),
            is_active: user.active,
            role: (!user.role.is_empty()).then(|| user.role.clone()),
            tag: user.tag.clone(),
            user_types: user.user_types.clone(),
            vehicle_groups: user.vehicle_groups.clone(),
            geofence_groups: user.geofence_groups.clone(),
            customer_groups: user.customer_groups.clone(),
        }
    }
}

impl WireEntity for UserEntity {
    type Model = User;
    const RESOURCE: &'static str = "user";

    fn from_model(model: &User) -> Self {
        Self::from(model)
    }
}
