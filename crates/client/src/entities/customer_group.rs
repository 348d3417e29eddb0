//! Customer group entity (backend body mapping).

use chrono::{DateTime, Utc};
use domain::models::CustomerGroup;
use serde::{Deserialize, Serialize};

use super::WireEntity;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerGroupEntity {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub group_name: String,
    #[serde(default)]
    pub customer_ids: Vec<i64>,
    #[serde(default, skip_serializing)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<CustomerGroupEntity> for CustomerGroup {
    fn from(entity: CustomerGroupEntity) -> Self {
        Self {
            id: entity.id,
            group_name: entity.group_name,
            customer_ids: entity.customer_ids,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

impl From<&CustomerGroup> for CustomerGroupEntity {
    fn from(group: &CustomerGroup) -> Self {
        Self {
            id: group.id,
            group_name: group.group_name.clone(),
            customer_ids: group.customer_ids.clone(),
            created_at: group.created_at,
            updated_at: group.updated_at,
        }
    }
}

impl WireEntity for CustomerGroupEntity {
    type Model = CustomerGroup;
    const RESOURCE: &'static str = "customer-group";

    fn from_model(model: &CustomerGroup) -> Self {
        Self::from(model)
    }
}
