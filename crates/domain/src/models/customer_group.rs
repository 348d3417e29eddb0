//! Customer group domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::Entity;
use crate::forms::input::{add_unique, join_ids, parse_id, parse_id_list, remove_value};
use crate::forms::{EntityForm, FieldInputError, FieldKind, FieldSpec, OptionSource};
use crate::listing::{Listable, SortColumn, SortKey};

/// A named collection of customers.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerGroup {
    pub id: Option<i64>,
    pub group_name: String,
    #[serde(default)]
    pub customer_ids: Vec<i64>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Sortable columns of the customer group table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerGroupSortField {
    Id,
    Name,
    Customers,
    CreatedAt,
    UpdatedAt,
}

impl SortColumn for CustomerGroupSortField {
    fn all() -> &'static [Self] {
        &[
            CustomerGroupSortField::Id,
            CustomerGroupSortField::Name,
            CustomerGroupSortField::Customers,
            CustomerGroupSortField::CreatedAt,
            CustomerGroupSortField::UpdatedAt,
        ]
    }

    fn key(&self) -> &'static str {
        match self {
            CustomerGroupSortField::Id => "id",
            CustomerGroupSortField::Name => "groupName",
            CustomerGroupSortField::Customers => "customers",
            CustomerGroupSortField::CreatedAt => "createdAt",
            CustomerGroupSortField::UpdatedAt => "updatedAt",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            CustomerGroupSortField::Id => "ID",
            CustomerGroupSortField::Name => "Group name",
            CustomerGroupSortField::Customers => "Customers",
            CustomerGroupSortField::CreatedAt => "Created",
            CustomerGroupSortField::UpdatedAt => "Updated",
        }
    }
}

impl Listable for CustomerGroup {
    type SortField = CustomerGroupSortField;

    fn search_fields(&self) -> Vec<String> {
        vec![
            self.group_name.clone(),
            self.id.map(|id| id.to_string()).unwrap_or_default(),
        ]
    }

    fn sort_key(&self, field: CustomerGroupSortField) -> SortKey {
        match field {
            CustomerGroupSortField::Id => SortKey::Integer(self.id.unwrap_or_default()),
            CustomerGroupSortField::Name => SortKey::text(&self.group_name),
            CustomerGroupSortField::Customers => SortKey::Integer(self.customer_ids.len() as i64),
            CustomerGroupSortField::CreatedAt => SortKey::Timestamp(self.created_at),
            CustomerGroupSortField::UpdatedAt => SortKey::Timestamp(self.updated_at),
        }
    }
}

impl Entity for CustomerGroup {
    const NAME: &'static str = "Customer group";
    type Form = CustomerGroupForm;

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn title(&self) -> String {
        self.group_name.clone()
    }
}

/// Drawer form for customer groups.
#[derive(Debug, Clone, Default, Validate)]
pub struct CustomerGroupForm {
    #[validate(length(min = 1, message = "Group name is required"))]
    pub group_name: String,
    pub customer_ids: Vec<i64>,
}

const CUSTOMER_GROUP_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("groupName", "Group name", FieldKind::Text).required(),
    FieldSpec::new(
        "customerIds",
        "Customers",
        FieldKind::MultiSelect {
            source: Some(OptionSource::Customers),
        },
    ),
];

impl EntityForm for CustomerGroupForm {
    type Entity = CustomerGroup;

    fn fields() -> &'static [FieldSpec] {
        CUSTOMER_GROUP_FIELDS
    }

    fn from_entity(entity: &CustomerGroup) -> Self {
        Self {
            group_name: entity.group_name.clone(),
            customer_ids: entity.customer_ids.clone(),
        }
    }

    fn build(&self, base: Option<&CustomerGroup>) -> CustomerGroup {
        let mut group = base.cloned().unwrap_or_default();
        group.group_name = self.group_name.clone();
        group.customer_ids = self.customer_ids.clone();
        group
    }

    fn set_field(&mut self, field: &str, value: &str) -> Result<(), FieldInputError> {
        match field {
            "groupName" => self.group_name = value.trim().to_string(),
            "customerIds" => self.customer_ids = parse_id_list(field, value)?,
            _ => return Err(FieldInputError::UnknownField(field.to_string())),
        }
        Ok(())
    }

    fn add_value(&mut self, field: &str, value: &str) -> Result<(), FieldInputError> {
        match field {
            "customerIds" => add_unique(&mut self.customer_ids, parse_id(field, value)?),
            "groupName" => return Err(FieldInputError::NotMultiSelect(field.to_string())),
            _ => return Err(FieldInputError::UnknownField(field.to_string())),
        }
        Ok(())
    }

    fn remove_value(&mut self, field: &str, value: &str) -> Result<(), FieldInputError> {
        match field {
            "customerIds" => remove_value(&mut self.customer_ids, &parse_id(field, value)?),
            "groupName" => return Err(FieldInputError::NotMultiSelect(field.to_string())),
            _ => return Err(FieldInputError::UnknownField(field.to_string())),
        }
        Ok(())
    }

    fn display_value(&self, field: &str) -> String {
        match field {
            "groupName" => self.group_name.clone(),
            "customerIds" => join_ids(&self.customer_ids),
            _ => String::new(),
        }
    }
}
