//! Vehicle group domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::Entity;
use crate::forms::input::{add_unique, join_ids, parse_id, parse_id_list, remove_value};
use crate::forms::{EntityForm, FieldInputError, FieldKind, FieldSpec, OptionSource};
use crate::listing::{Listable, SortColumn, SortKey};

/// A named collection of vehicles.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleGroup {
    pub id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub vehicle_ids: Vec<i64>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleGroupSortField {
    Id,
    Name,
    Description,
    Vehicles,
    CreatedAt,
}

impl SortColumn for VehicleGroupSortField {
    fn all() -> &'static [Self] {
        &[
            VehicleGroupSortField::Id,
            VehicleGroupSortField::Name,
            VehicleGroupSortField::Description,
            VehicleGroupSortField::Vehicles,
            VehicleGroupSortField::CreatedAt,
        ]
    }

    fn key(&self) -> &'static str {
        match self {
            VehicleGroupSortField::Id => "id",
            VehicleGroupSortField::Name => "name",
            VehicleGroupSortField::Description => "description",
            VehicleGroupSortField::Vehicles => "vehicles",
            VehicleGroupSortField::CreatedAt => "createdAt",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            VehicleGroupSortField::Id => "ID",
            VehicleGroupSortField::Name => "Name",
            VehicleGroupSortField::Description => "Description",
            VehicleGroupSortField::Vehicles => "Vehicles",
            VehicleGroupSortField::CreatedAt => "Created",
        }
    }
}

impl Listable for VehicleGroup {
    type SortField = VehicleGroupSortField;

    fn search_fields(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.description.clone().unwrap_or_default(),
            self.id.map(|id| id.to_string()).unwrap_or_default(),
        ]
    }

    fn sort_key(&self, field: VehicleGroupSortField) -> SortKey {
        match field {
            VehicleGroupSortField::Id => SortKey::Integer(self.id.unwrap_or_default()),
            VehicleGroupSortField::Name => SortKey::text(&self.name),
            VehicleGroupSortField::Description => {
                SortKey::text(self.description.as_deref().unwrap_or_default())
            }
            VehicleGroupSortField::Vehicles => SortKey::Integer(self.vehicle_ids.len() as i64),
            VehicleGroupSortField::CreatedAt => SortKey::Timestamp(self.created_at),
        }
    }
}

impl Entity for VehicleGroup {
    const NAME: &'static str = "Vehicle group";
    type Form = VehicleGroupForm;

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn title(&self) -> String {
        self.name.clone()
    }
}

#[derive(Debug, Clone, Default, Validate)]
pub struct VehicleGroupForm {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: String,
    pub vehicle_ids: Vec<i64>,
}

const VEHICLE_GROUP_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("name", "Name", FieldKind::Text).required(),
    FieldSpec::new("description", "Description", FieldKind::Text),
    FieldSpec::new(
        "vehicleIds",
        "Vehicles",
        FieldKind::MultiSelect {
            source: Some(OptionSource::Vehicles),
        },
    ),
];

impl EntityForm for VehicleGroupForm {
    type Entity = VehicleGroup;

    fn fields() -> &'static [FieldSpec] {
        VEHICLE_GROUP_FIELDS
    }

    fn from_entity(entity: &VehicleGroup) -> Self {
        Self {
            name: entity.name.clone(),
            description: entity.description.clone().unwrap_or_default(),
            vehicle_ids: entity.vehicle_ids.clone(),
        }
    }

    fn build(&self, base: Option<&VehicleGroup>) -> VehicleGroup {
        let mut group = base.cloned().unwrap_or_default();
        group.name = self.name.clone();
        group.description = if self.description.is_empty() {
            None
        } else {
            Some(self.description.clone())
        };
        group.vehicle_ids = self.vehicle_ids.clone();
        group
    }

    fn set_field(&mut self, field: &str, value: &str) -> Result<(), FieldInputError> {
        match field {
            "name" => self.name = value.trim().to_string(),
            "description" => self.description = value.trim().to_string(),
            "vehicleIds" => self.vehicle_ids = parse_id_list(field, value)?,
            _ => return Err(FieldInputError::UnknownField(field.to_string())),
        }
        Ok(())
    }

    fn add_value(&mut self, field: &str, value: &str) -> Result<(), FieldInputError> {
        match field {
            "vehicleIds" => add_unique(&mut self.vehicle_ids, parse_id(field, value)?),
            "name" | "description" => {
                return Err(FieldInputError::NotMultiSelect(field.to_string()))
            }
            _ => return Err(FieldInputError::UnknownField(field.to_string())),
        }
        Ok(())
    }

    fn remove_value(&mut self, field: &str, value: &str) -> Result<(), FieldInputError> {
        match field {
            "vehicleIds" => remove_value(&mut self.vehicle_ids, &parse_id(field, value)?),
            "name" | "description" => {
                return Err(FieldInputError::NotMultiSelect(field.to_string()))
            }
            _ => return Err(FieldInputError::UnknownField(field.to_string())),
        }
        Ok(())
    }

    fn display_value(&self, field: &str) -> String {
        match field {
            "name" => self.name.clone(),
            "description" => self.description.clone(),
            "vehicleIds" => join_ids(&self.vehicle_ids),
            _ => String::new(),
        }
    }
}
