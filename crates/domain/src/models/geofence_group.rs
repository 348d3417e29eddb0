//! Geofence group domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::Entity;
use crate::forms::input::{add_unique, join_ids, parse_id, parse_id_list, remove_value};
use crate::forms::{EntityForm, FieldInputError, FieldKind, FieldSpec, OptionSource};
use crate::listing::{Listable, SortColumn, SortKey};

/// A named collection of geofences.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeofenceGroup {
    pub id: Option<i64>,
    pub geo_group: String,
    #[serde(default)]
    pub geofence_ids: Vec<i64>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeofenceGroupSortField {
    Id,
    Name,
    Geofences,
    CreatedAt,
    UpdatedAt,
}

impl SortColumn for GeofenceGroupSortField {
    fn all() -> &'static [Self] {
        &[
            GeofenceGroupSortField::Id,
            GeofenceGroupSortField::Name,
            GeofenceGroupSortField::Geofences,
            GeofenceGroupSortField::CreatedAt,
            GeofenceGroupSortField::UpdatedAt,
        ]
    }

    fn key(&self) -> &'static str {
        match self {
            GeofenceGroupSortField::Id => "id",
            GeofenceGroupSortField::Name => "geoGroup",
            GeofenceGroupSortField::Geofences => "geofences",
            GeofenceGroupSortField::CreatedAt => "createdAt",
            GeofenceGroupSortField::UpdatedAt => "updatedAt",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            GeofenceGroupSortField::Id => "ID",
            GeofenceGroupSortField::Name => "Group name",
            GeofenceGroupSortField::Geofences => "Geofences",
            GeofenceGroupSortField::CreatedAt => "Created",
            GeofenceGroupSortField::UpdatedAt => "Updated",
        }
    }
}

impl Listable for GeofenceGroup {
    type SortField = GeofenceGroupSortField;

    fn search_fields(&self) -> Vec<String> {
        vec![
            self.geo_group.clone(),
            self.id.map(|id| id.to_string()).unwrap_or_default(),
        ]
    }

    fn sort_key(&self, field: GeofenceGroupSortField) -> SortKey {
        match field {
            GeofenceGroupSortField::Id => SortKey::Integer(self.id.unwrap_or_default()),
            GeofenceGroupSortField::Name => SortKey::text(&self.geo_group),
            GeofenceGroupSortField::Geofences => SortKey::Integer(self.geofence_ids.len() as i64),
            GeofenceGroupSortField::CreatedAt => SortKey::Timestamp(self.created_at),
            GeofenceGroupSortField::UpdatedAt => SortKey::Timestamp(self.updated_at),
        }
    }
}

impl Entity for GeofenceGroup {
    const NAME: &'static str = "Geofence group";
    type Form = GeofenceGroupForm;

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn title(&self) -> String {
        self.geo_group.clone()
    }
}

#[derive(Debug, Clone, Default, Validate)]
pub struct GeofenceGroupForm {
    #[validate(length(min = 1, message = "Group name is required"))]
    pub geo_group: String,
    pub geofence_ids: Vec<i64>,
}

const GEOFENCE_GROUP_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("geoGroup", "Group name", FieldKind::Text).required(),
    FieldSpec::new(
        "geofenceIds",
        "Geofences",
        FieldKind::MultiSelect {
            source: Some(OptionSource::Geofences),
        },
    ),
];

impl EntityForm for GeofenceGroupForm {
    type Entity = GeofenceGroup;

    fn fields() -> &'static [FieldSpec] {
        GEOFENCE_GROUP_FIELDS
    }

    fn from_entity(entity: &GeofenceGroup) -> Self {
        Self {
            geo_group: entity.geo_group.clone(),
            geofence_ids: entity.geofence_ids.clone(),
        }
    }

    fn build(&self, base: Option<&GeofenceGroup>) -> GeofenceGroup {
        let mut group = base.cloned().unwrap_or_default();
        group.geo_group = self.geo_group.clone();
        group.geofence_ids = self.geofence_ids.clone();
        group
    }

    fn set_field(&mut self, field: &str, value: &str) -> Result<(), FieldInputError> {
        match field {
            "geoGroup" => self.geo_group = value.trim().to_string(),
            "geofenceIds" => self.geofence_ids = parse_id_list(field, value)?,
            _ => return Err(FieldInputError::UnknownField(field.to_string())),
        }
        Ok(())
    }

    fn add_value(&mut self, field: &str, value: &str) -> Result<(), FieldInputError> {
        match field {
            "geofenceIds" => add_unique(&mut self.geofence_ids, parse_id(field, value)?),
            "geoGroup" => return Err(FieldInputError::NotMultiSelect(field.to_string())),
            _ => return Err(FieldInputError::UnknownField(field.to_string())),
        }
        Ok(())
    }

    fn remove_value(&mut self, field: &str, value: &str) -> Result<(), FieldInputError> {
        match field {
            "geofenceIds" => remove_value(&mut self.geofence_ids, &parse_id(field, value)?),
            "geoGroup" => return Err(FieldInputError::NotMultiSelect(field.to_string())),
            _ => return Err(FieldInputError::UnknownField(field.to_string())),
        }
        Ok(())
    }

    fn display_value(&self, field: &str) -> String {
        match field {
            "geoGroup" => self.geo_group.clone(),
            "geofenceIds" => join_ids(&self.geofence_ids),
            _ => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::DrawerMode;

    #[test]
    fn test_group_name_required() {
        let errors = GeofenceGroupForm::default()
            .check(DrawerMode::Create)
            .unwrap_err();
        assert_eq!(errors.field("geoGroup"), &["Group name is required".to_string()]);
    }

    #[test]
    fn test_build_carries_timestamps() {
        let base = GeofenceGroup {
            id: Some(2),
            geo_group: "Depots".to_string(),
            geofence_ids: vec![10],
            created_at: Some(Utc::now()),
            updated_at: None,
        };
        let mut form = GeofenceGroupForm::from_entity(&base);
        form.set_field("geofenceIds", "10, 11").unwrap();
        let group = form.build(Some(&base));
        assert_eq!(group.geofence_ids, vec![10, 11]);
        assert_eq!(group.created_at, base.created_at);
    }

    #[test]
    fn test_search_by_name() {
        let group = GeofenceGroup {
            id: Some(2),
            geo_group: "Depots".to_string(),
            ..GeofenceGroup::default()
        };
        assert!(crate::listing::matches_query(&group, "depot"));
        assert!(!crate::listing::matches_query(&group, "yard"));
    }
}
