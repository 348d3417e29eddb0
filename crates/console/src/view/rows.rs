//! Table cells and detail rows of each entity.

use chrono::{DateTime, Utc};
use domain::forms::input::{join_ids, yes_no};
use domain::models::{
    Alarm, AlarmSortField, CustomerGroup, CustomerGroupSortField, Entity, GeofenceGroup,
    GeofenceGroupSortField, User, UserSortField, VehicleGroup, VehicleGroupSortField,
};

/// An entity that can be shown in a table.
///
/// Columns are the entity's sort columns, in order.
pub trait TableRow: Entity {
    fn cell(&self, column: Self::SortField) -> String;

    /// Label/value pairs shown when the row is expanded.
    fn details(&self) -> Vec<(&'static str, String)>;
}

fn id_cell(id: Option<i64>) -> String {
    id.map(|id| id.to_string()).unwrap_or_default()
}

fn timestamp(value: Option<DateTime<Utc>>) -> String {
    value
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn list_or_dash(values: &[String]) -> String {
    if values.is_empty() {
        "-".to_string()
    } else {
        values.join(", ")
    }
}

fn ids_or_dash(ids: &[i64]) -> String {
    if ids.is_empty() {
        "-".to_string()
    } else {
        join_ids(ids)
    }
}

impl TableRow for User {
    fn cell(&self, column: UserSortField) -> String {
        match column {
            UserSortField::Id => id_cell(self.id),
            UserSortField::Name => self.name.clone(),
            UserSortField::Username => self.username.clone(),
            UserSortField::Email => self.email.clone(),
            UserSortField::Role => self.role.clone(),
            UserSortField::Active => yes_no(self.active).to_string(),
        }
    }

    fn details(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Phone", self.phone.clone().unwrap_or_else(|| "-".to_string())),
            ("Tag", self.tag.clone().unwrap_or_else(|| "-".to_string())),
            ("User types", list_or_dash(&self.user_types)),
            ("Vehicle groups", list_or_dash(&self.vehicle_groups)),
            ("Geofence groups", list_or_dash(&self.geofence_groups)),
            ("Customer groups", list_or_dash(&self.customer_groups)),
        ]
    }
}

impl TableRow for CustomerGroup {
    fn cell(&self, column: CustomerGroupSortField) -> String {
        match column {
            CustomerGroupSortField::Id => id_cell(self.id),
            CustomerGroupSortField::Name => self.group_name.clone(),
            CustomerGroupSortField::Customers => self.customer_ids.len().to_string(),
            CustomerGroupSortField::CreatedAt => timestamp(self.created_at),
            CustomerGroupSortField::UpdatedAt => timestamp(self.updated_at),
        }
    }

    fn details(&self) -> Vec<(&'static str, String)> {
        vec![("Customer ids", ids_or_dash(&self.customer_ids))]
    }
}

impl TableRow for GeofenceGroup {
    fn cell(&self, column: GeofenceGroupSortField) -> String {
        match column {
            GeofenceGroupSortField::Id => id_cell(self.id),
            GeofenceGroupSortField::Name => self.geo_group.clone(),
            GeofenceGroupSortField::Geofences => self.geofence_ids.len().to_string(),
            GeofenceGroupSortField::CreatedAt => timestamp(self.created_at),
            GeofenceGroupSortField::UpdatedAt => timestamp(self.updated_at),
        }
    }

    fn details(&self) -> Vec<(&'static str, String)> {
        vec![("Geofence ids", ids_or_dash(&self.geofence_ids))]
    }
}

impl TableRow for VehicleGroup {
    fn cell(&self, column: VehicleGroupSortField) -> String {
        match column {
            VehicleGroupSortField::Id => id_cell(self.id),
            VehicleGroupSortField::Name => self.name.clone(),
            VehicleGroupSortField::Description => self.description.clone().unwrap_or_default(),
            VehicleGroupSortField::Vehicles => self.vehicle_ids.len().to_string(),
            VehicleGroupSortField::CreatedAt => timestamp(self.created_at),
        }
    }

    fn details(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Vehicle ids", ids_or_dash(&self.vehicle_ids)),
            ("Updated", timestamp(self.updated_at)),
        ]
    }
}

impl TableRow for Alarm {
    fn cell(&self, column: AlarmSortField) -> String {
        match column {
            AlarmSortField::Id => id_cell(self.id),
            AlarmSortField::Type => self.alarm_type.label().to_string(),
            AlarmSortField::Severity => self.severity.to_string(),
            AlarmSortField::Threshold => match (self.threshold, self.alarm_type.threshold_unit()) {
                (Some(value), Some(unit)) => format!("{} {}", value, unit),
                (Some(value), None) => value.to_string(),
                (None, _) => "-".to_string(),
            },
            AlarmSortField::Status => if self.status { "on" } else { "off" }.to_string(),
            AlarmSortField::CreatedAt => timestamp(self.created_at),
        }
    }

    fn details(&self) -> Vec<(&'static str, String)> {
        let mut details = vec![
            (
                "Description",
                self.description.clone().unwrap_or_else(|| "-".to_string()),
            ),
            ("Active trip only", yes_no(self.active_trip).to_string()),
            ("Vehicle groups", ids_or_dash(&self.vehicle_group_ids)),
        ];
        if self.alarm_type.is_geofence() {
            details.push(("On entry", yes_no(self.geofence_in).to_string()));
            details.push(("On exit", yes_no(self.geofence_out).to_string()));
            details.push(("Geofence groups", ids_or_dash(&self.geofence_group_ids)));
        }
        details
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::models::{AlarmType, Severity};

    #[test]
    fn test_alarm_threshold_cell_has_unit() {
        let alarm = Alarm {
            alarm_type: AlarmType::Overspeed,
            threshold: Some(90.0),
            ..Alarm::default()
        };
        assert_eq!(alarm.cell(AlarmSortField::Threshold), "90 km/h");
        assert_eq!(alarm.cell(AlarmSortField::Severity), "medium");
    }

    #[test]
    fn test_geofence_details_only_for_geofence_alarms() {
        let alarm = Alarm {
            alarm_type: AlarmType::Geofence,
            severity: Severity::Low,
            geofence_in: true,
            geofence_group_ids: vec![3],
            ..Alarm::default()
        };
        assert!(alarm.details().iter().any(|(label, _)| *label == "On entry"));

        let alarm = Alarm {
            alarm_type: AlarmType::PowerCut,
            ..alarm
        };
        assert!(!alarm.details().iter().any(|(label, _)| *label == "On entry"));
    }

    #[test]
    fn test_user_details_never_include_password() {
        let user = User {
            password: Some("secret1".to_string()),
            ..User::default()
        };
        assert!(user
            .details()
            .iter()
            .all(|(label, value)| *label != "Password" && value != "secret1"));
    }
}
