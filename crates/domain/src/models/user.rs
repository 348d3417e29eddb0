//! Platform user domain models.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::Entity;
use crate::forms::input::{add_unique, parse_flag, parse_name_list, remove_value, yes_no};
use crate::forms::{
    DrawerMode, EntityForm, FieldInputError, FieldKind, FieldSpec, FormErrors, OptionSource,
};
use crate::listing::{Listable, SortColumn, SortKey};

/// A platform user.
///
/// Group memberships are referenced by name, not id.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Option<i64>,
    pub name: String,
    pub username: String,
    pub email: String,
    pub phone: Option<String>,
    /// Write-only. Never read back from the backend and never rendered.
    #[serde(skip_serializing, default)]
    pub password: Option<String>,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub role: String,
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

/// Sortable columns of the user table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserSortField {
    Id,
    Name,
    Username,
    Email,
    Role,
    Active,
}

impl SortColumn for UserSortField {
    fn all() -> &'static [Self] {
        &[
            UserSortField::Id,
            UserSortField::Name,
            UserSortField::Username,
            UserSortField::Email,
            UserSortField::Role,
            UserSortField::Active,
        ]
    }

    fn key(&self) -> &'static str {
        match self {
            UserSortField::Id => "id",
            UserSortField::Name => "name",
            UserSortField::Username => "username",
            UserSortField::Email => "email",
            UserSortField::Role => "role",
            UserSortField::Active => "active",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            UserSortField::Id => "ID",
            UserSortField::Name => "Name",
            UserSortField::Username => "Username",
            UserSortField::Email => "Email",
            UserSortField::Role => "Role",
            UserSortField::Active => "Active",
        }
    }
}

impl Listable for User {
    type SortField = UserSortField;

    fn search_fields(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.username.clone(),
            self.email.clone(),
            self.id.map(|id| id.to_string()).unwrap_or_default(),
        ]
    }

    fn sort_key(&self, field: UserSortField) -> SortKey {
        match field {
            UserSortField::Id => SortKey::Integer(self.id.unwrap_or_default()),
            UserSortField::Name => SortKey::text(&self.name),
            UserSortField::Username => SortKey::text(&self.username),
            UserSortField::Email => SortKey::text(&self.email),
            UserSortField::Role => SortKey::text(&self.role),
            UserSortField::Active => SortKey::Flag(self.active),
        }
    }
}

impl Entity for User {
    const NAME: &'static str = "User";
    type Form = UserForm;

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn title(&self) -> String {
        format!("{} ({})", self.name, self.username)
    }
}

/// Drawer form for users.
#[derive(Debug, Clone, Validate)]
pub struct UserForm {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(
        length(min = 1, message = "Email is required"),
        custom(function = "validate_email_if_present")
    )]
    pub email: String,
    #[validate(custom(function = "shared::validation::validate_phone"))]
    pub phone: String,
    #[validate(custom(function = "shared::validation::validate_password"))]
    pub password: String,
    pub active: bool,
    pub role: String,
    pub tag: String,
    pub user_types: Vec<String>,
    pub vehicle_groups: Vec<String>,
    pub geofence_groups: Vec<String>,
    pub customer_groups: Vec<String>,
}

impl Default for UserForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            username: String::new(),
            email: String::new(),
            phone: String::new(),
            password: String::new(),
            active: true,
            role: String::new(),
            tag: String::new(),
            user_types: Vec::new(),
            vehicle_groups: Vec::new(),
            geofence_groups: Vec::new(),
            customer_groups: Vec::new(),
        }
    }
}

/// Blank email is reported by the length rule alone.
fn validate_email_if_present(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Ok(());
    }
    shared::validation::validate_email_format(email)
}

const USER_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("name", "Name", FieldKind::Text).required(),
    FieldSpec::new("username", "Username", FieldKind::Text).required(),
    FieldSpec::new("email", "Email", FieldKind::Text).required(),
    FieldSpec::new("phone", "Phone", FieldKind::Text),
    FieldSpec::new("password", "Password", FieldKind::Secret),
    FieldSpec::new("active", "Active", FieldKind::Flag),
    FieldSpec::new("role", "Role", FieldKind::Text),
    FieldSpec::new("tag", "Tag", FieldKind::Text),
    FieldSpec::new("userTypes", "User types", FieldKind::MultiSelect { source: None }),
    FieldSpec::new(
        "vehicleGroups",
        "Vehicle groups",
        FieldKind::MultiSelect {
            source: Some(OptionSource::VehicleGroups),
        },
    ),
    FieldSpec::new(
        "geofenceGroups",
        "Geofence groups",
        FieldKind::MultiSelect {
            source: Some(OptionSource::GeofenceGroups),
        },
    ),
    FieldSpec::new(
        "customerGroups",
        "Customer groups",
        FieldKind::MultiSelect {
            source: Some(OptionSource::CustomerGroups),
        },
    ),
];

impl UserForm {
    fn names_mut(&mut self, field: &str) -> Result<&mut Vec<String>, FieldInputError> {
        match field {
            "userTypes" => Ok(&mut self.user_types),
            "vehicleGroups" => Ok(&mut self.vehicle_groups),
            "geofenceGroups" => Ok(&mut self.geofence_groups),
            "customerGroups" => Ok(&mut self.customer_groups),
            _ if Self::field_spec(field).is_some() => {
                Err(FieldInputError::NotMultiSelect(field.to_string()))
            }
            _ => Err(FieldInputError::UnknownField(field.to_string())),
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

impl EntityForm for UserForm {
    type Entity = User;

    fn fields() -> &'static [FieldSpec] {
        USER_FIELDS
    }

    fn from_entity(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            phone: user.phone.clone().unwrap_or_default(),
            password: String::new(),
            active: user.active,
            role: user.role.clone(),
            tag: user.tag.clone().unwrap_or_default(),
            user_types: user.user_types.clone(),
            vehicle_groups: user.vehicle_groups.clone(),
            geofence_groups: user.geofence_groups.clone(),
            customer_groups: user.customer_groups.clone(),
        }
    }

    fn build(&self, base: Option<&User>) -> User {
        let mut user = base.cloned().unwrap_or_default();
        user.name = self.name.clone();
        user.username = self.username.clone();
        user.email = self.email.clone();
        user.phone = non_empty(&self.phone);
        // Blank password on edit keeps the current one.
        user.password = non_empty(&self.password);
        user.active = self.active;
        user.role = self.role.clone();
        user.tag = non_empty(&self.tag);
        user.user_types = self.user_types.clone();
        user.vehicle_groups = self.vehicle_groups.clone();
        user.geofence_groups = self.geofence_groups.clone();
        user.customer_groups = self.customer_groups.clone();
        user
    }

    fn set_field(&mut self, field: &str, value: &str) -> Result<(), FieldInputError> {
        let trimmed = value.trim().to_string();
        match field {
            "name" => self.name = trimmed,
            "username" => self.username = trimmed,
            "email" => self.email = trimmed,
            "phone" => self.phone = trimmed,
            // Passwords are taken verbatim.
            "password" => self.password = value.to_string(),
            "active" => self.active = parse_flag(field, value)?,
            "role" => self.role = trimmed,
            "tag" => self.tag = trimmed,
            _ => *self.names_mut(field)? = parse_name_list(value),
        }
        Ok(())
    }

    fn add_value(&mut self, field: &str, value: &str) -> Result<(), FieldInputError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(FieldInputError::invalid(field, "value is empty"));
        }
        add_unique(self.names_mut(field)?, value.to_string());
        Ok(())
    }

    fn remove_value(&mut self, field: &str, value: &str) -> Result<(), FieldInputError> {
        remove_value(self.names_mut(field)?, &value.trim().to_string());
        Ok(())
    }

    fn display_value(&self, field: &str) -> String {
        match field {
            "name" => self.name.clone(),
            "username" => self.username.clone(),
            "email" => self.email.clone(),
            "phone" => self.phone.clone(),
            "password" if self.password.is_empty() => String::new(),
            "password" => "********".to_string(),
            "active" => yes_no(self.active).to_string(),
            "role" => self.role.clone(),
            "tag" => self.tag.clone(),
            "userTypes" => self.user_types.join(", "),
            "vehicleGroups" => self.vehicle_groups.join(", "),
            "geofenceGroups" => self.geofence_groups.join(", "),
            "customerGroups" => self.customer_groups.join(", "),
            _ => String::new(),
        }
    }

    fn extra_checks(&self, mode: DrawerMode) -> FormErrors {
        let mut errors = FormErrors::new();
        if mode.is_create() && self.password.is_empty() {
            errors.add("password", "Password is required");
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::Drawer;
    use fake::faker::internet::en::{SafeEmail, Username};
    use fake::faker::name::en::Name;
    use fake::Fake;

    fn filled_form() -> UserForm {
        UserForm {
            name: Name().fake(),
            username: Username().fake(),
            email: SafeEmail().fake(),
            password: "secret1".to_string(),
            ..UserForm::default()
        }
    }

    fn john() -> User {
        User {
            id: Some(7),
            name: "John Doe".to_string(),
            username: "jdoe".to_string(),
            email: "john@example.com".to_string(),
            phone: Some("+1 555 0100".to_string()),
            password: None,
            active: true,
            role: "admin".to_string(),
            tag: None,
            user_types: vec!["dispatcher".to_string()],
            vehicle_groups: vec!["North".to_string()],
            geofence_groups: Vec::new(),
            customer_groups: vec!["VIP Customers".to_string()],
        }
    }

    #[test]
    fn test_valid_form_passes() {
        assert!(filled_form().check(DrawerMode::Create).is_ok());
    }

    #[test]
    fn test_required_fields() {
        let errors = UserForm::default().check(DrawerMode::Create).unwrap_err();
        assert_eq!(errors.field("name"), &["Name is required".to_string()]);
        assert_eq!(errors.field("username"), &["Username is required".to_string()]);
        assert_eq!(errors.field("email"), &["Email is required".to_string()]);
        assert_eq!(errors.field("password"), &["Password is required".to_string()]);
    }

    #[test]
    fn test_invalid_email_rejected() {
        let form = UserForm {
            email: "not-an-email".to_string(),
            ..filled_form()
        };
        let errors = form.check(DrawerMode::Create).unwrap_err();
        assert_eq!(
            errors.field("email"),
            &["Enter a valid email address".to_string()]
        );
    }

    #[test]
    fn test_invalid_phone_rejected() {
        let form = UserForm {
            phone: "call me".to_string(),
            ..filled_form()
        };
        let errors = form.check(DrawerMode::Create).unwrap_err();
        assert_eq!(errors.field("phone").len(), 1);
    }

    #[test]
    fn test_short_password_rejected() {
        let form = UserForm {
            password: "abc".to_string(),
            ..filled_form()
        };
        let errors = form.check(DrawerMode::Create).unwrap_err();
        assert_eq!(
            errors.field("password"),
            &["Password must be at least 6 characters".to_string()]
        );
    }

    #[test]
    fn test_password_optional_on_edit() {
        let form = UserForm::from_entity(&john());
        assert!(form.password.is_empty());
        assert!(form.check(DrawerMode::Edit(7)).is_ok());
        assert!(form.build(Some(&john())).password.is_none());
    }

    #[test]
    fn test_password_never_serialized() {
        let mut user = john();
        user.password = Some("secret1".to_string());
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("secret1"));
        assert!(!json.contains("password"));
    }

    #[test]
    fn test_password_masked_in_display() {
        let mut form = filled_form();
        assert_eq!(form.display_value("password"), "********");
        form.password.clear();
        assert_eq!(form.display_value("password"), "");
    }

    #[test]
    fn test_group_names_add_and_remove() {
        let mut drawer: Drawer<UserForm> = Drawer::new();
        drawer.open_edit(7, &john());
        drawer.add_value("vehicleGroups", "South").unwrap();
        drawer.add_value("vehicleGroups", "North").unwrap();
        drawer.remove_value("customerGroups", "VIP Customers").unwrap();

        let user = drawer.submit().unwrap().entity;
        assert_eq!(user.vehicle_groups, vec!["North".to_string(), "South".to_string()]);
        assert!(user.customer_groups.is_empty());
        assert_eq!(user.id, Some(7));
    }

    #[test]
    fn test_scalar_field_is_not_multi_select() {
        let mut form = UserForm::default();
        assert_eq!(
            form.add_value("email", "x").unwrap_err(),
            FieldInputError::NotMultiSelect("email".to_string())
        );
        assert_eq!(
            form.set_field("nickname", "x").unwrap_err(),
            FieldInputError::UnknownField("nickname".to_string())
        );
    }

    #[test]
    fn test_set_flag_and_trimmed_text() {
        let mut form = UserForm::default();
        form.set_field("active", "no").unwrap();
        form.set_field("name", "  Jane  ").unwrap();
        assert!(!form.active);
        assert_eq!(form.name, "Jane");
        assert!(form.set_field("active", "perhaps").is_err());
    }

    #[test]
    fn test_search_fields_cover_name_username_email_id() {
        let fields = john().search_fields();
        assert_eq!(
            fields,
            vec![
                "John Doe".to_string(),
                "jdoe".to_string(),
                "john@example.com".to_string(),
                "7".to_string()
            ]
        );
    }

    #[test]
    fn test_deserializes_camel_case() {
        let user: User = serde_json::from_value(serde_json::json!({
            "id": 3,
            "name": "Jane",
            "username": "jane",
            "email": "jane@example.com",
            "phone": null,
            "active": false,
            "role": "user",
            "tag": "night",
            "vehicleGroups": ["North"]
        }))
        .unwrap();
        assert_eq!(user.id, Some(3));
        assert_eq!(user.vehicle_groups, vec!["North".to_string()]);
        assert!(user.user_types.is_empty());
        assert!(user.password.is_none());
    }
}
