//! Create/edit forms ("drawers") and their validation.

pub mod drawer;
pub mod input;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

pub use drawer::{Drawer, DrawerMode, Submission};

/// Where a multi-select field gets its options from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionSource {
    Customers,
    Geofences,
    Vehicles,
    CustomerGroups,
    GeofenceGroups,
    VehicleGroups,
}

impl OptionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionSource::Customers => "customers",
            OptionSource::Geofences => "geofences",
            OptionSource::Vehicles => "vehicles",
            OptionSource::CustomerGroups => "customer_groups",
            OptionSource::GeofenceGroups => "geofence_groups",
            OptionSource::VehicleGroups => "vehicle_groups",
        }
    }
}

impl fmt::Display for OptionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One selectable entry of a multi-select.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub id: i64,
    pub name: String,
}

/// How a field is edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Never echoed back when rendered.
    Secret,
    Flag,
    Number,
    /// One of a fixed set of codes.
    Choice(&'static [&'static str]),
    /// Several values; `source` supplies the options when there is one.
    MultiSelect { source: Option<OptionSource> },
}

/// Static description of a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSpec {
    pub const fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: false,
        }
    }

    pub const fn required(self) -> Self {
        Self {
            required: true,
            ..self
        }
    }
}

/// Error raised while typing a value into a field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldInputError {
    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("{field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Field {0} does not hold multiple values")]
    NotMultiSelect(String),
}

impl FieldInputError {
    pub fn invalid(field: &str, message: impl Into<String>) -> Self {
        FieldInputError::InvalidValue {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Validation messages keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    fields: BTreeMap<String, Vec<String>>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    /// Messages for one field.
    pub fn field(&self, field: &str) -> &[String] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn clear_field(&mut self, field: &str) {
        self.fields.remove(field);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields
            .iter()
            .map(|(field, messages)| (field.as_str(), messages.as_slice()))
    }

    /// First message overall, for a one-line summary.
    pub fn first_message(&self) -> Option<&str> {
        self.fields
            .values()
            .flat_map(|messages| messages.iter())
            .map(String::as_str)
            .next()
    }

    pub fn merge(&mut self, other: FormErrors) {
        for (field, messages) in other.fields {
            for message in messages {
                self.add(field.clone(), message);
            }
        }
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(field, messages)| format!("{}: {}", field, messages.join(", ")))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl From<ValidationErrors> for FormErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut form_errors = FormErrors::new();
        for (field, field_errors) in errors.field_errors() {
            for error in field_errors {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field));
                form_errors.add(camel_case(&field.to_string()), message);
            }
        }
        form_errors
    }
}

/// Converts a Rust field name (`group_name`) to the form's field name
/// (`groupName`).
pub fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Editable state of one entity type.
///
/// Field names are the entity's camelCase names.
pub trait EntityForm: Default + Clone + fmt::Debug + Validate + Send + Sync + 'static {
    type Entity: Clone + fmt::Debug + Send + Sync + 'static;

    /// Fields in display order.
    fn fields() -> &'static [FieldSpec];

    /// Pre-fills the form from an existing record.
    fn from_entity(entity: &Self::Entity) -> Self;

    /// Builds the record to save. `base` is the record being edited; fields
    /// the form does not cover are carried over from it.
    fn build(&self, base: Option<&Self::Entity>) -> Self::Entity;

    fn set_field(&mut self, field: &str, value: &str) -> Result<(), FieldInputError>;

    fn add_value(&mut self, field: &str, _value: &str) -> Result<(), FieldInputError> {
        Err(FieldInputError::NotMultiSelect(field.to_string()))
    }

    fn remove_value(&mut self, field: &str, _value: &str) -> Result<(), FieldInputError> {
        Err(FieldInputError::NotMultiSelect(field.to_string()))
    }

    /// Current value of a field, formatted for display.
    fn display_value(&self, field: &str) -> String;

    /// Rules spanning several fields or depending on the drawer mode.
    fn extra_checks(&self, _mode: DrawerMode) -> FormErrors {
        FormErrors::new()
    }

    /// Runs field validation plus the cross-field rules.
    fn check(&self, mode: DrawerMode) -> Result<(), FormErrors> {
        let mut errors = match self.validate() {
            Ok(()) => FormErrors::new(),
            Err(e) => FormErrors::from(e),
        };
        errors.merge(self.extra_checks(mode));
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn field_spec(name: &str) -> Option<&'static FieldSpec> {
        Self::fields().iter().find(|spec| spec.name == name)
    }
}
