//! Parsing helpers for typed form input.

use super::FieldInputError;

/// Parses a flag value: `true/false`, `yes/no`, `on/off`, `1/0`.
pub fn parse_flag(field: &str, value: &str) -> Result<bool, FieldInputError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(FieldInputError::invalid(field, "expected yes or no")),
    }
}

/// Parses an optional number; blank input clears the value.
pub fn parse_optional_number(field: &str, value: &str) -> Result<Option<f64>, FieldInputError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse::<f64>()
        .map(Some)
        .map_err(|_| FieldInputError::invalid(field, "expected a number"))
}

/// Parses a single record id.
pub fn parse_id(field: &str, value: &str) -> Result<i64, FieldInputError> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| FieldInputError::invalid(field, format!("'{}' is not a valid id", value.trim())))
}

/// Parses a comma-separated id list. Blank input yields an empty list.
pub fn parse_id_list(field: &str, value: &str) -> Result<Vec<i64>, FieldInputError> {
    let mut ids = Vec::new();
    for part in value.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let id = parse_id(field, part)?;
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    Ok(ids)
}

/// Parses a comma-separated name list, dropping blanks and duplicates.
pub fn parse_name_list(value: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for part in value.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        if !names.iter().any(|n| n == part) {
            names.push(part.to_string());
        }
    }
    names
}

/// Adds a value to a multi-select if it is not selected yet.
pub fn add_unique<T: PartialEq>(values: &mut Vec<T>, value: T) {
    if !values.contains(&value) {
        values.push(value);
    }
}

/// Removes a value from a multi-select.
pub fn remove_value<T: PartialEq>(values: &mut Vec<T>, value: &T) {
    values.retain(|v| v != value);
}

/// Formats an id list for display.
pub fn join_ids(ids: &[i64]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Formats a flag for display.
pub fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
