use chrono::NaiveDateTime;

use crate::models::role::Role;
use crate::models::timestamp;

pub const MIN_PASSWORD_LEN: usize = 6;
pub const MIN_ROOM_CAPACITY: i64 = 10;
pub const MAX_ROOM_CAPACITY: i64 = 1000;

/// Validate an email: required, max 254 chars, `local@domain.tld` shape.
pub fn validate_email(email: &str) -> Option<String> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return Some("Email is required".to_string());
    }
    if trimmed.len() > 254 {
        return Some("Email must be at most 254 characters".to_string());
    }
    let valid = match trimmed.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    };
    if !valid {
        return Some("Invalid email format".to_string());
    }
    None
}

/// Validate a required password (sign-in, user creation).
pub fn validate_password(password: &str) -> Option<String> {
    if password.is_empty() {
        return Some("Password is required".to_string());
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Some(format!("Password must be at least {MIN_PASSWORD_LEN} characters"));
    }
    None
}

/// Validate an optional new password and its confirmation. Empty means
/// "keep the current password".
pub fn validate_password_change(password: &str, confirmation: &str) -> Vec<String> {
    let mut errors = vec![];
    if !password.is_empty() {
        errors.extend(validate_password(password));
    }
    if password != confirmation {
        errors.push("Passwords must match".to_string());
    }
    errors
}

pub fn validate_role(role: &str) -> Option<String> {
    if role.trim().is_empty() {
        return Some("Role is required".to_string());
    }
    if Role::parse(role).is_none() {
        return Some("Select a valid role".to_string());
    }
    None
}

/// Validate a required text field with a max length.
pub fn validate_required(value: &str, field_name: &str, max_len: usize) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some(format!("{field_name} is required"));
    }
    if trimmed.chars().count() > max_len {
        return Some(format!("{field_name} must be at most {max_len} characters"));
    }
    None
}

/// Parse a required integer field.
pub fn parse_integer(value: &str, field_name: &str) -> Result<i64, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(format!("{field_name} is required"));
    }
    trimmed
        .parse::<i64>()
        .map_err(|_| format!("{field_name} must be an integer"))
}

/// Room capacity: integer within the bookable range.
pub fn parse_capacity(value: &str) -> Result<i64, String> {
    let capacity = parse_integer(value, "Capacity")?;
    if capacity < MIN_ROOM_CAPACITY {
        return Err(format!("Minimum capacity is {MIN_ROOM_CAPACITY}"));
    }
    if capacity > MAX_ROOM_CAPACITY {
        return Err(format!("Maximum capacity is {MAX_ROOM_CAPACITY}"));
    }
    Ok(capacity)
}

/// Parse a `datetime-local` style timestamp.
pub fn parse_timestamp(value: &str, field_name: &str) -> Result<NaiveDateTime, String> {
    if value.trim().is_empty() {
        return Err(format!("{field_name} is required"));
    }
    timestamp::parse(value).ok_or_else(|| format!("{field_name} is not a valid date and time"))
}

/// Collect the first error of each check into a list.
pub fn collect<T>(result: Result<T, String>, errors: &mut Vec<String>) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err(e) => {
            errors.push(e);
            None
        }
    }
}
