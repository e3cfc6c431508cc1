use serde::{Deserialize, Serialize};

use super::role::Role;

/// User record as returned by the booking API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub profile_picture: Option<String>,
}

impl User {
    pub fn role(&self) -> Option<Role> {
        Role::parse(&self.role)
    }

    /// "Name (email)" label used in selects.
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.email)
    }

    pub fn initial(&self) -> String {
        self.name.chars().next().unwrap_or('?').to_uppercase().to_string()
    }
}

/// Search filters for the admin user table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserFilter {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: String,
}

/// Payload for `POST /User`.
#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub role: String,
    pub password: String,
    pub password_confirmation: String,
}

/// Payload for `POST /User/{id}` (sent as multipart with `_method=PUT`).
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub name: String,
    pub email: String,
    pub role: String,
    pub password: Option<String>,
    pub password_confirmation: Option<String>,
    pub profile_picture: Option<Upload>,
}

/// An in-memory file forwarded to the API.
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Form data from the admin create/edit user forms.
#[derive(Debug, Deserialize)]
pub struct UserForm {
    pub name: String,
    pub email: String,
    pub role: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub password_confirmation: String,
    pub csrf_token: String,
}
