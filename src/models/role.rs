use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Portal roles. The API sends these as plain strings; anything outside this
/// set is treated as "no role" by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Employee,
    Guest,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Employee, Role::Guest];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Employee => "Employee",
            Role::Guest => "Guest",
        }
    }

    /// Lenient parse used for session and API payloads.
    pub fn parse(raw: &str) -> Option<Role> {
        raw.parse().ok()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Admin" => Ok(Role::Admin),
            "Employee" => Ok(Role::Employee),
            "Guest" => Ok(Role::Guest),
            other => Err(format!("unknown role '{other}'")),
        }
    }
}

/// Option for role `<select>` elements.
#[derive(Debug, Clone)]
pub struct RoleOption {
    pub value: &'static str,
    pub selected: bool,
}

pub fn options(selected: &str) -> Vec<RoleOption> {
    Role::ALL
        .iter()
        .map(|r| RoleOption { value: r.as_str(), selected: r.as_str() == selected })
        .collect()
}
