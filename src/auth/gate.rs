//! Session validity and role-based navigation.
//!
//! These functions decide, from already-loaded session data, whether a
//! protected page may be served and which navigation entries a role sees.
//! They never touch the request or the cookie store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::role::Role;

/// Route of the sign-in page; every failed gate check lands here.
pub const SIGN_IN_ROUTE: &str = "/signin";
pub const PROFILE_ROUTE: &str = "/profile";

/// Minimal user record kept in the session cookie.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: String,
}

impl SessionUser {
    pub fn role(&self) -> Option<Role> {
        Role::parse(&self.role)
    }
}

/// The three persisted session fields, each possibly missing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionData {
    pub token: Option<String>,
    pub token_exp: Option<DateTime<Utc>>,
    pub user: Option<SessionUser>,
}

impl SessionData {
    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().and_then(SessionUser::role)
    }
}

/// True iff token, user and expiry are all present and `now` is strictly
/// before the expiry. A missing expiry counts as expired.
pub fn is_session_valid(session: &SessionData, now: DateTime<Utc>) -> bool {
    let has_token = session.token.as_deref().is_some_and(|t| !t.is_empty());
    match (has_token, &session.user, session.token_exp) {
        (true, Some(_), Some(exp)) => now < exp,
        _ => false,
    }
}

/// Where a freshly signed-in user is sent.
pub fn landing_route(role: Option<Role>) -> &'static str {
    match role {
        Some(Role::Admin) => "/admin/dashboard",
        Some(Role::Employee) | Some(Role::Guest) => "/dashboard",
        None => PROFILE_ROUTE,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuEntry {
    pub label: &'static str,
    pub route: &'static str,
}

const ADMIN_MENU: &[MenuEntry] = &[
    MenuEntry { label: "Dashboard", route: "/admin/dashboard" },
    MenuEntry { label: "Features", route: "/admin/features" },
    MenuEntry { label: "Rooms", route: "/admin/rooms" },
    MenuEntry { label: "Users", route: "/admin/users" },
];

const EMPLOYEE_MENU: &[MenuEntry] = &[
    MenuEntry { label: "Dashboard", route: "/dashboard" },
    MenuEntry { label: "Meetings", route: "/meetings" },
    MenuEntry { label: "Meetings Calendar", route: "/meetings/calendar" },
    MenuEntry { label: "Profile", route: PROFILE_ROUTE },
    MenuEntry { label: "Action Items", route: "/action-items" },
];

/// Menu entries for a role. Unknown or missing roles get nothing.
pub fn menu_for(role: Option<Role>) -> &'static [MenuEntry] {
    match role {
        Some(Role::Admin) => ADMIN_MENU,
        Some(Role::Employee) | Some(Role::Guest) => EMPLOYEE_MENU,
        None => &[],
    }
}

/// Sidebar entries: the role menu, with Profile appended when missing.
pub fn sidebar_for(role: Option<Role>) -> Vec<MenuEntry> {
    let mut entries = menu_for(role).to_vec();
    if !entries.iter().any(|e| e.route == PROFILE_ROUTE) {
        entries.push(MenuEntry { label: "Profile", route: PROFILE_ROUTE });
    }
    entries
}

/// Whether `role` may open pages under `/admin`.
pub fn can_administer(role: Option<Role>) -> bool {
    matches!(role, Some(Role::Admin))
}
