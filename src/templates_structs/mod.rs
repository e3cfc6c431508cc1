// Template context structures for Askama templates, organized by domain.

use crate::auth::session::{Authenticated, PortalSession};
use crate::models::nav_item::{self, NavSidebarItem};

pub const APP_NAME: &str = "Room Manager";

/// Common context shared by all authenticated pages.
/// Templates access these as `ctx.user_name`, `ctx.sidebar_items`, etc.
pub struct PageContext {
    pub user_name: String,
    pub role_label: String,
    pub avatar_initial: String,
    pub flash: Option<String>,
    pub sidebar_items: Vec<NavSidebarItem>,
    pub app_name: String,
    pub csrf_token: String,
}

impl PageContext {
    pub fn build(session: &PortalSession, auth: &Authenticated, current_path: &str) -> Self {
        let user_name = auth.user.name.clone();
        let avatar_initial = user_name.chars().next().unwrap_or('?').to_uppercase().to_string();
        let role_label = auth
            .role()
            .map(|r| r.as_str().to_string())
            .unwrap_or_else(|| "No role".to_string());
        Self {
            user_name,
            role_label,
            avatar_initial,
            flash: session.take_flash(),
            sidebar_items: nav_item::find_navigation(auth.role(), current_path),
            app_name: APP_NAME.to_string(),
            csrf_token: session.csrf_token(),
        }
    }
}

/// Previous/next links for a paginated table, carrying the active filter.
pub struct Pager {
    pub current_page: u32,
    pub last_page: u32,
    pub total: u64,
    pub prev_url: Option<String>,
    pub next_url: Option<String>,
}

impl Pager {
    pub fn new<T, F: serde::Serialize>(
        page: &crate::api::Paginated<T>,
        base: &str,
        filter: &F,
    ) -> Self {
        let query = serde_urlencoded::to_string(filter).unwrap_or_default();
        let link = |n: u32| {
            if query.is_empty() {
                format!("{base}?page={n}")
            } else {
                format!("{base}?{query}&page={n}")
            }
        };
        Self {
            current_page: page.current_page,
            last_page: page.last_page.max(1),
            total: page.total,
            prev_url: page.has_previous().then(|| link(page.current_page - 1)),
            next_url: page.has_next().then(|| link(page.current_page + 1)),
        }
    }
}

/// JSON for embedding inside a `<script>` element.
pub fn script_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|_| "null".to_string())
        .replace('<', "\\u003c")
}

mod admin;
mod common;
mod dashboard;
mod meeting;
mod profile;

pub use self::admin::{
    FeatureFormTemplate, FeatureListTemplate, RoomFormTemplate, RoomListTemplate,
    UserFormTemplate, UserListTemplate, FeatureOption,
};
pub use self::common::LoginTemplate;
pub use self::dashboard::{AdminDashboardTemplate, DayGroup, EmployeeDashboardTemplate};
pub use self::meeting::{
    ActionItemsTemplate, CalendarTemplate, MeetingDetailTemplate, MeetingFormTemplate,
    MeetingFormValues, MeetingsListTemplate,
};
pub use self::profile::ProfileTemplate;
