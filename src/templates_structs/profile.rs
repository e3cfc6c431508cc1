use askama::Template;

use super::PageContext;
use crate::models::role::RoleOption;
use crate::models::user::User;

#[derive(Template)]
#[template(path = "profile.html")]
pub struct ProfileTemplate {
    pub ctx: PageContext,
    pub user: User,
    pub picture_url: Option<String>,
    pub role_options: Vec<RoleOption>,
    /// Only admins may change their own role.
    pub can_change_role: bool,
    pub errors: Vec<String>,
}
