use askama::Template;

use super::{PageContext, Pager};
use crate::models::role::RoleOption;
use crate::models::room::{Feature, FeatureFilter, Room, RoomFilter};
use crate::models::user::{User, UserFilter};

#[derive(Template)]
#[template(path = "users/list.html")]
pub struct UserListTemplate {
    pub ctx: PageContext,
    pub users: Vec<User>,
    pub filter: UserFilter,
    pub role_options: Vec<RoleOption>,
    pub pager: Pager,
}

#[derive(Template)]
#[template(path = "users/form.html")]
pub struct UserFormTemplate {
    pub ctx: PageContext,
    pub form_action: String,
    pub form_title: String,
    pub name: String,
    pub email: String,
    pub role_options: Vec<RoleOption>,
    /// Edit forms treat an empty password as "unchanged".
    pub is_edit: bool,
    pub errors: Vec<String>,
}

#[derive(Template)]
#[template(path = "rooms/list.html")]
pub struct RoomListTemplate {
    pub ctx: PageContext,
    pub rooms: Vec<Room>,
    pub filter: RoomFilter,
    pub pager: Pager,
}

/// Checkbox row on the room form.
pub struct FeatureOption {
    pub id: i64,
    pub title: String,
    pub checked: bool,
}

impl FeatureOption {
    pub fn list(features: Vec<Feature>, selected: &[i64]) -> Vec<Self> {
        features
            .into_iter()
            .map(|f| FeatureOption { checked: selected.contains(&f.id), id: f.id, title: f.title })
            .collect()
    }
}

#[derive(Template)]
#[template(path = "rooms/form.html")]
pub struct RoomFormTemplate {
    pub ctx: PageContext,
    pub form_action: String,
    pub form_title: String,
    pub roomname: String,
    pub floor: String,
    pub capacity: String,
    pub features: Vec<FeatureOption>,
    pub errors: Vec<String>,
}

#[derive(Template)]
#[template(path = "features/list.html")]
pub struct FeatureListTemplate {
    pub ctx: PageContext,
    pub features: Vec<Feature>,
    pub filter: FeatureFilter,
    pub pager: Pager,
}

#[derive(Template)]
#[template(path = "features/form.html")]
pub struct FeatureFormTemplate {
    pub ctx: PageContext,
    pub form_action: String,
    pub form_title: String,
    pub title: String,
    pub description: String,
    pub errors: Vec<String>,
}
