pub mod action_item_handlers;
pub mod auth_handlers;
pub mod dashboard;
pub mod feature_handlers;
pub mod meeting_handlers;
pub mod profile_handlers;
pub mod room_handlers;
pub mod user_handlers;

use serde::Deserialize;

/// `?page=N` on the admin tables. Filters are read by a second `Query`
/// extractor over the same query string.
#[derive(Debug, Deserialize)]
pub struct PageParam {
    pub page: Option<u32>,
}

impl PageParam {
    pub fn number(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }
}
