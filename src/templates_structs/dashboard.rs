use askama::Template;

use super::PageContext;
use crate::models::meeting::Meeting;
use crate::models::minutes::{ActionItem, ActionItemTally};

#[derive(Template)]
#[template(path = "dashboard_admin.html")]
pub struct AdminDashboardTemplate {
    pub ctx: PageContext,
    pub greeting: String,
    pub user_count: u64,
    pub room_count: u64,
    pub feature_count: u64,
}

/// Meetings that start on the same day.
pub struct DayGroup {
    pub label: String,
    pub meetings: Vec<Meeting>,
}

#[derive(Template)]
#[template(path = "dashboard_employee.html")]
pub struct EmployeeDashboardTemplate {
    pub ctx: PageContext,
    pub greeting: String,
    pub meeting_count: usize,
    pub tally: ActionItemTally,
    pub days: Vec<DayGroup>,
    pub action_items: Vec<ActionItem>,
}
