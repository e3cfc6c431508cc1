use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::timestamp;
use super::user::User;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: i64,
    #[serde(rename = "fileName", default)]
    pub file_name: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionItemStatus {
    #[default]
    Pending,
    Completed,
}

impl ActionItemStatus {
    pub fn toggled(self) -> Self {
        match self {
            ActionItemStatus::Pending => ActionItemStatus::Completed,
            ActionItemStatus::Completed => ActionItemStatus::Pending,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionItemStatus::Pending => "Pending",
            ActionItemStatus::Completed => "Completed",
        }
    }
}

impl fmt::Display for ActionItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionItem {
    pub id: i64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: ActionItemStatus,
    #[serde(rename = "dueDate", default, with = "timestamp::date")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub assignee: Option<User>,
}

impl ActionItem {
    pub fn is_completed(&self) -> bool {
        self.status == ActionItemStatus::Completed
    }

    pub fn due_display(&self) -> String {
        self.due_date
            .map(|d| d.format("%b %-d, %Y").to_string())
            .unwrap_or_else(|| "No due date".to_string())
    }

    pub fn assignee_display(&self) -> String {
        self.assignee
            .as_ref()
            .map(User::label)
            .unwrap_or_else(|| "Unassigned".to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Minutes {
    pub id: i64,
    #[serde(default)]
    pub decisions: String,
    #[serde(rename = "discussedPoints", default)]
    pub discussed_points: String,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(default)]
    pub action_items: Vec<ActionItem>,
}

/// Payload for `POST /Minutes` and `PUT /Minutes/{id}`.
#[derive(Debug, Clone, Serialize)]
pub struct MinutesInput {
    pub meeting_id: i64,
    pub decisions: String,
    #[serde(rename = "discussedPoints")]
    pub discussed_points: String,
}

/// Payload for `POST /ActionItem`.
#[derive(Debug, Clone, Serialize)]
pub struct NewActionItem {
    pub description: String,
    pub status: ActionItemStatus,
    #[serde(rename = "dueDate")]
    pub due_date: String,
    #[serde(rename = "assignedTo")]
    pub assigned_to: i64,
    pub minutes_of_meeting_id: i64,
}

/// Counts shown on the employee dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionItemTally {
    pub pending: usize,
    pub completed: usize,
}

pub fn tally(items: &[ActionItem]) -> ActionItemTally {
    items.iter().fold(ActionItemTally::default(), |mut acc, item| {
        match item.status {
            ActionItemStatus::Pending => acc.pending += 1,
            ActionItemStatus::Completed => acc.completed += 1,
        }
        acc
    })
}
