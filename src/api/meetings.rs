use reqwest::{Method, multipart};
use serde::Serialize;

use super::{ApiClient, ApiError};
use crate::models::meeting::{Meeting, MeetingUpdate, NewMeeting};
use crate::models::minutes::{ActionItem, ActionItemStatus, MinutesInput, NewActionItem};
use crate::models::user::Upload;

#[derive(Debug, Serialize)]
struct ToggleRequest {
    status: ActionItemStatus,
}

impl ApiClient {
    /// Meetings the user organises or attends. A record the portal cannot
    /// read is logged and left out rather than failing the whole list.
    pub async fn user_meetings(&self, token: &str, user_id: i64) -> Result<Vec<Meeting>, ApiError> {
        self.get_each(token, &format!("User/{user_id}/meetings")).await
    }

    pub async fn user_action_items(
        &self,
        token: &str,
        user_id: i64,
    ) -> Result<Vec<ActionItem>, ApiError> {
        self.get(token, &format!("User/{user_id}/ActionItems")).await
    }

    pub async fn meeting(&self, token: &str, id: i64) -> Result<Meeting, ApiError> {
        self.get(token, &format!("Meeting/{id}")).await
    }

    pub async fn create_meeting(&self, token: &str, meeting: &NewMeeting) -> Result<(), ApiError> {
        self.send_json::<serde_json::Value, _>(Method::POST, Some(token), "Meeting", meeting)
            .await
            .map(|_| ())
    }

    pub async fn update_meeting(
        &self,
        token: &str,
        id: i64,
        update: &MeetingUpdate,
    ) -> Result<(), ApiError> {
        self.send_json::<serde_json::Value, _>(
            Method::PUT,
            Some(token),
            &format!("Meeting/{id}"),
            update,
        )
        .await
        .map(|_| ())
    }

    /// Create minutes, or update them when `minutes_id` is known.
    pub async fn save_minutes(
        &self,
        token: &str,
        minutes_id: Option<i64>,
        input: &MinutesInput,
    ) -> Result<(), ApiError> {
        let (method, path) = match minutes_id {
            Some(id) => (Method::PUT, format!("Minutes/{id}")),
            None => (Method::POST, "Minutes".to_string()),
        };
        self.send_json::<serde_json::Value, _>(method, Some(token), &path, input)
            .await
            .map(|_| ())
    }

    pub async fn upload_attachment(
        &self,
        token: &str,
        minutes_id: i64,
        upload: Upload,
    ) -> Result<(), ApiError> {
        let mut part = multipart::Part::bytes(upload.bytes).file_name(upload.file_name);
        if let Some(ct) = upload.content_type {
            part = part.mime_str(&ct)?;
        }
        let form = multipart::Form::new()
            .part("file", part)
            .text("minutes_of_meeting_id", minutes_id.to_string());
        self.send_multipart::<serde_json::Value>(token, "Attachment", form)
            .await
            .map(|_| ())
    }

    pub async fn create_action_item(
        &self,
        token: &str,
        item: &NewActionItem,
    ) -> Result<(), ApiError> {
        self.send_json::<serde_json::Value, _>(Method::POST, Some(token), "ActionItem", item)
            .await
            .map(|_| ())
    }

    pub async fn set_action_item_status(
        &self,
        token: &str,
        id: i64,
        status: ActionItemStatus,
    ) -> Result<(), ApiError> {
        self.send_json::<serde_json::Value, _>(
            Method::PUT,
            Some(token),
            &format!("ActionItem/{id}/toggle"),
            &ToggleRequest { status },
        )
        .await
        .map(|_| ())
    }
}
