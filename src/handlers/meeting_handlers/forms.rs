//! Form structures for the meeting pages.
//!
//! Forms with repeated keys (`attendees`, `agenda`) are decoded from the raw
//! urlencoded pairs; the rest go through `web::Form`.

use actix_multipart::form::{MultipartForm, bytes::Bytes, text::Text};
use serde::Deserialize;

use crate::auth::validate;
use crate::models::meeting::{Agenda, NewMeeting};
use crate::models::minutes::ActionItemStatus;
use crate::models::user::Upload;
use crate::templates_structs::MeetingFormValues;

fn pairs(body: &[u8]) -> Vec<(String, String)> {
    serde_urlencoded::from_bytes(body).unwrap_or_default()
}

/// Agenda lines from a textarea, one per non-blank line.
pub fn agenda_lines(text: &str) -> Vec<Agenda> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(|l| Agenda { id: None, description: l.to_string() })
        .collect()
}

#[derive(Debug, Default)]
pub struct MeetingForm {
    pub title: String,
    pub description: String,
    pub starts_at: String,
    pub ends_at: String,
    pub room_id: String,
    pub agendas: String,
    pub attendees: Vec<i64>,
    pub csrf_token: String,
}

pub fn parse_meeting_form(body: &[u8]) -> MeetingForm {
    let mut form = MeetingForm::default();
    for (key, value) in pairs(body) {
        match key.as_str() {
            "title" => form.title = value,
            "description" => form.description = value,
            "starts_at" => form.starts_at = value,
            "ends_at" => form.ends_at = value,
            "room_id" => form.room_id = value,
            "agendas" => form.agendas = value,
            "attendees" => {
                if let Ok(id) = value.trim().parse() {
                    if !form.attendees.contains(&id) {
                        form.attendees.push(id);
                    }
                }
            }
            "csrf_token" => form.csrf_token = value,
            _ => {}
        }
    }
    form
}

impl MeetingForm {
    pub fn values(&self) -> MeetingFormValues {
        MeetingFormValues {
            title: self.title.clone(),
            description: self.description.clone(),
            starts_at: self.starts_at.clone(),
            ends_at: self.ends_at.clone(),
            room_id: self.room_id.trim().parse().ok(),
            agendas: self.agendas.clone(),
            attendees: self.attendees.clone(),
        }
    }

    /// Check every field and build the API payload.
    pub fn validate(&self) -> Result<NewMeeting, Vec<String>> {
        let mut errors = vec![];
        errors.extend(validate::validate_required(&self.title, "Title", 255));
        errors.extend(validate::validate_required(&self.description, "Description", 65_535));
        let starts_at = validate::collect(
            validate::parse_timestamp(&self.starts_at, "Start time"),
            &mut errors,
        );
        let ends_at = validate::collect(
            validate::parse_timestamp(&self.ends_at, "End time"),
            &mut errors,
        );
        if let (Some(start), Some(end)) = (starts_at, ends_at) {
            if end <= start {
                errors.push("End time must be after the start time".to_string());
            }
        }
        let room_id = validate::collect(validate::parse_integer(&self.room_id, "Room"), &mut errors);
        let agendas = agenda_lines(&self.agendas);
        if agendas.is_empty() {
            errors.push("At least one agenda item is required".to_string());
        }

        match (starts_at, ends_at, room_id) {
            (Some(starts_at), Some(ends_at), Some(room_id)) if errors.is_empty() => Ok(NewMeeting {
                title: self.title.trim().to_string(),
                description: self.description.trim().to_string(),
                starts_at,
                ends_at,
                room_id,
                agendas,
                attendees: self.attendees.clone(),
            }),
            _ => Err(errors),
        }
    }
}

/// Agenda editor on the detail page: each `agenda` input is preceded by an
/// `agenda_id` hidden input, empty for new rows.
#[derive(Debug, Default)]
pub struct AgendaForm {
    pub agendas: Vec<Agenda>,
    pub csrf_token: String,
}

pub fn parse_agenda_form(body: &[u8]) -> AgendaForm {
    let mut form = AgendaForm::default();
    let mut pending_id: Option<i64> = None;
    for (key, value) in pairs(body) {
        match key.as_str() {
            "agenda_id" => pending_id = value.trim().parse().ok(),
            "agenda" => {
                let id = pending_id.take();
                let description = value.trim();
                if !description.is_empty() {
                    form.agendas.push(Agenda { id, description: description.to_string() });
                }
            }
            "csrf_token" => form.csrf_token = value,
            _ => {}
        }
    }
    form
}

#[derive(Deserialize)]
pub struct MinutesForm {
    pub decisions: String,
    #[serde(rename = "discussedPoints")]
    pub discussed_points: String,
    pub csrf_token: String,
}

#[derive(Deserialize)]
pub struct ActionItemForm {
    pub description: String,
    #[serde(default)]
    pub status: Option<ActionItemStatus>,
    #[serde(rename = "dueDate")]
    pub due_date: String,
    #[serde(rename = "assignedTo")]
    pub assigned_to: String,
    pub csrf_token: String,
}

#[derive(MultipartForm)]
pub struct AttachmentUpload {
    #[multipart(limit = "10MB")]
    pub file: Bytes,
    pub csrf_token: Text<String>,
}

/// Turn a multipart file part into an [`Upload`]; `None` when no file was chosen.
pub fn into_upload(part: Bytes) -> Option<Upload> {
    if part.data.is_empty() {
        return None;
    }
    Some(Upload {
        file_name: part.file_name.unwrap_or_else(|| "upload".to_string()),
        content_type: part.content_type.map(|m| m.to_string()),
        bytes: part.data.to_vec(),
    })
}
