use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::models::minutes::Minutes;
use crate::models::room::Room;
use crate::models::timestamp;
use crate::models::user::User;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Agenda {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub description: String,
}

/// Meeting record as returned by `GET /Meeting/{id}` and `GET /User/{id}/meetings`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meeting {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "startsAt", with = "timestamp")]
    pub starts_at: NaiveDateTime,
    #[serde(rename = "endsAt", with = "timestamp")]
    pub ends_at: NaiveDateTime,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub room_id: Option<i64>,
    #[serde(default)]
    pub room: Option<Room>,
    #[serde(default)]
    pub agendas: Vec<Agenda>,
    #[serde(default)]
    pub attendees: Vec<User>,
    #[serde(default)]
    pub minutes: Option<Minutes>,
}

impl Meeting {
    pub fn starts_display(&self) -> String {
        self.starts_at.format("%a, %b %-d %H:%M").to_string()
    }

    pub fn ends_display(&self) -> String {
        self.ends_at.format("%a, %b %-d %H:%M").to_string()
    }

    pub fn time_range(&self) -> String {
        format!(
            "{} - {}",
            self.starts_at.format("%H:%M"),
            self.ends_at.format("%H:%M")
        )
    }

    pub fn room_display(&self) -> String {
        match &self.room {
            Some(r) => format!("{} (Floor {})", r.roomname, r.floor),
            None => "No room".to_string(),
        }
    }

    pub fn attendee_names(&self) -> String {
        self.attendees
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Room id for update payloads; falls back to the embedded room.
    pub fn effective_room_id(&self) -> Option<i64> {
        self.room_id.or_else(|| self.room.as_ref().map(|r| r.id))
    }

    pub fn minutes_id(&self) -> Option<i64> {
        self.minutes.as_ref().map(|m| m.id)
    }
}

/// Payload for `POST /Meeting`.
#[derive(Debug, Clone, Serialize)]
pub struct NewMeeting {
    pub title: String,
    pub description: String,
    #[serde(rename = "startsAt", with = "timestamp")]
    pub starts_at: NaiveDateTime,
    #[serde(rename = "endsAt", with = "timestamp")]
    pub ends_at: NaiveDateTime,
    pub room_id: i64,
    pub agendas: Vec<Agenda>,
    pub attendees: Vec<i64>,
}

/// Payload for `PUT /Meeting/{id}`; the API expects the full record back.
#[derive(Debug, Clone, Serialize)]
pub struct MeetingUpdate {
    pub room_id: Option<i64>,
    pub title: String,
    pub description: String,
    #[serde(rename = "startsAt", with = "timestamp")]
    pub starts_at: NaiveDateTime,
    #[serde(rename = "endsAt", with = "timestamp")]
    pub ends_at: NaiveDateTime,
    pub agendas: Vec<Agenda>,
}

impl MeetingUpdate {
    /// Copy an existing meeting, replacing only its agendas.
    pub fn with_agendas(meeting: &Meeting, agendas: Vec<Agenda>) -> Self {
        Self {
            room_id: meeting.effective_room_id(),
            title: meeting.title.clone(),
            description: meeting.description.clone(),
            starts_at: meeting.starts_at,
            ends_at: meeting.ends_at,
            agendas,
        }
    }
}
