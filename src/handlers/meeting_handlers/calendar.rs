use std::collections::BTreeMap;

use actix_web::{HttpResponse, web};
use chrono::NaiveDateTime;
use serde::Serialize;

use crate::api::ApiClient;
use crate::auth::session::PortalSession;
use crate::errors::{AppError, render};
use crate::models::meeting::{Meeting, to_calendar_events};
use crate::templates_structs::{CalendarTemplate, PageContext, script_json};

/// What the calendar shows when an event is clicked.
#[derive(Debug, Serialize)]
pub struct EventDetail {
    pub title: String,
    pub description: String,
    pub status: String,
    #[serde(with = "crate::models::timestamp")]
    pub start: NaiveDateTime,
    #[serde(with = "crate::models::timestamp")]
    pub end: NaiveDateTime,
}

pub fn event_details(meetings: &[Meeting]) -> BTreeMap<i64, EventDetail> {
    meetings
        .iter()
        .map(|m| {
            let detail = EventDetail {
                title: m.title.clone(),
                description: m.description.clone(),
                status: m.status.clone(),
                start: m.starts_at,
                end: m.ends_at,
            };
            (m.id, detail)
        })
        .collect()
}

/// GET /meetings/calendar: month grid of the user's meetings.
pub async fn calendar(
    api: web::Data<ApiClient>,
    session: PortalSession,
) -> Result<HttpResponse, AppError> {
    let auth = session.authenticated()?;
    let meetings = api.user_meetings(&auth.token, auth.user.id).await?;

    let ctx = PageContext::build(&session, &auth, "/meetings/calendar");
    let tmpl = CalendarTemplate {
        ctx,
        events_json: script_json(&to_calendar_events(&meetings)),
        details_json: script_json(&event_details(&meetings)),
    };
    render(tmpl)
}

/// GET /meetings/calendar/events: the same events as JSON.
pub async fn calendar_events(
    api: web::Data<ApiClient>,
    session: PortalSession,
) -> Result<HttpResponse, AppError> {
    let auth = session.authenticated()?;
    let meetings = api.user_meetings(&auth.token, auth.user.id).await?;
    Ok(HttpResponse::Ok().json(to_calendar_events(&meetings)))
}
