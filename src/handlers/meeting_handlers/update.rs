use actix_multipart::form::MultipartForm;
use actix_web::{HttpResponse, web};

use crate::api::{ApiClient, ApiError};
use crate::auth::session::{Authenticated, PortalSession};
use crate::auth::validate;
use crate::errors::{AppError, redirect};
use crate::models::meeting::MeetingUpdate;
use crate::models::minutes::{MinutesInput, NewActionItem};
use crate::models::timestamp;

use super::forms::{ActionItemForm, AttachmentUpload, MinutesForm, into_upload, parse_agenda_form};
use super::read::render_detail;

fn detail_route(id: i64) -> String {
    format!("/meetings/{id}")
}

/// Redirect back to the detail page on success; re-render it with the
/// messages when the API refused the input.
async fn finish(
    api: &ApiClient,
    session: &PortalSession,
    auth: &Authenticated,
    id: i64,
    result: Result<(), ApiError>,
    success: &str,
) -> Result<HttpResponse, AppError> {
    match result {
        Ok(()) => {
            session.flash(success);
            Ok(redirect(&detail_route(id)))
        }
        Err(e) if e.is_user_facing() => render_detail(api, session, auth, id, e.messages()).await,
        Err(e) => Err(e.into()),
    }
}

/// POST /meetings/{id}/agendas: replace the agenda list, keeping the rest
/// of the meeting as stored.
pub async fn save_agendas(
    api: web::Data<ApiClient>,
    session: PortalSession,
    path: web::Path<i64>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let auth = session.authenticated()?;
    let form = parse_agenda_form(&body);
    session.verify_csrf(&form.csrf_token)?;
    let id = path.into_inner();

    if form.agendas.is_empty() {
        let errors = vec!["At least one agenda item is required".to_string()];
        return render_detail(&api, &session, &auth, id, errors).await;
    }

    let meeting = api.meeting(&auth.token, id).await?;
    let update = MeetingUpdate::with_agendas(&meeting, form.agendas);
    let result = api.update_meeting(&auth.token, id, &update).await;
    finish(&api, &session, &auth, id, result, "Agendas updated").await
}

/// POST /meetings/{id}/minutes: create the minutes, or update them if the
/// meeting already has some.
pub async fn save_minutes(
    api: web::Data<ApiClient>,
    session: PortalSession,
    path: web::Path<i64>,
    form: web::Form<MinutesForm>,
) -> Result<HttpResponse, AppError> {
    let auth = session.authenticated()?;
    session.verify_csrf(&form.csrf_token)?;
    let id = path.into_inner();

    let mut errors = vec![];
    errors.extend(validate::validate_required(&form.decisions, "Decisions", 65_535));
    errors.extend(validate::validate_required(&form.discussed_points, "Discussed points", 65_535));
    if !errors.is_empty() {
        return render_detail(&api, &session, &auth, id, errors).await;
    }

    let meeting = api.meeting(&auth.token, id).await?;
    let input = MinutesInput {
        meeting_id: meeting.id,
        decisions: form.decisions.trim().to_string(),
        discussed_points: form.discussed_points.trim().to_string(),
    };
    let result = api.save_minutes(&auth.token, meeting.minutes_id(), &input).await;
    finish(&api, &session, &auth, id, result, "Minutes saved successfully").await
}

/// POST /meetings/{id}/attachments: multipart upload onto existing minutes.
pub async fn upload_attachment(
    api: web::Data<ApiClient>,
    session: PortalSession,
    path: web::Path<i64>,
    MultipartForm(form): MultipartForm<AttachmentUpload>,
) -> Result<HttpResponse, AppError> {
    let auth = session.authenticated()?;
    session.verify_csrf(&form.csrf_token)?;
    let id = path.into_inner();

    let meeting = api.meeting(&auth.token, id).await?;
    let Some(minutes_id) = meeting.minutes_id() else {
        let errors = vec!["Save the minutes before uploading attachments".to_string()];
        return render_detail(&api, &session, &auth, id, errors).await;
    };
    let Some(upload) = into_upload(form.file) else {
        let errors = vec!["Choose a file to upload".to_string()];
        return render_detail(&api, &session, &auth, id, errors).await;
    };

    log::info!("Uploading '{}' to minutes {minutes_id}", upload.file_name);
    let result = api.upload_attachment(&auth.token, minutes_id, upload).await;
    finish(&api, &session, &auth, id, result, "Attachment uploaded").await
}

/// POST /meetings/{id}/action-items: add an action item to the minutes,
/// assigned to one of the attendees.
pub async fn add_action_item(
    api: web::Data<ApiClient>,
    session: PortalSession,
    path: web::Path<i64>,
    form: web::Form<ActionItemForm>,
) -> Result<HttpResponse, AppError> {
    let auth = session.authenticated()?;
    session.verify_csrf(&form.csrf_token)?;
    let id = path.into_inner();

    let meeting = api.meeting(&auth.token, id).await?;
    let Some(minutes_id) = meeting.minutes_id() else {
        let errors = vec!["Save the minutes before adding action items".to_string()];
        return render_detail(&api, &session, &auth, id, errors).await;
    };

    let mut errors = vec![];
    errors.extend(validate::validate_required(&form.description, "Description", 65_535));
    let due_date = timestamp::parse_date(&form.due_date);
    if due_date.is_none() {
        errors.push("Due date is not a valid date".to_string());
    }
    let assignee = validate::collect(
        validate::parse_integer(&form.assigned_to, "Assignee"),
        &mut errors,
    );
    if let Some(user_id) = assignee {
        if !meeting.attendees.iter().any(|a| a.id == user_id) {
            errors.push("The assignee must be one of the attendees".to_string());
        }
    }

    let (Some(due_date), Some(assigned_to), true) = (due_date, assignee, errors.is_empty()) else {
        return render_detail(&api, &session, &auth, id, errors).await;
    };

    let item = NewActionItem {
        description: form.description.trim().to_string(),
        status: form.status.unwrap_or_default(),
        due_date: due_date.format("%Y-%m-%d").to_string(),
        assigned_to,
        minutes_of_meeting_id: minutes_id,
    };
    let result = api.create_action_item(&auth.token, &item).await;
    finish(&api, &session, &auth, id, result, "Action item added").await
}
