use actix_web::{HttpResponse, web};

use crate::api::ApiClient;
use crate::auth::session::{Authenticated, PortalSession};
use crate::errors::{AppError, redirect, render};
use crate::templates_structs::{MeetingFormTemplate, MeetingFormValues, PageContext};

use super::forms::parse_meeting_form;

async fn render_form(
    api: &ApiClient,
    session: &PortalSession,
    auth: &Authenticated,
    values: MeetingFormValues,
    errors: Vec<String>,
) -> Result<HttpResponse, AppError> {
    let (rooms, users) = tokio::try_join!(
        api.room_options(&auth.token),
        api.all_users(&auth.token),
    )?;
    let ctx = PageContext::build(session, auth, "/meetings");
    render(MeetingFormTemplate { ctx, values, rooms, users, errors })
}

/// GET /meetings/new
pub async fn new_form(
    api: web::Data<ApiClient>,
    session: PortalSession,
) -> Result<HttpResponse, AppError> {
    let auth = session.authenticated()?;
    render_form(&api, &session, &auth, MeetingFormValues::default(), vec![]).await
}

/// POST /meetings
pub async fn create(
    api: web::Data<ApiClient>,
    session: PortalSession,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let auth = session.authenticated()?;
    let form = parse_meeting_form(&body);
    session.verify_csrf(&form.csrf_token)?;

    let meeting = match form.validate() {
        Ok(meeting) => meeting,
        Err(errors) => return render_form(&api, &session, &auth, form.values(), errors).await,
    };

    match api.create_meeting(&auth.token, &meeting).await {
        Ok(()) => {
            log::info!("Meeting '{}' created by '{}'", meeting.title, auth.user.email);
            session.flash("Meeting created successfully");
            Ok(redirect("/meetings"))
        }
        Err(e) if e.is_user_facing() => {
            render_form(&api, &session, &auth, form.values(), e.messages()).await
        }
        Err(e) => Err(e.into()),
    }
}
