use actix_web::{HttpResponse, web};
use chrono::Local;

use crate::api::ApiClient;
use crate::auth::session::PortalSession;
use crate::errors::{AppError, render};
use crate::models::meeting::split_meetings;
use crate::templates_structs::{MeetingsListTemplate, PageContext};

/// GET /meetings: the user's meetings split into ongoing, upcoming and previous.
pub async fn list(
    api: web::Data<ApiClient>,
    session: PortalSession,
) -> Result<HttpResponse, AppError> {
    let auth = session.authenticated()?;
    let meetings = api.user_meetings(&auth.token, auth.user.id).await?;
    let buckets = split_meetings(meetings, Local::now().naive_local());

    let ctx = PageContext::build(&session, &auth, "/meetings");
    let tmpl = MeetingsListTemplate {
        ctx,
        ongoing: buckets.ongoing,
        upcoming: buckets.upcoming,
        previous: buckets.previous,
    };
    render(tmpl)
}
