use actix_web::{HttpResponse, web};
use chrono::Local;

use crate::api::ApiClient;
use crate::auth::session::{Authenticated, PortalSession};
use crate::errors::{AppError, render};
use crate::templates_structs::{MeetingDetailTemplate, PageContext};

/// Fetch and render the detail page, with `errors` shown above the forms.
pub(super) async fn render_detail(
    api: &ApiClient,
    session: &PortalSession,
    auth: &Authenticated,
    id: i64,
    errors: Vec<String>,
) -> Result<HttpResponse, AppError> {
    let meeting = api.meeting(&auth.token, id).await?;
    let ctx = PageContext::build(session, auth, "/meetings");
    let today = Local::now().date_naive().format("%Y-%m-%d").to_string();
    render(MeetingDetailTemplate { ctx, meeting, today, errors })
}

/// GET /meetings/{id}
pub async fn detail(
    api: web::Data<ApiClient>,
    session: PortalSession,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let auth = session.authenticated()?;
    render_detail(&api, &session, &auth, path.into_inner(), vec![]).await
}
