use actix_web::{HttpResponse, web};

use crate::api::ApiClient;
use crate::auth::session::PortalSession;
use crate::errors::{AppError, redirect, render};
use crate::handlers::auth_handlers::CsrfOnly;
use crate::templates_structs::{ActionItemsTemplate, PageContext};

const ACTION_ITEMS_ROUTE: &str = "/action-items";

pub async fn list(
    api: web::Data<ApiClient>,
    session: PortalSession,
) -> Result<HttpResponse, AppError> {
    let auth = session.authenticated()?;
    let items = api.user_action_items(&auth.token, auth.user.id).await?;
    let ctx = PageContext::build(&session, &auth, ACTION_ITEMS_ROUTE);
    render(ActionItemsTemplate { ctx, items })
}

/// POST /action-items/{id}/toggle: flip Pending and Completed.
///
/// The current status is read from the user's own item list, so only items
/// assigned to the signed-in user can be toggled.
pub async fn toggle(
    api: web::Data<ApiClient>,
    session: PortalSession,
    path: web::Path<i64>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    let auth = session.authenticated()?;
    session.verify_csrf(&form.csrf_token)?;
    let id = path.into_inner();

    let items = api.user_action_items(&auth.token, auth.user.id).await?;
    let item = items.iter().find(|i| i.id == id).ok_or(AppError::NotFound)?;
    let next = item.status.toggled();

    match api.set_action_item_status(&auth.token, id, next).await {
        Ok(()) => session.flash(&format!("Action item marked as {next}")),
        Err(e) if e.is_user_facing() => session.flash(&e.messages().join(" ")),
        Err(e) => return Err(e.into()),
    }
    Ok(redirect(ACTION_ITEMS_ROUTE))
}
