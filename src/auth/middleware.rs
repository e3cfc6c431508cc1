use actix_session::SessionExt;
use actix_web::{
    Error, HttpResponse,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
};
use chrono::Utc;

use crate::auth::gate::{self, SIGN_IN_ROUTE};
use crate::auth::session::PortalSession;
use crate::errors::AppError;

/// Middleware function that checks for a valid, unexpired session.
///
/// Redirects to /signin otherwise, without remembering the requested path.
/// Stale fields are purged on the way out, and a session the API rejected
/// (surfaced by the handler as `AppError::Session`) is purged as well.
pub async fn require_auth(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let session = PortalSession::new(req.get_session());
    let data = session.load();

    if !gate::is_session_valid(&data, Utc::now()) {
        if data.token.is_some() || data.user.is_some() || data.token_exp.is_some() {
            log::info!("Discarding expired or incomplete session for {}", req.path());
            session.clear();
        }
        let response = HttpResponse::SeeOther()
            .insert_header(("Location", SIGN_IN_ROUTE))
            .finish();
        return Ok(req.into_response(response).map_into_right_body());
    }

    let res = next.call(req).await?;

    let rejected = res
        .response()
        .error()
        .and_then(|e| e.as_error::<AppError>())
        .is_some_and(|e| matches!(e, AppError::Session(_)));
    if rejected {
        res.request().get_session().purge();
    }

    Ok(res.map_into_left_body())
}

/// Middleware for the /admin scope. Must run inside `require_auth`.
/// Non-admin roles are sent to their own landing page.
pub async fn require_admin(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let role = PortalSession::new(req.get_session()).load().role();

    if !gate::can_administer(role) {
        log::warn!("Role {:?} denied access to {}", role, req.path());
        let response = HttpResponse::SeeOther()
            .insert_header(("Location", gate::landing_route(role)))
            .finish();
        return Ok(req.into_response(response).map_into_right_body());
    }

    next.call(req).await.map(|res| res.map_into_left_body())
}
