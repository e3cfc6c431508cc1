use actix_web::{HttpResponse, web};
use chrono::Utc;
use serde::Deserialize;

use crate::api::{ApiClient, ApiError};
use crate::auth::gate::{self, SIGN_IN_ROUTE, SessionUser};
use crate::auth::session::PortalSession;
use crate::auth::validate;
use crate::config::PortalConfig;
use crate::errors::{AppError, redirect, render};
use crate::templates_structs::{APP_NAME, LoginTemplate};

#[derive(Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub csrf_token: String,
}

#[derive(Deserialize)]
pub struct CsrfOnly {
    pub csrf_token: String,
}

pub async fn root() -> HttpResponse {
    redirect(SIGN_IN_ROUTE)
}

fn login_form(
    session: &PortalSession,
    error: Option<String>,
    errors: Vec<String>,
    email: &str,
) -> Result<HttpResponse, AppError> {
    let tmpl = LoginTemplate {
        error,
        errors,
        email: email.to_string(),
        app_name: APP_NAME.to_string(),
        csrf_token: session.csrf_token(),
    };
    render(tmpl)
}

pub async fn login_page(session: PortalSession) -> Result<HttpResponse, AppError> {
    // Already signed in: skip the form
    let data = session.load();
    if gate::is_session_valid(&data, Utc::now()) {
        return Ok(redirect(gate::landing_route(data.role())));
    }
    login_form(&session, None, vec![], "")
}

pub async fn login_submit(
    api: web::Data<ApiClient>,
    config: web::Data<PortalConfig>,
    session: PortalSession,
    form: web::Form<LoginForm>,
) -> Result<HttpResponse, AppError> {
    session.verify_csrf(&form.csrf_token)?;

    let mut errors = vec![];
    errors.extend(validate::validate_email(&form.email));
    errors.extend(validate::validate_password(&form.password));
    if !errors.is_empty() {
        return login_form(&session, None, errors, &form.email);
    }

    let email = form.email.trim();
    match api.login(email, &form.password).await {
        Ok(login) => {
            let user = SessionUser {
                id: login.user.id,
                name: login.user.name,
                email: login.user.email,
                role: login.user.role,
            };
            let token_exp = Utc::now() + config.session_ttl();
            session.persist(&login.token, token_exp, &user)?;
            log::info!("User '{}' signed in", user.email);
            Ok(redirect(gate::landing_route(user.role())))
        }
        Err(ApiError::Validation(msgs)) => login_form(&session, None, msgs, email),
        Err(e @ (ApiError::Transport(_) | ApiError::Decode(_))) => {
            log::error!("Sign-in for '{email}' failed: {e}");
            login_form(
                &session,
                Some("The booking service is unavailable, please try again later".to_string()),
                vec![],
                email,
            )
        }
        Err(e) => {
            log::info!("Sign-in rejected for '{email}': {e}");
            login_form(&session, Some("Invalid credentials".to_string()), vec![], email)
        }
    }
}

pub async fn logout(
    session: PortalSession,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    session.verify_csrf(&form.csrf_token)?;
    if let Some(user) = session.load().user {
        log::info!("User '{}' signed out", user.email);
    }
    session.clear();
    Ok(redirect(SIGN_IN_ROUTE))
}
