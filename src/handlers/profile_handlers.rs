use actix_multipart::form::{MultipartForm, bytes::Bytes, text::Text};
use actix_web::{HttpResponse, web};

use crate::api::ApiClient;
use crate::auth::gate::{self, PROFILE_ROUTE, SessionUser};
use crate::auth::session::{Authenticated, PortalSession};
use crate::auth::validate;
use crate::config::PortalConfig;
use crate::errors::{AppError, redirect, render};
use crate::handlers::meeting_handlers::forms::into_upload;
use crate::models::role;
use crate::models::user::{Upload, User, UserUpdate};
use crate::templates_structs::{PageContext, ProfileTemplate};

#[derive(MultipartForm)]
pub struct ProfileForm {
    pub name: Text<String>,
    pub email: Text<String>,
    pub role: Option<Text<String>>,
    pub password: Option<Text<String>>,
    pub password_confirmation: Option<Text<String>>,
    #[multipart(limit = "5MB")]
    pub profile_picture: Option<Bytes>,
    pub csrf_token: Text<String>,
}

fn text(field: Option<Text<String>>) -> String {
    field.map(Text::into_inner).unwrap_or_default()
}

fn render_profile(
    config: &PortalConfig,
    session: &PortalSession,
    auth: &Authenticated,
    user: User,
    errors: Vec<String>,
) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(session, auth, PROFILE_ROUTE);
    let tmpl = ProfileTemplate {
        ctx,
        picture_url: user.profile_picture.as_deref().map(|p| config.asset_url(p)),
        role_options: role::options(&user.role),
        can_change_role: gate::can_administer(auth.role()),
        user,
        errors,
    };
    render(tmpl)
}

fn check_picture(upload: &Upload) -> Option<String> {
    let is_image = upload
        .content_type
        .as_deref()
        .is_some_and(|ct| ct.starts_with("image/"));
    (!is_image).then(|| "Profile picture must be an image".to_string())
}

/// GET /profile: the user record as the API knows it.
pub async fn show(
    api: web::Data<ApiClient>,
    config: web::Data<PortalConfig>,
    session: PortalSession,
) -> Result<HttpResponse, AppError> {
    let auth = session.authenticated()?;
    let user = api.profile(&auth.token).await?;
    render_profile(&config, &session, &auth, user, vec![])
}

/// POST /profile: multipart update of the user's own record.
pub async fn update(
    api: web::Data<ApiClient>,
    config: web::Data<PortalConfig>,
    session: PortalSession,
    MultipartForm(form): MultipartForm<ProfileForm>,
) -> Result<HttpResponse, AppError> {
    let auth = session.authenticated()?;
    session.verify_csrf(&form.csrf_token)?;

    let name = form.name.trim().to_string();
    let email = form.email.trim().to_string();
    // Only admins may change roles; everyone else keeps the session's role
    let role = if gate::can_administer(auth.role()) {
        text(form.role).trim().to_string()
    } else {
        auth.user.role.clone()
    };
    let password = text(form.password);
    let password_confirmation = text(form.password_confirmation);
    let picture = form.profile_picture.and_then(into_upload);

    let mut errors = vec![];
    errors.extend(validate::validate_required(&name, "Name", 255));
    errors.extend(validate::validate_email(&email));
    errors.extend(validate::validate_role(&role));
    errors.extend(validate::validate_password_change(&password, &password_confirmation));
    errors.extend(picture.as_ref().and_then(check_picture));

    let echo = |mut user: User| {
        user.name = name.clone();
        user.email = email.clone();
        user.role = role.clone();
        user
    };

    if !errors.is_empty() {
        let user = echo(api.profile(&auth.token).await?);
        return render_profile(&config, &session, &auth, user, errors);
    }

    let update = UserUpdate {
        name: name.clone(),
        email: email.clone(),
        role: role.clone(),
        password: Some(password).filter(|p| !p.is_empty()),
        password_confirmation: Some(password_confirmation),
        profile_picture: picture,
    };

    match api.update_user(&auth.token, auth.user.id, update).await {
        Ok(saved) => {
            let session_user = SessionUser {
                id: auth.user.id,
                name: if saved.name.is_empty() { name.clone() } else { saved.name },
                email: if saved.email.is_empty() { email.clone() } else { saved.email },
                role: if saved.role.is_empty() { role.clone() } else { saved.role },
            };
            session.update_user(&session_user)?;
            session.flash("Profile updated successfully");
            Ok(redirect(PROFILE_ROUTE))
        }
        Err(e) if e.is_user_facing() => {
            let user = echo(api.profile(&auth.token).await?);
            render_profile(&config, &session, &auth, user, e.messages())
        }
        Err(e) => Err(e.into()),
    }
}
