use actix_web::{HttpResponse, web};

use crate::api::ApiClient;
use crate::auth::gate::SessionUser;
use crate::auth::session::{Authenticated, PortalSession};
use crate::errors::{AppError, redirect, render};
use crate::handlers::auth_handlers::CsrfOnly;
use crate::models::role;
use crate::models::user::{NewUser, UserForm, UserUpdate};
use crate::templates_structs::{PageContext, UserFormTemplate};

use super::helpers::validate_user_form;

const USERS_ROUTE: &str = "/admin/users";

struct FormView<'a> {
    action: String,
    title: &'a str,
    is_edit: bool,
}

fn render_form(
    session: &PortalSession,
    auth: &Authenticated,
    view: FormView<'_>,
    name: &str,
    email: &str,
    role_value: &str,
    errors: Vec<String>,
) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(session, auth, USERS_ROUTE);
    let tmpl = UserFormTemplate {
        ctx,
        form_action: view.action,
        form_title: view.title.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        role_options: role::options(role_value),
        is_edit: view.is_edit,
        errors,
    };
    render(tmpl)
}

fn create_view() -> FormView<'static> {
    FormView { action: USERS_ROUTE.to_string(), title: "Create User", is_edit: false }
}

fn edit_view(id: i64) -> FormView<'static> {
    FormView { action: format!("{USERS_ROUTE}/{id}"), title: "Edit User", is_edit: true }
}

pub async fn new_form(session: PortalSession) -> Result<HttpResponse, AppError> {
    let auth = session.authenticated()?;
    render_form(&session, &auth, create_view(), "", "", "", vec![])
}

pub async fn create(
    api: web::Data<ApiClient>,
    session: PortalSession,
    form: web::Form<UserForm>,
) -> Result<HttpResponse, AppError> {
    let auth = session.authenticated()?;
    session.verify_csrf(&form.csrf_token)?;

    let errors = validate_user_form(&form, true);
    if !errors.is_empty() {
        return render_form(&session, &auth, create_view(), &form.name, &form.email, &form.role, errors);
    }

    let new = NewUser {
        name: form.name.trim().to_string(),
        email: form.email.trim().to_string(),
        role: form.role.trim().to_string(),
        password: form.password.clone(),
        password_confirmation: form.password_confirmation.clone(),
    };

    match api.create_user(&auth.token, &new).await {
        Ok(_) => {
            log::info!("User '{}' created by '{}'", new.email, auth.user.email);
            session.flash("User created successfully");
            Ok(redirect(USERS_ROUTE))
        }
        Err(e) if e.is_user_facing() => render_form(
            &session,
            &auth,
            create_view(),
            &form.name,
            &form.email,
            &form.role,
            e.messages(),
        ),
        Err(e) => Err(e.into()),
    }
}

pub async fn edit_form(
    api: web::Data<ApiClient>,
    session: PortalSession,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let auth = session.authenticated()?;
    let id = path.into_inner();
    let user = api.user(&auth.token, id).await?;
    render_form(&session, &auth, edit_view(id), &user.name, &user.email, &user.role, vec![])
}

pub async fn update(
    api: web::Data<ApiClient>,
    session: PortalSession,
    path: web::Path<i64>,
    form: web::Form<UserForm>,
) -> Result<HttpResponse, AppError> {
    let auth = session.authenticated()?;
    session.verify_csrf(&form.csrf_token)?;
    let id = path.into_inner();

    let errors = validate_user_form(&form, false);
    if !errors.is_empty() {
        return render_form(&session, &auth, edit_view(id), &form.name, &form.email, &form.role, errors);
    }

    let update = UserUpdate {
        name: form.name.trim().to_string(),
        email: form.email.trim().to_string(),
        role: form.role.trim().to_string(),
        password: Some(form.password.clone()).filter(|p| !p.is_empty()),
        password_confirmation: Some(form.password_confirmation.clone()),
        profile_picture: None,
    };

    match api.update_user(&auth.token, id, update).await {
        Ok(saved) => {
            // Editing yourself refreshes the sidebar name and role
            if id == auth.user.id {
                session.update_user(&SessionUser {
                    id,
                    name: saved.name,
                    email: saved.email,
                    role: saved.role,
                })?;
            }
            session.flash("User updated successfully");
            Ok(redirect(USERS_ROUTE))
        }
        Err(e) if e.is_user_facing() => render_form(
            &session,
            &auth,
            edit_view(id),
            &form.name,
            &form.email,
            &form.role,
            e.messages(),
        ),
        Err(e) => Err(e.into()),
    }
}

pub async fn delete(
    api: web::Data<ApiClient>,
    session: PortalSession,
    path: web::Path<i64>,
    form: web::Form<CsrfOnly>,
) -> Result<HttpResponse, AppError> {
    let auth = session.authenticated()?;
    session.verify_csrf(&form.csrf_token)?;
    let id = path.into_inner();

    // Self-deletion protection
    if id == auth.user.id {
        session.flash("You cannot delete your own account");
        return Ok(redirect(USERS_ROUTE));
    }

    match api.delete_user(&auth.token, id).await {
        Ok(()) => {
            log::info!("User {id} deleted by '{}'", auth.user.email);
            session.flash("User deleted successfully");
        }
        Err(e) if e.is_user_facing() => {
            session.flash(&e.messages().join(" "));
        }
        Err(e) => return Err(e.into()),
    }
    Ok(redirect(USERS_ROUTE))
}
