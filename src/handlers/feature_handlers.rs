use actix_web::{HttpResponse, web};

use crate::api::ApiClient;
use crate::auth::session::{Authenticated, PortalSession};
use crate::auth::validate;
use crate::config::PortalConfig;
use crate::errors::{AppError, redirect, render};
use crate::handlers::PageParam;
use crate::handlers::auth_handlers::CsrfOnly;
use crate::models::room::{FeatureFilter, FeatureForm, FeatureInput};
use crate::templates_structs::{FeatureFormTemplate, FeatureListTemplate, PageContext, Pager};

const FEATURES_ROUTE: &str = "/admin/features";

pub async fn list(
    api: web::Data<ApiClient>,
    config: web::Data<PortalConfig>,
    session: PortalSession,
    filter: web::Query<FeatureFilter>,
    page: web::Query<PageParam>,
) -> Result<HttpResponse, AppError> {
    let auth = session.authenticated()?;
    let filter = filter.into_inner();
    let feature_page = api
        .features(&auth.token, &filter, page.number(), config.page_size)
        .await?;

    let ctx = PageContext::build(&session, &auth, FEATURES_ROUTE);
    let pager = Pager::new(&feature_page, FEATURES_ROUTE, &filter);
    render(FeatureListTemplate { ctx, features: feature_page.data, filter, pager })
}

fn validate_feature_form(form: &FeatureForm) -> Vec<String> {
    let mut errors = vec![];
    errors.extend(validate::validate_required(&form.title, "Title", 255));
    errors.extend(validate::validate_required(&form.description, "Description", 65_535));
    errors
}

fn render_form(
    session: &PortalSession,
    auth: &Authenticated,
    action: String,
    title: &str,
    values: (&str, &str),
    errors: Vec<String>,
) -> Result<HttpResponse, AppError> {
    let ctx = PageContext::build(session, auth, FEATURES_ROUTE);
    let tmpl = FeatureFormTemplate {
        ctx,
        form_action: action,
        form_title: title.to_string(),
        title: values.0.to_string(),
        description: values.1.to_string(),
        errors,
    };
    render(tmpl)
}

pub async fn new_form(session: PortalSession) -> Result<HttpResponse, AppError> {
    let auth = session.authenticated()?;
    render_form(&session, &auth, FEATURES_ROUTE.to_string(), "Create Feature", ("", ""), vec![])
}

pub async fn create(
    api: web::Data<ApiClient>,
    session: PortalSession,
    form: web::Form<FeatureForm>,
) -> Result<HttpResponse, AppError> {
    let auth = session.authenticated()?;
    session.verify_csrf(&form.csrf_token)?;
    let action = FEATURES_ROUTE.to_string();
    let values = (form.title.as_str(), form.description.as_str());

    let errors = validate_feature_form(&form);
    if !errors.is_empty() {
        return render_form(&session, &auth, action, "Create Feature", values, errors);
    }

    let input = FeatureInput {
        title: form.title.trim().to_string(),
        description: form.description.trim().to_string(),
    };
    match api.create_feature(&auth.token, &input).await {
        Ok(_) => {
            session.flash("Feature created successfully");
            Ok(redirect(FEATURES_ROUTE))
        }
        Err(e) if e.is_user_facing() => {
            render_form(&session, &auth, action, "Create Feature", values, e.messages())
        }
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
    let feature = api.feature(&auth.token, id).await?;
    render_form(
        &session,
        &auth,
        format!("{FEATURES_ROUTE}/{id}"),
        "Edit Feature",
        (&feature.title, &feature.description),
        vec![],
    )
}

pub async fn update(
    api: web::Data<ApiClient>,
    session: PortalSession,
    path: web::Path<i64>,
    form: web::Form<FeatureForm>,
) -> Result<HttpResponse, AppError> {
    let auth = session.authenticated()?;
    session.verify_csrf(&form.csrf_token)?;
    let id = path.into_inner();
    let action = format!("{FEATURES_ROUTE}/{id}");
    let values = (form.title.as_str(), form.description.as_str());

    let errors = validate_feature_form(&form);
    if !errors.is_empty() {
        return render_form(&session, &auth, action, "Edit Feature", values, errors);
    }

    let input = FeatureInput {
        title: form.title.trim().to_string(),
        description: form.description.trim().to_string(),
    };
    match api.update_feature(&auth.token, id, &input).await {
        Ok(_) => {
            session.flash("Feature updated successfully");
            Ok(redirect(FEATURES_ROUTE))
        }
        Err(e) if e.is_user_facing() => {
            render_form(&session, &auth, action, "Edit Feature", values, e.messages())
        }
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

    match api.delete_feature(&auth.token, id).await {
        Ok(()) => session.flash("Feature deleted successfully"),
        Err(e) if e.is_user_facing() => session.flash(&e.messages().join(" ")),
        Err(e) => return Err(e.into()),
    }
    Ok(redirect(FEATURES_ROUTE))
}
