use actix_web::{HttpResponse, web};

use crate::api::ApiClient;
use crate::auth::session::{Authenticated, PortalSession};
use crate::auth::validate;
use crate::config::PortalConfig;
use crate::errors::{AppError, redirect, render};
use crate::handlers::PageParam;
use crate::handlers::auth_handlers::CsrfOnly;
use crate::models::room::{RoomFilter, RoomForm, RoomInput, parse_room_form};
use crate::templates_structs::{
    FeatureOption, PageContext, Pager, RoomFormTemplate, RoomListTemplate,
};

const ROOMS_ROUTE: &str = "/admin/rooms";

/// GET /admin/rooms: filtered by name, floor and capacity range.
pub async fn list(
    api: web::Data<ApiClient>,
    config: web::Data<PortalConfig>,
    session: PortalSession,
    filter: web::Query<RoomFilter>,
    page: web::Query<PageParam>,
) -> Result<HttpResponse, AppError> {
    let auth = session.authenticated()?;
    let filter = filter.into_inner();
    let room_page = api
        .rooms(&auth.token, &filter, page.number(), config.page_size)
        .await?;

    let ctx = PageContext::build(&session, &auth, ROOMS_ROUTE);
    let pager = Pager::new(&room_page, ROOMS_ROUTE, &filter);
    render(RoomListTemplate { ctx, rooms: room_page.data, filter, pager })
}

/// Check the form and build the API payload, or return every problem found.
fn validate_room_form(form: &RoomForm) -> Result<RoomInput, Vec<String>> {
    let mut errors = vec![];
    errors.extend(validate::validate_required(&form.roomname, "Room name", 255));
    let floor = validate::collect(validate::parse_integer(&form.floor, "Floor"), &mut errors);
    let capacity = validate::collect(validate::parse_capacity(&form.capacity), &mut errors);
    match (floor, capacity) {
        (Some(floor), Some(capacity)) if errors.is_empty() => Ok(RoomInput {
            roomname: form.roomname.trim().to_string(),
            floor,
            capacity,
            features: form.features.clone(),
        }),
        _ => Err(errors),
    }
}

async fn render_form(
    api: &ApiClient,
    session: &PortalSession,
    auth: &Authenticated,
    action: String,
    title: &str,
    form: &RoomForm,
    errors: Vec<String>,
) -> Result<HttpResponse, AppError> {
    let features = api.feature_options(&auth.token).await?;
    let ctx = PageContext::build(session, auth, ROOMS_ROUTE);
    let tmpl = RoomFormTemplate {
        ctx,
        form_action: action,
        form_title: title.to_string(),
        roomname: form.roomname.clone(),
        floor: form.floor.clone(),
        capacity: form.capacity.clone(),
        features: FeatureOption::list(features, &form.features),
        errors,
    };
    render(tmpl)
}

pub async fn new_form(
    api: web::Data<ApiClient>,
    session: PortalSession,
) -> Result<HttpResponse, AppError> {
    let auth = session.authenticated()?;
    render_form(
        &api,
        &session,
        &auth,
        ROOMS_ROUTE.to_string(),
        "Create Room",
        &RoomForm::default(),
        vec![],
    )
    .await
}

pub async fn create(
    api: web::Data<ApiClient>,
    session: PortalSession,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let auth = session.authenticated()?;
    let form = parse_room_form(&body);
    session.verify_csrf(&form.csrf_token)?;
    let action = ROOMS_ROUTE.to_string();

    let input = match validate_room_form(&form) {
        Ok(input) => input,
        Err(errors) => {
            return render_form(&api, &session, &auth, action, "Create Room", &form, errors).await;
        }
    };

    match api.create_room(&auth.token, &input).await {
        Ok(_) => {
            session.flash("Room created successfully");
            Ok(redirect(ROOMS_ROUTE))
        }
        Err(e) if e.is_user_facing() => {
            render_form(&api, &session, &auth, action, "Create Room", &form, e.messages()).await
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
    let room = api.room(&auth.token, id).await?;
    let form = RoomForm {
        roomname: room.roomname.clone(),
        floor: room.floor.to_string(),
        capacity: room.capacity.to_string(),
        features: room.features.iter().map(|f| f.id).collect(),
        csrf_token: String::new(),
    };
    render_form(&api, &session, &auth, format!("{ROOMS_ROUTE}/{id}"), "Edit Room", &form, vec![])
        .await
}

pub async fn update(
    api: web::Data<ApiClient>,
    session: PortalSession,
    path: web::Path<i64>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let auth = session.authenticated()?;
    let form = parse_room_form(&body);
    session.verify_csrf(&form.csrf_token)?;
    let id = path.into_inner();
    let action = format!("{ROOMS_ROUTE}/{id}");

    let input = match validate_room_form(&form) {
        Ok(input) => input,
        Err(errors) => {
            return render_form(&api, &session, &auth, action, "Edit Room", &form, errors).await;
        }
    };

    match api.update_room(&auth.token, id, &input).await {
        Ok(_) => {
            session.flash("Room updated successfully");
            Ok(redirect(ROOMS_ROUTE))
        }
        Err(e) if e.is_user_facing() => {
            render_form(&api, &session, &auth, action, "Edit Room", &form, e.messages()).await
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

    match api.delete_room(&auth.token, id).await {
        Ok(()) => session.flash("Room deleted successfully"),
        Err(e) if e.is_user_facing() => session.flash(&e.messages().join(" ")),
        Err(e) => return Err(e.into()),
    }
    Ok(redirect(ROOMS_ROUTE))
}
