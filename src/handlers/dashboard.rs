use actix_web::{HttpResponse, web};
use chrono::{Local, Timelike};

use crate::api::ApiClient;
use crate::auth::session::PortalSession;
use crate::errors::{AppError, render};
use crate::models::meeting::group_by_day;
use crate::models::minutes;
use crate::models::room::{FeatureFilter, RoomFilter};
use crate::models::user::UserFilter;
use crate::templates_structs::{
    AdminDashboardTemplate, DayGroup, EmployeeDashboardTemplate, PageContext,
};

fn time_greeting(name: &str) -> String {
    let hour = Local::now().hour();
    let period = match hour {
        5..=11 => "Good morning",
        12..=16 => "Good afternoon",
        _ => "Good evening",
    };
    format!("{period}, {name}")
}

/// GET /dashboard: the signed-in user's meetings and action items.
pub async fn index(
    api: web::Data<ApiClient>,
    session: PortalSession,
) -> Result<HttpResponse, AppError> {
    let auth = session.authenticated()?;
    let (meetings, action_items) = tokio::try_join!(
        api.user_meetings(&auth.token, auth.user.id),
        api.user_action_items(&auth.token, auth.user.id),
    )?;

    let ctx = PageContext::build(&session, &auth, "/dashboard");
    let greeting = time_greeting(&ctx.user_name);
    let meeting_count = meetings.len();
    let tally = minutes::tally(&action_items);
    let days = group_by_day(meetings)
        .into_iter()
        .map(|(day, meetings)| DayGroup {
            label: day.format("%A, %B %-d, %Y").to_string(),
            meetings,
        })
        .collect();

    let tmpl = EmployeeDashboardTemplate {
        ctx,
        greeting,
        meeting_count,
        tally,
        days,
        action_items,
    };
    render(tmpl)
}

/// GET /admin/dashboard: totals taken from each paginator.
pub async fn admin_index(
    api: web::Data<ApiClient>,
    session: PortalSession,
) -> Result<HttpResponse, AppError> {
    let auth = session.authenticated()?;
    let user_filter = UserFilter::default();
    let room_filter = RoomFilter::default();
    let feature_filter = FeatureFilter::default();
    let (users, rooms, features) = tokio::try_join!(
        api.users(&auth.token, &user_filter, 1, 1),
        api.rooms(&auth.token, &room_filter, 1, 1),
        api.features(&auth.token, &feature_filter, 1, 1),
    )?;

    let ctx = PageContext::build(&session, &auth, "/admin/dashboard");
    let greeting = time_greeting(&ctx.user_name);
    let tmpl = AdminDashboardTemplate {
        ctx,
        greeting,
        user_count: users.total,
        room_count: rooms.total,
        feature_count: features.total,
    };
    render(tmpl)
}
