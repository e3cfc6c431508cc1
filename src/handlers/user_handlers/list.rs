use actix_web::{HttpResponse, web};

use crate::api::ApiClient;
use crate::auth::session::PortalSession;
use crate::config::PortalConfig;
use crate::errors::{AppError, render};
use crate::handlers::PageParam;
use crate::models::role;
use crate::models::user::UserFilter;
use crate::templates_structs::{PageContext, Pager, UserListTemplate};

/// GET /admin/users: filtered by name, email and role.
pub async fn list(
    api: web::Data<ApiClient>,
    config: web::Data<PortalConfig>,
    session: PortalSession,
    filter: web::Query<UserFilter>,
    page: web::Query<PageParam>,
) -> Result<HttpResponse, AppError> {
    let auth = session.authenticated()?;
    let filter = filter.into_inner();
    let user_page = api
        .users(&auth.token, &filter, page.number(), config.page_size)
        .await?;

    let ctx = PageContext::build(&session, &auth, "/admin/users");
    let pager = Pager::new(&user_page, "/admin/users", &filter);
    let tmpl = UserListTemplate {
        ctx,
        role_options: role::options(&filter.role),
        users: user_page.data,
        filter,
        pager,
    };
    render(tmpl)
}
