use actix_web::middleware::from_fn;
use actix_web::{HttpResponse, web};

use crate::auth::middleware::{require_admin, require_auth};
use crate::errors::NOT_FOUND_PAGE;
use crate::handlers;

pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound()
        .content_type("text/html; charset=utf-8")
        .body(NOT_FOUND_PAGE)
}

/// Register every portal route. Shared by `main` and the integration tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        // Static files
        .service(actix_files::Files::new("/static", "./static"))
        // Public routes
        .route("/", web::get().to(handlers::auth_handlers::root))
        .route("/signin", web::get().to(handlers::auth_handlers::login_page))
        .route("/signin", web::post().to(handlers::auth_handlers::login_submit))
        // Protected routes
        .service(
            web::scope("")
                .wrap(from_fn(require_auth))
                .route("/logout", web::post().to(handlers::auth_handlers::logout))
                .route("/dashboard", web::get().to(handlers::dashboard::index))
                .route("/profile", web::get().to(handlers::profile_handlers::show))
                .route("/profile", web::post().to(handlers::profile_handlers::update))
                // Meetings: fixed paths BEFORE /meetings/{id}
                .route("/meetings", web::get().to(handlers::meeting_handlers::list))
                .route("/meetings", web::post().to(handlers::meeting_handlers::create))
                .route("/meetings/new", web::get().to(handlers::meeting_handlers::new_form))
                .route("/meetings/calendar", web::get().to(handlers::meeting_handlers::calendar))
                .route(
                    "/meetings/calendar/events",
                    web::get().to(handlers::meeting_handlers::calendar_events),
                )
                .route("/meetings/{id}", web::get().to(handlers::meeting_handlers::detail))
                .route(
                    "/meetings/{id}/agendas",
                    web::post().to(handlers::meeting_handlers::save_agendas),
                )
                .route(
                    "/meetings/{id}/minutes",
                    web::post().to(handlers::meeting_handlers::save_minutes),
                )
                .route(
                    "/meetings/{id}/attachments",
                    web::post().to(handlers::meeting_handlers::upload_attachment),
                )
                .route(
                    "/meetings/{id}/action-items",
                    web::post().to(handlers::meeting_handlers::add_action_item),
                )
                // Action items
                .route("/action-items", web::get().to(handlers::action_item_handlers::list))
                .route(
                    "/action-items/{id}/toggle",
                    web::post().to(handlers::action_item_handlers::toggle),
                )
                // Admin
                .service(
                    web::scope("/admin")
                        .wrap(from_fn(require_admin))
                        .route("/dashboard", web::get().to(handlers::dashboard::admin_index))
                        // Users: /users/new BEFORE /users/{id}
                        .route("/users", web::get().to(handlers::user_handlers::list))
                        .route("/users/new", web::get().to(handlers::user_handlers::new_form))
                        .route("/users", web::post().to(handlers::user_handlers::create))
                        .route("/users/{id}/edit", web::get().to(handlers::user_handlers::edit_form))
                        .route("/users/{id}", web::post().to(handlers::user_handlers::update))
                        .route("/users/{id}/delete", web::post().to(handlers::user_handlers::delete))
                        // Rooms
                        .route("/rooms", web::get().to(handlers::room_handlers::list))
                        .route("/rooms/new", web::get().to(handlers::room_handlers::new_form))
                        .route("/rooms", web::post().to(handlers::room_handlers::create))
                        .route("/rooms/{id}/edit", web::get().to(handlers::room_handlers::edit_form))
                        .route("/rooms/{id}", web::post().to(handlers::room_handlers::update))
                        .route("/rooms/{id}/delete", web::post().to(handlers::room_handlers::delete))
                        // Features
                        .route("/features", web::get().to(handlers::feature_handlers::list))
                        .route("/features/new", web::get().to(handlers::feature_handlers::new_form))
                        .route("/features", web::post().to(handlers::feature_handlers::create))
                        .route(
                            "/features/{id}/edit",
                            web::get().to(handlers::feature_handlers::edit_form),
                        )
                        .route("/features/{id}", web::post().to(handlers::feature_handlers::update))
                        .route(
                            "/features/{id}/delete",
                            web::post().to(handlers::feature_handlers::delete),
                        ),
                ),
        )
        // Default 404 handler (must be registered last)
        .default_service(web::to(not_found));
}
