use actix_multipart::form::MultipartFormConfig;
use actix_session::{SessionMiddleware, config::PersistentSession, storage::CookieSessionStore};
use actix_web::{App, HttpServer, cookie::{Key, time::Duration}, middleware, web};

use roomdesk::api::ApiClient;
use roomdesk::config::PortalConfig;
use roomdesk::routes;

/// Upload ceiling for attachments and profile pictures.
const UPLOAD_LIMIT: usize = 10 * 1024 * 1024;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = PortalConfig::from_env();

    // Session encryption key. Sessions are lost on restart without SESSION_KEY
    let secret_key = match &config.session_key {
        Some(bytes) => {
            log::info!("Using SESSION_KEY from environment");
            Key::from(bytes.as_slice())
        }
        None => {
            log::warn!("No usable SESSION_KEY set, generating random key (sessions lost on restart)");
            Key::generate()
        }
    };

    let api = ApiClient::new(&config.api_base_url, config.api_timeout)
        .map_err(|e| std::io::Error::other(format!("Failed to build API client: {e}")))?;

    log::info!(
        "Starting server at http://{} (API {})",
        config.bind_addr,
        api.base_url()
    );

    let bind_addr = config.bind_addr.clone();
    let config = web::Data::new(config);
    let api = web::Data::new(api);

    HttpServer::new(move || {
        let session_mw = SessionMiddleware::builder(
            CookieSessionStore::default(),
            secret_key.clone(),
        )
        .cookie_secure(config.cookie_secure)
        .cookie_http_only(true)
        .session_lifecycle(
            PersistentSession::default().session_ttl(Duration::days(config.session_days)),
        )
        .build();

        App::new()
            .wrap(session_mw)
            .wrap(middleware::Logger::default())
            .app_data(config.clone())
            .app_data(api.clone())
            .app_data(
                MultipartFormConfig::default()
                    .total_limit(UPLOAD_LIMIT)
                    .memory_limit(UPLOAD_LIMIT),
            )
            .configure(routes::configure)
    })
    .bind(bind_addr)?
    .run()
    .await
}
