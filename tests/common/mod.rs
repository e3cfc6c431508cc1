//! Shared fixtures: an in-process stand-in for the booking REST API and
//! helpers for driving the portal through `actix_web::test`.
#![allow(dead_code, unused_macros)]

use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use actix_web::body::MessageBody;
use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeDelta, Utc};
use serde_json::{Value, json};

use roomdesk::api::ApiClient;
use roomdesk::auth::gate::{SessionData, SessionUser};
use roomdesk::models::meeting::Meeting;

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const EMPLOYEE_EMAIL: &str = "employee@example.com";
/// Signs in fine, but every later call with its token answers 401.
pub const REVOKED_EMAIL: &str = "revoked@example.com";
pub const PASSWORD: &str = "secret1";

pub const ADMIN_TOKEN: &str = "admin-token";
pub const EMPLOYEE_TOKEN: &str = "employee-token";
pub const REVOKED_TOKEN: &str = "revoked-token";

/// Email the user endpoints reject with a validation error.
pub const TAKEN_EMAIL: &str = "taken@example.com";
/// Meeting title the meeting endpoint rejects with a validation error.
pub const CLASHING_TITLE: &str = "Clash";
/// Id every `{id}` endpoint answers 404 for.
pub const MISSING_ID: i64 = 999;
/// Answered with 200 and `success: false`.
pub const ARCHIVED_MEETING: i64 = 13;
/// Answered with 200 and a body that is not JSON.
pub const GARBLED_MEETING: i64 = 14;
/// User whose meeting list carries one record with a null start time.
pub const UNTIDY_CALENDAR_USER: i64 = 3;

/// Total rows and pages the paginated endpoints report.
pub const PAGE_TOTAL: u64 = 11;
pub const LAST_PAGE: u32 = 3;

pub const SESSION_COOKIE: &str = "id";

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: String,
    pub authorization: Option<String>,
    pub body: String,
}

pub type RequestLog = Arc<Mutex<Vec<Recorded>>>;

pub struct MockBackend {
    /// Base URL including the `/api` prefix, as `API_BASE_URL` would hold it.
    pub base_url: String,
    pub requests: RequestLog,
}

impl MockBackend {
    pub fn client(&self) -> ApiClient {
        ApiClient::new(&self.base_url, Duration::from_secs(5)).expect("build API client")
    }

    /// Every recorded request whose method and path match.
    pub fn calls(&self, method: &str, path: &str) -> Vec<Recorded> {
        self.requests
            .lock()
            .expect("request log poisoned")
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .cloned()
            .collect()
    }
}

/// Start the mock API on an ephemeral port. Must be called inside an actix
/// runtime (`#[actix_rt::test]` or `#[actix_web::test]`).
pub fn start_mock_backend() -> MockBackend {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind mock backend");
    let port = listener.local_addr().expect("mock backend address").port();
    let requests: RequestLog = Arc::new(Mutex::new(Vec::new()));
    let log = web::Data::new(requests.clone());

    let server = HttpServer::new(move || {
        App::new()
            .app_data(log.clone())
            .default_service(web::to(dispatch))
    })
    .workers(1)
    .listen(listener)
    .expect("listen on mock backend")
    .run();
    actix_rt::spawn(server);

    MockBackend { base_url: format!("http://127.0.0.1:{port}/api"), requests }
}

fn ok(data: Value) -> HttpResponse {
    HttpResponse::Ok().json(json!({ "success": true, "data": data, "message": "OK" }))
}

fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(json!({ "success": false, "message": "Unauthenticated." }))
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(json!({ "success": false, "message": "Not found" }))
}

fn validation(field: &str, message: &str) -> HttpResponse {
    HttpResponse::UnprocessableEntity().json(json!({
        "success": false,
        "message": "Validation Error",
        "data": { field: [message] },
    }))
}

fn query_pairs(query: &str) -> Vec<(String, String)> {
    serde_urlencoded::from_str(query).unwrap_or_default()
}

fn query_value(query: &str, key: &str) -> Option<String> {
    query_pairs(query).into_iter().find(|(k, _)| k == key).map(|(_, v)| v)
}

fn paginated(data: Vec<Value>, query: &str) -> HttpResponse {
    let page = query_value(query, "page").and_then(|p| p.parse::<u32>().ok()).unwrap_or(1);
    let per_page = query_value(query, "per_page").and_then(|p| p.parse::<u32>().ok()).unwrap_or(5);
    ok(json!({
        "data": data,
        "current_page": page,
        "last_page": LAST_PAGE,
        "per_page": per_page,
        "total": PAGE_TOTAL,
    }))
}

pub fn admin_json() -> Value {
    json!({ "id": 1, "name": "Ada Admin", "email": ADMIN_EMAIL, "role": "Admin" })
}

pub fn employee_json() -> Value {
    json!({
        "id": 2,
        "name": "Eve Employee",
        "email": EMPLOYEE_EMAIL,
        "role": "Employee",
        "profile_picture": "profile_pictures/eve.png",
    })
}

fn revoked_json() -> Value {
    json!({ "id": 3, "name": "Rex Revoked", "email": REVOKED_EMAIL, "role": "Employee" })
}

fn room_json() -> Value {
    json!({
        "id": 4,
        "roomname": "Fjord",
        "floor": 2,
        "capacity": 12,
        "features": [{ "id": 1, "title": "Projector", "description": "Ceiling mounted" }],
    })
}

fn feature_json() -> Value {
    json!({ "id": 1, "title": "Projector", "description": "Ceiling mounted" })
}

fn wire(ts: NaiveDateTime) -> String {
    ts.format("%Y-%m-%dT%H:%M:%S").to_string()
}

/// The employee's meetings, placed around the current local time so that
/// one is ongoing, one upcoming and one previous.
pub fn employee_meetings_json() -> Vec<Value> {
    let now = Local::now().naive_local();
    let meeting = |id: i64, title: &str, start: NaiveDateTime, minutes: Value| {
        json!({
            "id": id,
            "title": title,
            "description": format!("{title} description"),
            "startsAt": wire(start),
            "endsAt": wire(start + TimeDelta::hours(1)),
            "status": "Scheduled",
            "room_id": 4,
            "room": room_json(),
            "agendas": [{ "id": id * 10, "description": format!("{title} agenda") }],
            "attendees": [employee_json()],
            "minutes": minutes,
        })
    };
    vec![
        meeting(11, "Planning", now + TimeDelta::days(1), Value::Null),
        meeting(
            10,
            "Standup",
            now - TimeDelta::minutes(30),
            json!({
                "id": 5,
                "discussedPoints": "Sprint status",
                "decisions": "Ship on Friday",
                "attachments": [],
                "action_items": [],
            }),
        ),
        meeting(12, "Retro", now - TimeDelta::days(2), Value::Null),
    ]
}

fn action_items_json() -> Value {
    json!([
        {
            "id": 7,
            "description": "Send notes",
            "status": "Pending",
            "dueDate": "2030-01-01",
            "assignee": employee_json(),
        },
        {
            "id": 8,
            "description": "Book venue",
            "status": "Completed",
            "dueDate": "2030-02-01",
            "assignee": employee_json(),
        }
    ])
}

fn user_for_token(token: Option<&str>) -> Option<Value> {
    match token {
        Some(ADMIN_TOKEN) => Some(admin_json()),
        Some(EMPLOYEE_TOKEN) => Some(employee_json()),
        _ => None,
    }
}

async fn dispatch(
    req: HttpRequest,
    body: web::Bytes,
    log: web::Data<RequestLog>,
) -> HttpResponse {
    let path = req.path().trim_start_matches("/api/").to_string();
    let query = req.query_string().to_string();
    let token = req
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string);
    let body_text = String::from_utf8_lossy(&body).to_string();

    log.lock().expect("request log poisoned").push(Recorded {
        method: req.method().to_string(),
        path: path.clone(),
        query: query.clone(),
        authorization: token.clone(),
        body: body_text.clone(),
    });

    let method = req.method().as_str().to_string();
    let segments: Vec<&str> = path.split('/').collect();

    if method == "POST" && segments == ["login"] {
        let creds: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
        let email = creds["email"].as_str().unwrap_or_default();
        let password = creds["password"].as_str().unwrap_or_default();
        if password != PASSWORD {
            return unauthorized();
        }
        return match email {
            ADMIN_EMAIL => ok(json!({ "token": ADMIN_TOKEN, "user": admin_json() })),
            EMPLOYEE_EMAIL => ok(json!({ "token": EMPLOYEE_TOKEN, "user": employee_json() })),
            REVOKED_EMAIL => ok(json!({ "token": REVOKED_TOKEN, "user": revoked_json() })),
            _ => unauthorized(),
        };
    }

    let Some(current) = user_for_token(token.as_deref()) else {
        return unauthorized();
    };
    let id = |idx: usize| segments.get(idx).and_then(|s| s.parse::<i64>().ok());

    match (method.as_str(), segments.as_slice()) {
        ("GET", ["User", "Profile"]) => ok(current),
        ("GET", ["UserNotPaginated"]) => ok(json!([admin_json(), employee_json()])),
        ("GET", ["User"]) => {
            let mut users = vec![admin_json(), employee_json()];
            if let Some(name) = query_value(&query, "name").filter(|n| !n.is_empty()) {
                users.push(json!({ "id": 20, "name": name, "email": "match@example.com", "role": "Guest" }));
            }
            paginated(users, &query)
        }
        ("POST", ["User"]) => {
            if body_text.contains(TAKEN_EMAIL) {
                return validation("email", "The email has already been taken.");
            }
            let sent: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
            ok(json!({ "id": 21, "name": sent["name"], "email": sent["email"], "role": sent["role"] }))
        }
        (_, ["User", _]) if id(1) == Some(MISSING_ID) => not_found(),
        ("GET", ["User", _]) => match id(1) {
            Some(1) => ok(admin_json()),
            Some(2) => ok(employee_json()),
            _ => not_found(),
        },
        ("POST", ["User", _]) => {
            if body_text.contains(TAKEN_EMAIL) {
                return validation("email", "The email has already been taken.");
            }
            ok(json!({
                "id": id(1),
                "name": "Updated Name",
                "email": "updated@example.com",
                "role": "Employee",
            }))
        }
        ("DELETE", ["User" | "Room" | "Feature", _]) => ok(Value::Null),
        ("GET", ["User", _, "meetings"]) => match id(1) {
            Some(2) => ok(Value::Array(employee_meetings_json())),
            Some(UNTIDY_CALENDAR_USER) => {
                let mut records = employee_meetings_json();
                records.insert(
                    1,
                    json!({ "id": 15, "title": "Unscheduled", "startsAt": null, "endsAt": "soon" }),
                );
                ok(Value::Array(records))
            }
            _ => ok(json!([])),
        },
        ("GET", ["User", _, "ActionItems"]) => match id(1) {
            Some(2) => ok(action_items_json()),
            _ => ok(json!([])),
        },
        ("GET", ["Room"]) => paginated(vec![room_json()], &query),
        ("GET", ["Room", _]) if id(1) == Some(4) => ok(room_json()),
        ("POST", ["Room"]) | ("PUT", ["Room", _]) => ok(room_json()),
        ("GET", ["Feature"]) => paginated(vec![feature_json()], &query),
        ("GET", ["Feature", _]) if id(1) == Some(1) => ok(feature_json()),
        ("POST", ["Feature"]) | ("PUT", ["Feature", _]) => ok(feature_json()),
        ("GET", ["Meeting", _]) if id(1) == Some(ARCHIVED_MEETING) => HttpResponse::Ok()
            .json(json!({ "success": false, "message": "Meeting is archived" })),
        ("GET", ["Meeting", _]) if id(1) == Some(GARBLED_MEETING) => {
            HttpResponse::Ok().body("not json")
        }
        ("GET", ["Meeting", _]) => {
            let wanted = id(1);
            employee_meetings_json()
                .into_iter()
                .find(|m| m["id"].as_i64() == wanted)
                .map(ok)
                .unwrap_or_else(not_found)
        }
        ("POST", ["Meeting"]) => {
            if body_text.contains(CLASHING_TITLE) {
                return validation("room_id", "The room is already booked at that time.");
            }
            ok(json!({}))
        }
        ("PUT", ["Meeting", _])
        | ("POST", ["Minutes"])
        | ("PUT", ["Minutes", _])
        | ("POST", ["Attachment"])
        | ("POST", ["ActionItem"])
        | ("PUT", ["ActionItem", _, "toggle"]) => ok(json!({})),
        _ => not_found(),
    }
}

// --- Fixtures ---------------------------------------------------------------

pub fn at(date: &str, time: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(&format!("{date} {time}"), "%Y-%m-%d %H:%M")
        .expect("valid fixture timestamp")
}

pub fn day(date: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").expect("valid fixture date")
}

/// Minimal meeting spanning `start..end`.
pub fn meeting(id: i64, start: NaiveDateTime, end: NaiveDateTime) -> Meeting {
    Meeting {
        id,
        title: format!("Meeting {id}"),
        description: String::new(),
        starts_at: start,
        ends_at: end,
        status: String::new(),
        room_id: None,
        room: None,
        agendas: vec![],
        attendees: vec![],
        minutes: None,
    }
}

pub fn session_user(role: &str) -> SessionUser {
    SessionUser {
        id: 1,
        name: "Test User".to_string(),
        email: "test@example.com".to_string(),
        role: role.to_string(),
    }
}

/// A complete session expiring at `exp`.
pub fn session(role: &str, exp: DateTime<Utc>) -> SessionData {
    SessionData {
        token: Some("token".to_string()),
        token_exp: Some(exp),
        user: Some(session_user(role)),
    }
}

// --- Portal helpers ---------------------------------------------------------

/// Build the portal app wired to `$backend`, exactly as `main` does apart
/// from the fixed session key. Extra `"/path" => handler` GET routes are
/// registered ahead of the portal's own.
macro_rules! portal_app {
    ($backend:expr $(, $path:literal => $handler:expr)* $(,)?) => {{
        let config = roomdesk::config::PortalConfig {
            api_base_url: $backend.base_url.clone(),
            ..roomdesk::config::PortalConfig::default()
        };
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(
                    actix_session::SessionMiddleware::builder(
                        actix_session::storage::CookieSessionStore::default(),
                        actix_web::cookie::Key::from(&[7u8; 64][..]),
                    )
                    .cookie_secure(false)
                    .build(),
                )
                .app_data(actix_web::web::Data::new(config))
                .app_data(actix_web::web::Data::new($backend.client()))
                $(.route($path, actix_web::web::get().to($handler)))*
                .configure(roomdesk::routes::configure),
        )
        .await
    }};
}

/// Sign in through the real form. Yields the session cookie, the sign-in
/// redirect target and the session's CSRF token.
macro_rules! sign_in {
    ($app:expr, $email:expr) => {{
        let page = actix_web::test::call_service(
            &$app,
            actix_web::test::TestRequest::get().uri("/signin").to_request(),
        )
        .await;
        let cookie = common::session_cookie(&page).expect("sign-in page sets a session cookie");
        let html = String::from_utf8(actix_web::test::read_body(page).await.to_vec())
            .expect("utf-8 sign-in page");
        let csrf = common::csrf_token(&html);
        let resp = actix_web::test::call_service(
            &$app,
            actix_web::test::TestRequest::post()
                .uri("/signin")
                .cookie(cookie)
                .set_form([
                    ("email", $email),
                    ("password", common::PASSWORD),
                    ("csrf_token", csrf.as_str()),
                ])
                .to_request(),
        )
        .await;
        let location = common::location(&resp);
        let cookie = common::session_cookie(&resp).expect("sign-in stores the session");
        (cookie, location, csrf)
    }};
}

/// The session cookie set by `resp`, if any.
pub fn session_cookie<B>(resp: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|c| c.name() == SESSION_COOKIE)
        .map(|c| c.into_owned())
}

pub async fn body_text<B: MessageBody>(resp: ServiceResponse<B>) -> String {
    String::from_utf8(actix_web::test::read_body(resp).await.to_vec()).expect("utf-8 body")
}

pub fn location<B>(resp: &ServiceResponse<B>) -> String {
    resp.headers()
        .get("Location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// Value of the first hidden `csrf_token` input in a rendered page.
pub fn csrf_token(html: &str) -> String {
    let marker = "name=\"csrf_token\" value=\"";
    let start = html.find(marker).expect("page carries a CSRF field") + marker.len();
    let end = html[start..].find('"').expect("CSRF value is quoted") + start;
    html[start..end].to_string()
}
