//! Typed client for the booking REST API.
//!
//! Every backend call the portal makes goes through [`ApiClient`]. Responses
//! use a `{ success, data, message }` envelope; list endpoints wrap a
//! paginator inside `data`.

use std::fmt;
use std::time::Duration;

use reqwest::{Method, RequestBuilder, StatusCode, multipart};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

mod auth;
mod meetings;
mod rooms;
mod users;

pub use auth::LoginData;

/// Message the API uses to flag field validation failures.
pub const VALIDATION_MESSAGE: &str = "Validation Error";

/// Upper bound used when a select box needs "all" rooms or features.
pub const LOOKUP_PAGE_SIZE: u32 = 100;

#[derive(Debug)]
pub enum ApiError {
    /// Connection, timeout or body read failure.
    Transport(reqwest::Error),
    /// 401 from the API; the stored token is no longer accepted.
    Unauthorized,
    NotFound,
    /// Field validation messages, flattened in key order.
    Validation(Vec<String>),
    /// Any other non-success answer.
    Rejected { status: u16, message: String },
    /// Success status but a body we could not decode.
    Decode(String),
}

impl ApiError {
    /// Messages suitable for a form's error list.
    pub fn messages(&self) -> Vec<String> {
        match self {
            ApiError::Validation(msgs) => msgs.clone(),
            ApiError::Rejected { message, .. } if !message.is_empty() => vec![message.clone()],
            _ => vec!["The booking service could not complete the request".to_string()],
        }
    }

    /// Whether the error should be shown to the user next to the form rather
    /// than as an error page.
    pub fn is_user_facing(&self) -> bool {
        matches!(self, ApiError::Validation(_) | ApiError::Rejected { .. })
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport(e) => write!(f, "transport error: {e}"),
            ApiError::Unauthorized => write!(f, "unauthorized"),
            ApiError::NotFound => write!(f, "not found"),
            ApiError::Validation(msgs) => write!(f, "validation failed: {}", msgs.join("; ")),
            ApiError::Rejected { status, message } => write!(f, "rejected ({status}): {message}"),
            ApiError::Decode(e) => write!(f, "decode error: {e}"),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Transport(e)
    }
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    success: Option<bool>,
    data: Option<T>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<serde_json::Value>,
}

/// Laravel-style paginator as nested in the envelope's `data`.
#[derive(Debug, Clone, Deserialize)]
pub struct Paginated<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default = "first_page")]
    pub current_page: u32,
    #[serde(default = "first_page")]
    pub last_page: u32,
    #[serde(default)]
    pub per_page: u32,
    #[serde(default)]
    pub total: u64,
}

fn first_page() -> u32 {
    1
}

impl<T> Paginated<T> {
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.last_page
    }
}

#[derive(Debug, Serialize)]
struct PageQuery<'a, F: Serialize> {
    #[serde(flatten)]
    filter: &'a F,
    page: u32,
    per_page: u32,
}

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let builder = self
            .http
            .request(method, self.url(path))
            .header(reqwest::header::ACCEPT, "application/json");
        match token {
            Some(t) => builder.bearer_auth(t),
            None => builder,
        }
    }

    async fn get<T: DeserializeOwned>(&self, token: &str, path: &str) -> Result<T, ApiError> {
        let resp = self.request(Method::GET, path, Some(token)).send().await?;
        read_envelope(resp).await
    }

    /// Fetch a list, keeping the records that decode and logging the rest.
    async fn get_each<T: DeserializeOwned>(
        &self,
        token: &str,
        path: &str,
    ) -> Result<Vec<T>, ApiError> {
        let records: Vec<serde_json::Value> = self.get(token, path).await?;
        Ok(decode_each(records, path))
    }

    async fn get_page<T, F>(
        &self,
        token: &str,
        path: &str,
        filter: &F,
        page: u32,
        per_page: u32,
    ) -> Result<Paginated<T>, ApiError>
    where
        T: DeserializeOwned,
        F: Serialize,
    {
        let query = PageQuery { filter, page, per_page };
        let resp = self
            .request(Method::GET, path, Some(token))
            .query(&query)
            .send()
            .await?;
        read_envelope(resp).await
    }

    async fn send_json<T, B>(
        &self,
        method: Method,
        token: Option<&str>,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let resp = self.request(method, path, token).json(body).send().await?;
        read_envelope(resp).await
    }

    async fn send_multipart<T: DeserializeOwned>(
        &self,
        token: &str,
        path: &str,
        form: multipart::Form,
    ) -> Result<T, ApiError> {
        let resp = self
            .request(Method::POST, path, Some(token))
            .multipart(form)
            .send()
            .await?;
        read_envelope(resp).await
    }

    async fn delete(&self, token: &str, path: &str) -> Result<(), ApiError> {
        let resp = self.request(Method::DELETE, path, Some(token)).send().await?;
        read_envelope::<serde_json::Value>(resp).await.map(|_| ())
    }
}

/// Unwrap the envelope, mapping failure statuses onto [`ApiError`].
async fn read_envelope<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ApiError> {
    let status = resp.status();
    let body = resp.bytes().await?;

    if status == StatusCode::UNAUTHORIZED {
        return Err(ApiError::Unauthorized);
    }
    if status == StatusCode::NOT_FOUND {
        return Err(ApiError::NotFound);
    }
    if !status.is_success() {
        return Err(error_from_body(status.as_u16(), &body));
    }

    let envelope: Envelope<T> =
        serde_json::from_slice(&body).map_err(|e| ApiError::Decode(e.to_string()))?;
    if envelope.success == Some(false) {
        return Err(ApiError::Rejected {
            status: status.as_u16(),
            message: envelope.message.unwrap_or_default(),
        });
    }
    match envelope.data {
        Some(data) => Ok(data),
        None => serde_json::from_value(serde_json::Value::Null)
            .map_err(|_| ApiError::Decode("response has no data".to_string())),
    }
}

fn decode_each<T: DeserializeOwned>(records: Vec<serde_json::Value>, path: &str) -> Vec<T> {
    records
        .into_iter()
        .filter_map(|record| {
            let id = record.get("id").cloned().unwrap_or_default();
            match serde_json::from_value(record) {
                Ok(item) => Some(item),
                Err(e) => {
                    log::warn!("Skipping record {id} from {path}: {e}");
                    None
                }
            }
        })
        .collect()
}

fn error_from_body(status: u16, body: &[u8]) -> ApiError {
    let parsed: Option<ErrorEnvelope> = serde_json::from_slice(body).ok();
    let Some(envelope) = parsed else {
        return ApiError::Rejected { status, message: String::new() };
    };
    let message = envelope.message.unwrap_or_default();
    if message == VALIDATION_MESSAGE {
        return ApiError::Validation(flatten_validation(envelope.data.as_ref()));
    }
    ApiError::Rejected { status, message }
}

/// `{ field: [msg, ...], ... }` into a flat message list.
pub fn flatten_validation(data: Option<&serde_json::Value>) -> Vec<String> {
    let Some(serde_json::Value::Object(fields)) = data else {
        return vec![VALIDATION_MESSAGE.to_string()];
    };
    let mut messages = Vec::new();
    for value in fields.values() {
        match value {
            serde_json::Value::Array(items) => messages.extend(
                items.iter().filter_map(|m| m.as_str().map(str::to_string)),
            ),
            serde_json::Value::String(s) => messages.push(s.clone()),
            _ => {}
        }
    }
    if messages.is_empty() {
        messages.push(VALIDATION_MESSAGE.to_string());
    }
    messages
}
