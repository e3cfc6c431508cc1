use std::time::Duration;

use chrono::TimeDelta;

/// Runtime settings, read once at startup from the environment (and `.env`).
#[derive(Debug, Clone)]
pub struct PortalConfig {
    /// Base URL of the booking REST API, e.g. `http://127.0.0.1:8000/api`.
    pub api_base_url: String,
    /// Where uploaded files (profile pictures) are served from.
    pub asset_base_url: String,
    pub bind_addr: String,
    /// Raw session key; `None` when missing or shorter than 64 bytes.
    pub session_key: Option<Vec<u8>>,
    /// Lifetime of a portal session after sign-in.
    pub session_days: i64,
    /// Rows per page on the admin tables.
    pub page_size: u32,
    pub api_timeout: Duration,
    pub cookie_secure: bool,
}

pub const MIN_SESSION_KEY_LEN: usize = 64;
pub const MAX_SESSION_DAYS: i64 = 365;

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:8000/api".to_string(),
            asset_base_url: "http://127.0.0.1:8000".to_string(),
            bind_addr: "127.0.0.1:8080".to_string(),
            session_key: None,
            session_days: 7,
            page_size: 5,
            api_timeout: Duration::from_secs(15),
            cookie_secure: false,
        }
    }
}

impl PortalConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unset keys keep their defaults; unparseable
    /// numbers fall back to the default with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let text = |key: &str, default: String| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(default)
        };

        let session_key = match lookup("SESSION_KEY") {
            Some(val) if val.len() >= MIN_SESSION_KEY_LEN => Some(val.into_bytes()),
            Some(val) => {
                log::warn!(
                    "SESSION_KEY too short ({} bytes, need {}+), ignoring it",
                    val.len(),
                    MIN_SESSION_KEY_LEN
                );
                None
            }
            None => None,
        };

        Self {
            api_base_url: text("API_BASE_URL", defaults.api_base_url)
                .trim_end_matches('/')
                .to_string(),
            asset_base_url: text("ASSET_BASE_URL", defaults.asset_base_url)
                .trim_end_matches('/')
                .to_string(),
            bind_addr: text("BIND_ADDR", defaults.bind_addr),
            session_key,
            session_days: parse_or(&lookup, "SESSION_DAYS", defaults.session_days, |d| {
                (1..=MAX_SESSION_DAYS).contains(d)
            }),
            page_size: parse_or(&lookup, "PAGE_SIZE", defaults.page_size, |n| *n > 0),
            api_timeout: Duration::from_secs(parse_or(
                &lookup,
                "API_TIMEOUT_SECS",
                defaults.api_timeout.as_secs(),
                |s| *s > 0,
            )),
            cookie_secure: parse_or(&lookup, "COOKIE_SECURE", defaults.cookie_secure, |_| true),
        }
    }

    pub fn session_ttl(&self) -> TimeDelta {
        TimeDelta::try_days(self.session_days).unwrap_or_else(|| TimeDelta::days(7))
    }

    /// Absolute URL for a stored file path such as `profile_pictures/x.png`.
    pub fn asset_url(&self, path: &str) -> String {
        format!("{}/{}", self.asset_base_url, path.trim_start_matches('/'))
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T, valid: impl Fn(&T) -> bool) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr + std::fmt::Debug,
{
    match lookup(key) {
        None => default,
        Some(raw) => match raw.trim().parse::<T>() {
            Ok(v) if valid(&v) => v,
            _ => {
                log::warn!("Invalid {key}={raw:?}, using default {default:?}");
                default
            }
        },
    }
}
