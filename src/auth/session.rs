use std::future::{Ready, ready};

use actix_session::{Session, SessionExt};
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use chrono::{DateTime, Utc};

use crate::auth::gate::{self, SessionData, SessionUser};
use crate::errors::AppError;
use crate::models::role::Role;

pub const TOKEN_KEY: &str = "token";
pub const TOKEN_EXP_KEY: &str = "token_exp";
pub const USER_KEY: &str = "user";
pub const FLASH_KEY: &str = "flash";

/// Explicit handle on the portal's cookie session.
///
/// Handlers take this as an extractor instead of reading raw keys, so the
/// persisted layout (`token`, `token_exp`, `user`) lives in one place.
#[derive(Clone)]
pub struct PortalSession {
    inner: Session,
}

/// A session that passed the gate: token and user guaranteed present.
#[derive(Debug, Clone)]
pub struct Authenticated {
    pub token: String,
    pub user: SessionUser,
}

impl Authenticated {
    pub fn role(&self) -> Option<Role> {
        self.user.role()
    }
}

impl PortalSession {
    pub fn new(inner: Session) -> Self {
        Self { inner }
    }

    pub fn raw(&self) -> &Session {
        &self.inner
    }

    /// Read the three session fields. Anything unparseable reads as absent.
    pub fn load(&self) -> SessionData {
        let token = self.inner.get::<String>(TOKEN_KEY).unwrap_or(None);
        let token_exp = self
            .inner
            .get::<String>(TOKEN_EXP_KEY)
            .unwrap_or(None)
            .and_then(|raw| DateTime::parse_from_rfc3339(&raw).ok())
            .map(|dt| dt.with_timezone(&Utc));
        let user = self
            .inner
            .get::<String>(USER_KEY)
            .unwrap_or(None)
            .and_then(|raw| serde_json::from_str::<SessionUser>(&raw).ok());
        SessionData { token, token_exp, user }
    }

    /// Return the authenticated view of the session, or `AppError::Session`.
    pub fn authenticated(&self) -> Result<Authenticated, AppError> {
        let data = self.load();
        if !gate::is_session_valid(&data, Utc::now()) {
            return Err(AppError::Session("No valid session".to_string()));
        }
        match (data.token, data.user) {
            (Some(token), Some(user)) => Ok(Authenticated { token, user }),
            _ => Err(AppError::Session("No valid session".to_string())),
        }
    }

    /// Store a fresh login. All three fields land in the same response cookie.
    pub fn persist(
        &self,
        token: &str,
        token_exp: DateTime<Utc>,
        user: &SessionUser,
    ) -> Result<(), AppError> {
        let user_json = serde_json::to_string(user)
            .map_err(|e| AppError::Session(format!("Failed to encode user: {e}")))?;
        self.inner.renew();
        let result = self
            .inner
            .insert(TOKEN_KEY, token)
            .and_then(|_| self.inner.insert(TOKEN_EXP_KEY, token_exp.to_rfc3339()))
            .and_then(|_| self.inner.insert(USER_KEY, user_json));
        if let Err(e) = result {
            self.clear();
            return Err(AppError::Session(format!("Failed to store session: {e}")));
        }
        Ok(())
    }

    /// Replace the stored user record, keeping token and expiry.
    pub fn update_user(&self, user: &SessionUser) -> Result<(), AppError> {
        let user_json = serde_json::to_string(user)
            .map_err(|e| AppError::Session(format!("Failed to encode user: {e}")))?;
        self.inner
            .insert(USER_KEY, user_json)
            .map_err(|e| AppError::Session(format!("Failed to store session: {e}")))
    }

    /// Drop every session field at once.
    pub fn clear(&self) {
        self.inner.purge();
    }

    pub fn flash(&self, message: &str) {
        if let Err(e) = self.inner.insert(FLASH_KEY, message) {
            log::warn!("Failed to store flash message: {e}");
        }
    }

    pub fn take_flash(&self) -> Option<String> {
        let flash = self.inner.get::<String>(FLASH_KEY).unwrap_or(None);
        if flash.is_some() {
            self.inner.remove(FLASH_KEY);
        }
        flash
    }
}

impl FromRequest for PortalSession {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(Ok(PortalSession::new(req.get_session())))
    }
}
