//! Per-session CSRF tokens for the portal's POST forms.
//!
//! Every rendered page carries the session token in a hidden field and every
//! mutating handler checks it before calling the booking API.

use actix_session::Session;
use rand::Rng;

use crate::auth::session::PortalSession;
use crate::errors::AppError;

const CSRF_KEY: &str = "csrf_token";
const TOKEN_BYTES: usize = 32;

impl PortalSession {
    /// Token to embed in forms. Issued on first use; a stored value the
    /// portal did not issue is replaced.
    pub fn csrf_token(&self) -> String {
        if let Some(token) = stored_token(self.raw()) {
            return token;
        }
        let token = generate_token();
        if let Err(e) = self.raw().insert(CSRF_KEY, &token) {
            log::warn!("Failed to store CSRF token: {e}");
        }
        token
    }

    /// Check a submitted form token against the one held in the session.
    pub fn verify_csrf(&self, submitted: &str) -> Result<(), AppError> {
        match stored_token(self.raw()) {
            Some(stored) if tokens_match(&stored, submitted) => Ok(()),
            Some(_) => {
                log::warn!("Rejected form post: CSRF token mismatch");
                Err(AppError::Csrf)
            }
            None => {
                log::warn!("Rejected form post: no CSRF token issued for this session");
                Err(AppError::Csrf)
            }
        }
    }
}

fn stored_token(session: &Session) -> Option<String> {
    session
        .get::<String>(CSRF_KEY)
        .unwrap_or(None)
        .filter(|token| is_well_formed(token))
}

fn is_well_formed(token: &str) -> bool {
    token.len() == TOKEN_BYTES * 2 && token.bytes().all(|b| b.is_ascii_hexdigit())
}

fn generate_token() -> String {
    let bytes: [u8; TOKEN_BYTES] = rand::rng().random();
    hex::encode(bytes)
}

/// Compare without short-circuiting on the first differing byte.
fn tokens_match(stored: &str, submitted: &str) -> bool {
    stored.len() == submitted.len()
        && stored
            .bytes()
            .zip(submitted.bytes())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
}
