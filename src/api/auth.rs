use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::{ApiClient, ApiError};
use crate::models::user::User;

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// `data` of a successful `POST /login`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginData {
    pub token: String,
    pub user: User,
}

impl ApiClient {
    /// Exchange credentials for a bearer token.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginData, ApiError> {
        self.send_json(Method::POST, None, "login", &LoginRequest { email, password })
            .await
    }

    /// The user the token belongs to.
    pub async fn profile(&self, token: &str) -> Result<User, ApiError> {
        self.get(token, "User/Profile").await
    }
}
