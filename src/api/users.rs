use reqwest::{Method, multipart};

use super::{ApiClient, ApiError, Paginated};
use crate::models::user::{NewUser, User, UserFilter, UserUpdate};

impl ApiClient {
    pub async fn users(
        &self,
        token: &str,
        filter: &UserFilter,
        page: u32,
        per_page: u32,
    ) -> Result<Paginated<User>, ApiError> {
        self.get_page(token, "User", filter, page, per_page).await
    }

    /// Every user, for attendee pickers.
    pub async fn all_users(&self, token: &str) -> Result<Vec<User>, ApiError> {
        self.get(token, "UserNotPaginated").await
    }

    pub async fn user(&self, token: &str, id: i64) -> Result<User, ApiError> {
        self.get(token, &format!("User/{id}")).await
    }

    pub async fn create_user(&self, token: &str, user: &NewUser) -> Result<User, ApiError> {
        self.send_json(Method::POST, Some(token), "User", user).await
    }

    /// Update a user. The API only accepts file uploads on POST, so the
    /// update travels as multipart with a `_method=PUT` override.
    pub async fn update_user(
        &self,
        token: &str,
        id: i64,
        update: UserUpdate,
    ) -> Result<User, ApiError> {
        let mut form = multipart::Form::new()
            .text("_method", "PUT")
            .text("name", update.name)
            .text("email", update.email)
            .text("role", update.role);

        if let Some(password) = update.password.filter(|p| !p.is_empty()) {
            form = form
                .text("password", password)
                .text("password_confirmation", update.password_confirmation.unwrap_or_default());
        }

        if let Some(upload) = update.profile_picture {
            let mut part = multipart::Part::bytes(upload.bytes).file_name(upload.file_name);
            if let Some(ct) = upload.content_type {
                part = part.mime_str(&ct)?;
            }
            form = form.part("profile_picture", part);
        }

        self.send_multipart(token, &format!("User/{id}"), form).await
    }

    pub async fn delete_user(&self, token: &str, id: i64) -> Result<(), ApiError> {
        self.delete(token, &format!("User/{id}")).await
    }
}
