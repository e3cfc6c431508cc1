use reqwest::Method;

use super::{ApiClient, ApiError, LOOKUP_PAGE_SIZE, Paginated};
use crate::models::room::{Feature, FeatureFilter, FeatureInput, Room, RoomFilter, RoomInput};

impl ApiClient {
    pub async fn rooms(
        &self,
        token: &str,
        filter: &RoomFilter,
        page: u32,
        per_page: u32,
    ) -> Result<Paginated<Room>, ApiError> {
        self.get_page(token, "Room", filter, page, per_page).await
    }

    /// Rooms for a select box.
    pub async fn room_options(&self, token: &str) -> Result<Vec<Room>, ApiError> {
        let page = self
            .rooms(token, &RoomFilter::default(), 1, LOOKUP_PAGE_SIZE)
            .await?;
        Ok(page.data)
    }

    pub async fn room(&self, token: &str, id: i64) -> Result<Room, ApiError> {
        self.get(token, &format!("Room/{id}")).await
    }

    pub async fn create_room(&self, token: &str, room: &RoomInput) -> Result<Room, ApiError> {
        self.send_json(Method::POST, Some(token), "Room", room).await
    }

    pub async fn update_room(
        &self,
        token: &str,
        id: i64,
        room: &RoomInput,
    ) -> Result<Room, ApiError> {
        self.send_json(Method::PUT, Some(token), &format!("Room/{id}"), room)
            .await
    }

    pub async fn delete_room(&self, token: &str, id: i64) -> Result<(), ApiError> {
        self.delete(token, &format!("Room/{id}")).await
    }

    pub async fn features(
        &self,
        token: &str,
        filter: &FeatureFilter,
        page: u32,
        per_page: u32,
    ) -> Result<Paginated<Feature>, ApiError> {
        self.get_page(token, "Feature", filter, page, per_page).await
    }

    /// Features for the room form checkboxes.
    pub async fn feature_options(&self, token: &str) -> Result<Vec<Feature>, ApiError> {
        let page = self
            .features(token, &FeatureFilter::default(), 1, LOOKUP_PAGE_SIZE)
            .await?;
        Ok(page.data)
    }

    pub async fn feature(&self, token: &str, id: i64) -> Result<Feature, ApiError> {
        self.get(token, &format!("Feature/{id}")).await
    }

    pub async fn create_feature(
        &self,
        token: &str,
        feature: &FeatureInput,
    ) -> Result<Feature, ApiError> {
        self.send_json(Method::POST, Some(token), "Feature", feature)
            .await
    }

    pub async fn update_feature(
        &self,
        token: &str,
        id: i64,
        feature: &FeatureInput,
    ) -> Result<Feature, ApiError> {
        self.send_json(Method::PUT, Some(token), &format!("Feature/{id}"), feature)
            .await
    }

    pub async fn delete_feature(&self, token: &str, id: i64) -> Result<(), ApiError> {
        self.delete(token, &format!("Feature/{id}")).await
    }
}
