//! Browser fetch client for the Style Sage backend

use async_trait::async_trait;
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use stylesage_core::api::{endpoint, paths, Backend};
use stylesage_core::{
    AnalyzeRequest, BodyProfile, Error, NewUser, Recommendation, RecommendationRequest, Result,
    User, WardrobeItem,
};

/// [`Backend`] over `fetch`
pub struct GlooBackend {
    base_url: String,
}

impl GlooBackend {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
        }
    }

    async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let url = endpoint(&self.base_url, path);
        tracing::debug!("POST {}", url);

        let response = Request::post(&url)
            .header("Content-Type", "application/json")
            .json(body)
            .map_err(|e| Error::transport(format!("Failed to serialize request: {}", e)))?
            .send()
            .await
            .map_err(|e| Error::transport(format!("Request failed: {}", e)))?;

        read_json(response).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = endpoint(&self.base_url, path);
        tracing::debug!("GET {}", url);

        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| Error::transport(format!("Request failed: {}", e)))?;

        read_json(response).await
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    if !response.ok() {
        let body = response.text().await.unwrap_or_default();
        return Err(Error::status(response.status(), body));
    }

    response
        .json::<T>()
        .await
        .map_err(|e| Error::decode(format!("Failed to parse response: {}", e)))
}

#[async_trait(?Send)]
impl Backend for GlooBackend {
    async fn ensure_user(&self, user: &NewUser) -> Result<User> {
        self.post(paths::USERS, user).await
    }

    async fn fetch_wardrobe(&self, user_id: &str) -> Result<Vec<WardrobeItem>> {
        self.get(&paths::wardrobe(user_id)).await
    }

    async fn analyze_item(&self, request: &AnalyzeRequest) -> Result<WardrobeItem> {
        self.post(paths::ANALYZE, request).await
    }

    async fn recommend(&self, request: &RecommendationRequest) -> Result<Recommendation> {
        self.post(paths::RECOMMENDATIONS, request).await
    }

    async fn recommend_without_wardrobe(&self, profile: &BodyProfile) -> Result<Recommendation> {
        self.post(paths::RECOMMENDATIONS_WITHOUT_WARDROBE, profile)
            .await
    }
}
