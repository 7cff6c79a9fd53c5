//! reqwest-backed [`Backend`] for native front-ends

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::api::{endpoint, paths, Backend};
use crate::config::ClientConfig;
use crate::types::{
    AnalyzeRequest, BodyProfile, NewUser, Recommendation, RecommendationRequest, User,
    WardrobeItem,
};
use crate::{Error, Result};

/// HTTP client for the Style Sage backend
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    /// Build a client from resolved configuration.
    ///
    /// A configured timeout applies to every request; without one a request
    /// may wait forever.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| Error::InvalidConfig(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.backend_base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = endpoint(&self.base_url, path);
        debug!("POST {}", url);
        let response = self.client.post(&url).json(body).send().await?;
        Self::read_json(response).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = endpoint(&self.base_url, path);
        debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        Self::read_json(response).await
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::status(status.as_u16(), body));
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait(?Send)]
impl Backend for HttpBackend {
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
