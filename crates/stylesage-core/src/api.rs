//! Backend interface
//!
//! Every backend call the dashboard makes goes through [`Backend`]. The trait
//! is `?Send` because browser fetch futures are not `Send`.

use async_trait::async_trait;

use crate::types::{
    AnalyzeRequest, BodyProfile, NewUser, Recommendation, RecommendationRequest, User,
    WardrobeItem,
};
use crate::Result;

/// Backend endpoint paths, relative to the configured base URL
pub mod paths {
    pub const USERS: &str = "/users";
    pub const ANALYZE: &str = "/wardrobe/analyze";
    pub const RECOMMENDATIONS: &str = "/recommendations";
    pub const RECOMMENDATIONS_WITHOUT_WARDROBE: &str = "/recommendations/without-wardrobe";

    pub fn wardrobe(user_id: &str) -> String {
        format!("/users/{}/wardrobe", user_id)
    }
}

/// Build an absolute endpoint URL
pub fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

/// Style Sage backend operations
#[async_trait(?Send)]
pub trait Backend {
    /// `POST /users` - create or update the user by email
    async fn ensure_user(&self, user: &NewUser) -> Result<User>;

    /// `GET /users/{id}/wardrobe`
    async fn fetch_wardrobe(&self, user_id: &str) -> Result<Vec<WardrobeItem>>;

    /// `POST /wardrobe/analyze` - classify the image and store it as an item
    async fn analyze_item(&self, request: &AnalyzeRequest) -> Result<WardrobeItem>;

    /// `POST /recommendations`
    async fn recommend(&self, request: &RecommendationRequest) -> Result<Recommendation>;

    /// `POST /recommendations/without-wardrobe`
    async fn recommend_without_wardrobe(&self, profile: &BodyProfile) -> Result<Recommendation>;
}

#[async_trait(?Send)]
impl<B: Backend + ?Sized> Backend for std::rc::Rc<B> {
    async fn ensure_user(&self, user: &NewUser) -> Result<User> {
        (**self).ensure_user(user).await
    }

    async fn fetch_wardrobe(&self, user_id: &str) -> Result<Vec<WardrobeItem>> {
        (**self).fetch_wardrobe(user_id).await
    }

    async fn analyze_item(&self, request: &AnalyzeRequest) -> Result<WardrobeItem> {
        (**self).analyze_item(request).await
    }

    async fn recommend(&self, request: &RecommendationRequest) -> Result<Recommendation> {
        (**self).recommend(request).await
    }

    async fn recommend_without_wardrobe(&self, profile: &BodyProfile) -> Result<Recommendation> {
        (**self).recommend_without_wardrobe(profile).await
    }
}
