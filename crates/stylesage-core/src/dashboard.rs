//! Dashboard orchestration
//!
//! [`Dashboard`] owns everything the dashboard screen shows and mediates every
//! backend call the screen makes. State lives in a `watch` channel so a
//! front-end can render each transition, including the busy windows between
//! a request starting and settling.
//!
//! Failure handling is uniform: the error is logged and returned, data state
//! is left alone, and the busy flag of the operation is cleared. Nothing is
//! retried.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;
use tracing::{debug, error, info};

use crate::api::Backend;
use crate::config::{ClientConfig, RecommendationOrdering};
use crate::types::{
    AnalyzeRequest, BodyProfile, CategoryFilter, NewUser, Recommendation, RecommendationRequest,
    User, WardrobeItem, DEMO_IMAGE_URL,
};
use crate::{Error, Result};

pub const DEFAULT_OCCASION: &str = "Smart casual dinner";
pub const DEFAULT_WEATHER: &str = "Mild 18C";

/// Everything the dashboard renders
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    pub user: Option<User>,
    /// Most recently added first
    pub wardrobe: Vec<WardrobeItem>,
    pub recommendation: Option<Recommendation>,
    /// A recommendation request is in flight
    pub loading: bool,
    /// An add-item request is in flight
    pub adding: bool,
    pub occasion: String,
    pub weather: String,
    /// Custom image URL input
    pub image_url: String,
    pub profile: BodyProfile,
    pub filter: CategoryFilter,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            user: None,
            wardrobe: Vec::new(),
            recommendation: None,
            loading: false,
            adding: false,
            occasion: DEFAULT_OCCASION.to_string(),
            weather: DEFAULT_WEATHER.to_string(),
            image_url: String::new(),
            profile: BodyProfile::default(),
            filter: CategoryFilter::All,
        }
    }
}

/// Headline numbers shown beside the wardrobe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardStats {
    pub items: usize,
    pub categories: usize,
    pub favorites: usize,
}

impl DashboardState {
    pub fn user_id(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.id.as_str())
    }

    /// Wardrobe as seen through the active filter
    pub fn filtered_wardrobe(&self) -> Vec<&WardrobeItem> {
        self.wardrobe
            .iter()
            .filter(|item| self.filter.matches(item))
            .collect()
    }

    /// Item count per lowercased category; uncategorized items count as `other`
    pub fn counts_by_category(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for item in &self.wardrobe {
            let category = item
                .category
                .as_deref()
                .filter(|c| !c.is_empty())
                .unwrap_or("other")
                .to_lowercase();
            *counts.entry(category).or_insert(0) += 1;
        }
        counts
    }

    /// Count badge for a filter chip, hidden for `all` and empty categories
    pub fn chip_badge(&self, filter: CategoryFilter) -> Option<usize> {
        if filter == CategoryFilter::All {
            return None;
        }
        self.counts_by_category()
            .get(filter.tag())
            .copied()
            .filter(|n| *n > 0)
    }

    pub fn stats(&self) -> DashboardStats {
        DashboardStats {
            items: self.wardrobe.len(),
            categories: self.counts_by_category().len(),
            favorites: usize::from(
                self.recommendation
                    .as_ref()
                    .is_some_and(|rec| rec.is_favorite),
            ),
        }
    }

    /// Whether "Analyze & Save" should be enabled
    pub fn can_add_custom(&self) -> bool {
        !self.image_url.trim().is_empty() && !self.adding
    }
}

/// Client-side controller for the dashboard screen
pub struct Dashboard<B> {
    backend: B,
    identity: NewUser,
    ordering: RecommendationOrdering,
    state: watch::Sender<DashboardState>,
    generation: AtomicU64,
}

impl<B: Backend> Dashboard<B> {
    pub fn new(backend: B, config: &ClientConfig) -> Self {
        let (state, _) = watch::channel(DashboardState::default());
        Self {
            backend,
            identity: NewUser::demo(),
            ordering: config.recommendation_ordering,
            state,
            generation: AtomicU64::new(0),
        }
    }

    /// Use a different identity for ensure-user than the demo seed
    pub fn with_identity(mut self, identity: NewUser) -> Self {
        self.identity = identity;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Observe every state change
    pub fn subscribe(&self) -> watch::Receiver<DashboardState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> DashboardState {
        self.state.borrow().clone()
    }

    /// Read the current state without cloning it
    pub fn with_state<R>(&self, f: impl FnOnce(&DashboardState) -> R) -> R {
        f(&self.state.borrow())
    }

    fn update(&self, f: impl FnOnce(&mut DashboardState)) {
        self.state.send_modify(f);
    }

    fn require_user_id(&self) -> Result<String> {
        self.with_state(|s| s.user_id().map(String::from))
            .ok_or(Error::MissingUser)
    }

    /// Bootstrap: ensure the user exists, then sync the wardrobe if the held
    /// identity changed.
    pub async fn mount(&self) -> Result<()> {
        let previous = self.with_state(|s| s.user_id().map(String::from));
        let user = self.ensure_user().await?;

        if previous.as_deref() != Some(user.id.as_str()) {
            self.sync_wardrobe().await?;
        }
        Ok(())
    }

    /// `POST /users` with the configured identity and hold the result.
    pub async fn ensure_user(&self) -> Result<User> {
        match self.backend.ensure_user(&self.identity).await {
            Ok(user) => {
                info!("Signed in as {}", user.id);
                let held = user.clone();
                self.update(|s| s.user = Some(held));
                Ok(user)
            }
            Err(e) => {
                error!("Failed to ensure user {}: {}", self.identity.email, e);
                Err(e)
            }
        }
    }

    /// Replace the wardrobe wholesale with the backend's list.
    pub async fn sync_wardrobe(&self) -> Result<usize> {
        let user_id = self.require_user_id()?;

        match self.backend.fetch_wardrobe(&user_id).await {
            Ok(items) => {
                let count = items.len();
                debug!("Fetched {} wardrobe items for {}", count, user_id);
                self.update(|s| s.wardrobe = items);
                Ok(count)
            }
            Err(e) => {
                error!("Failed to fetch wardrobe for {}: {}", user_id, e);
                Err(e)
            }
        }
    }

    /// Outfit built from the user's wardrobe for the current occasion and weather.
    pub async fn request_recommendation(&self) -> Result<Recommendation> {
        let user_id = self.require_user_id()?;
        let request = self.with_state(|s| RecommendationRequest {
            user_id,
            occasion: s.occasion.clone(),
            weather: s.weather.clone(),
        });

        let generation = self.begin_recommendation();
        let outcome = self.backend.recommend(&request).await;
        self.settle_recommendation(generation, &outcome);
        outcome
    }

    /// Outfit from body metrics alone; works before any user is loaded.
    pub async fn quick_suggest(&self) -> Result<Recommendation> {
        let profile = self.with_state(|s| s.profile.clone());

        let generation = self.begin_recommendation();
        let outcome = self.backend.recommend_without_wardrobe(&profile).await;
        self.settle_recommendation(generation, &outcome);
        outcome
    }

    fn begin_recommendation(&self) -> u64 {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.update(|s| {
            s.recommendation = None;
            s.loading = true;
        });
        generation
    }

    fn settle_recommendation(&self, generation: u64, outcome: &Result<Recommendation>) {
        if self.ordering == RecommendationOrdering::LatestRequestWins
            && generation != self.generation.load(Ordering::SeqCst)
        {
            debug!("Discarding superseded recommendation #{}", generation);
            return;
        }

        match outcome {
            Ok(rec) => self.update(|s| {
                s.recommendation = Some(rec.clone());
                s.loading = false;
            }),
            Err(e) => {
                error!("Recommendation request #{} failed: {}", generation, e);
                self.update(|s| s.loading = false);
            }
        }
    }

    /// Analyze the image in the URL input and prepend the result.
    ///
    /// On success the input is cleared and the filter goes back to `all`.
    pub async fn add_custom_item(&self) -> Result<WardrobeItem> {
        let user_id = self.require_user_id()?;
        let image_url = self.with_state(|s| s.image_url.trim().to_string());
        if image_url.is_empty() {
            return Err(Error::MissingImageUrl);
        }

        let item = self.add_item(user_id, image_url).await?;
        self.update(|s| {
            s.image_url.clear();
            s.filter = CategoryFilter::All;
        });
        Ok(item)
    }

    /// Analyze the bundled demo image and prepend the result.
    pub async fn add_demo_item(&self) -> Result<WardrobeItem> {
        let user_id = self.require_user_id()?;
        self.add_item(user_id, DEMO_IMAGE_URL.to_string()).await
    }

    async fn add_item(&self, user_id: String, image_url: String) -> Result<WardrobeItem> {
        let request = AnalyzeRequest { user_id, image_url };

        self.update(|s| s.adding = true);
        let outcome = self.backend.analyze_item(&request).await;

        match &outcome {
            Ok(item) => {
                debug!(
                    "Added {} from {}",
                    item.id.as_deref().unwrap_or("item without id"),
                    request.image_url
                );
                let added = item.clone();
                self.update(|s| {
                    s.wardrobe.insert(0, added);
                    s.adding = false;
                });
            }
            Err(e) => {
                error!("Failed to analyze {}: {}", request.image_url, e);
                self.update(|s| s.adding = false);
            }
        }
        outcome
    }

    pub fn set_filter(&self, filter: CategoryFilter) {
        self.update(|s| s.filter = filter);
    }

    pub fn set_occasion(&self, occasion: impl Into<String>) {
        let occasion = occasion.into();
        self.update(|s| s.occasion = occasion);
    }

    pub fn set_weather(&self, weather: impl Into<String>) {
        let weather = weather.into();
        self.update(|s| s.weather = weather);
    }

    pub fn set_image_url(&self, image_url: impl Into<String>) {
        let image_url = image_url.into();
        self.update(|s| s.image_url = image_url);
    }

    pub fn set_profile(&self, profile: BodyProfile) {
        self.update(|s| s.profile = profile);
    }
}
