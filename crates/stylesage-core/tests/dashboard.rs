//! Dashboard behavior against a scripted in-memory backend

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use serde_json::json;
    use std::cell::RefCell;
    use std::collections::{BTreeMap, VecDeque};
    use stylesage_core::{
        AnalyzeRequest, Backend, BodyProfile, BodyType, CategoryFilter, ClientConfig, Dashboard,
        Error, NewUser, Recommendation, RecommendationOrdering, RecommendationRequest, Result,
        User, WardrobeItem, DEMO_IMAGE_URL,
    };
    use tokio::sync::oneshot;

    /// A reply that is either ready or released later by the test
    enum Reply<T> {
        Now(Result<T>),
        Later(oneshot::Receiver<Result<T>>),
    }

    impl<T> Reply<T> {
        async fn resolve(self) -> Result<T> {
            match self {
                Reply::Now(result) => result,
                Reply::Later(rx) => rx
                    .await
                    .unwrap_or_else(|_| Err(Error::transport("reply dropped"))),
            }
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        EnsureUser(NewUser),
        FetchWardrobe(String),
        Analyze(AnalyzeRequest),
        Recommend(RecommendationRequest),
        RecommendWithoutWardrobe(BodyProfile),
    }

    #[derive(Default)]
    struct ScriptedBackend {
        users: RefCell<VecDeque<Reply<User>>>,
        wardrobes: RefCell<VecDeque<Reply<Vec<WardrobeItem>>>>,
        analyses: RefCell<VecDeque<Reply<WardrobeItem>>>,
        recommendations: RefCell<VecDeque<Reply<Recommendation>>>,
        calls: RefCell<Vec<Call>>,
    }

    impl ScriptedBackend {
        fn user(self, reply: Result<User>) -> Self {
            self.users.borrow_mut().push_back(Reply::Now(reply));
            self
        }

        fn wardrobe(self, reply: Result<Vec<WardrobeItem>>) -> Self {
            self.wardrobes.borrow_mut().push_back(Reply::Now(reply));
            self
        }

        fn analysis(self, reply: Result<WardrobeItem>) -> Self {
            self.analyses.borrow_mut().push_back(Reply::Now(reply));
            self
        }

        fn recommendation(self, reply: Result<Recommendation>) -> Self {
            self.recommendations.borrow_mut().push_back(Reply::Now(reply));
            self
        }

        fn gated_analysis(&self) -> oneshot::Sender<Result<WardrobeItem>> {
            let (tx, rx) = oneshot::channel();
            self.analyses.borrow_mut().push_back(Reply::Later(rx));
            tx
        }

        fn gated_recommendation(&self) -> oneshot::Sender<Result<Recommendation>> {
            let (tx, rx) = oneshot::channel();
            self.recommendations.borrow_mut().push_back(Reply::Later(rx));
            tx
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.borrow().clone()
        }

        fn record(&self, call: Call) {
            self.calls.borrow_mut().push(call);
        }
    }

    fn next<T>(queue: &RefCell<VecDeque<Reply<T>>>) -> Reply<T> {
        queue
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Reply::Now(Err(Error::transport("no scripted reply"))))
    }

    #[async_trait(?Send)]
    impl Backend for ScriptedBackend {
        async fn ensure_user(&self, user: &NewUser) -> Result<User> {
            self.record(Call::EnsureUser(user.clone()));
            next(&self.users).resolve().await
        }

        async fn fetch_wardrobe(&self, user_id: &str) -> Result<Vec<WardrobeItem>> {
            self.record(Call::FetchWardrobe(user_id.to_string()));
            next(&self.wardrobes).resolve().await
        }

        async fn analyze_item(&self, request: &AnalyzeRequest) -> Result<WardrobeItem> {
            self.record(Call::Analyze(request.clone()));
            next(&self.analyses).resolve().await
        }

        async fn recommend(&self, request: &RecommendationRequest) -> Result<Recommendation> {
            self.record(Call::Recommend(request.clone()));
            next(&self.recommendations).resolve().await
        }

        async fn recommend_without_wardrobe(
            &self,
            profile: &BodyProfile,
        ) -> Result<Recommendation> {
            self.record(Call::RecommendWithoutWardrobe(profile.clone()));
            next(&self.recommendations).resolve().await
        }
    }

    fn user(id: &str) -> User {
        serde_json::from_value(json!({
            "_id": id,
            "email": "demo@stylesage.ai",
            "name": "Demo User",
            "height_cm": 180,
            "weight_kg": 75,
            "style_preferences": ["classic", "minimalist"]
        }))
        .unwrap()
    }

    fn item(id: &str, category: &str) -> WardrobeItem {
        serde_json::from_value(json!({ "_id": id, "category": category })).unwrap()
    }

    fn outfit(name: &str) -> Recommendation {
        serde_json::from_value(json!({
            "outfit_name": name,
            "justification": "Balanced proportions",
            "items": [{ "category": "shirt", "color": "white" }]
        }))
        .unwrap()
    }

    fn ids(items: &[WardrobeItem]) -> Vec<&str> {
        items.iter().map(|i| i.id.as_deref().unwrap_or_default()).collect()
    }

    fn dashboard(backend: ScriptedBackend) -> Dashboard<ScriptedBackend> {
        Dashboard::new(backend, &ClientConfig::default())
    }

    async fn mounted(backend: ScriptedBackend) -> Dashboard<ScriptedBackend> {
        let dashboard = dashboard(backend);
        dashboard.mount().await.unwrap();
        dashboard
    }

    #[tokio::test]
    async fn test_mount_demo_user_with_empty_wardrobe() {
        let dashboard = mounted(ScriptedBackend::default().user(Ok(user("u1"))).wardrobe(Ok(vec![]))).await;

        let state = dashboard.snapshot();
        assert_eq!(state.user_id(), Some("u1"));
        assert!(state.filtered_wardrobe().is_empty());
        assert_eq!(state.counts_by_category(), BTreeMap::new());
        assert_eq!(
            dashboard.backend().calls(),
            vec![
                Call::EnsureUser(NewUser::demo()),
                Call::FetchWardrobe("u1".into())
            ]
        );
    }

    #[tokio::test]
    async fn test_failed_ensure_user_leaves_dashboard_inert() {
        let dashboard = dashboard(
            ScriptedBackend::default()
                .user(Err(Error::transport("connection refused")))
                .recommendation(Ok(outfit("Weekend Classic"))),
        );

        assert!(dashboard.mount().await.is_err());
        assert!(dashboard.snapshot().user.is_none());

        assert!(matches!(
            dashboard.request_recommendation().await,
            Err(Error::MissingUser)
        ));
        assert!(matches!(dashboard.add_demo_item().await, Err(Error::MissingUser)));
        dashboard.set_image_url("https://img/coat.jpg");
        assert!(matches!(dashboard.add_custom_item().await, Err(Error::MissingUser)));
        assert!(matches!(dashboard.sync_wardrobe().await, Err(Error::MissingUser)));

        let state = dashboard.snapshot();
        assert!(!state.loading && !state.adding);
        assert_eq!(
            dashboard.backend().calls(),
            vec![Call::EnsureUser(NewUser::demo())]
        );

        // No user needed for the wardrobe-free path
        let rec = dashboard.quick_suggest().await.unwrap();
        assert_eq!(dashboard.snapshot().recommendation, Some(rec));
    }

    #[tokio::test]
    async fn test_remount_with_same_identity_does_not_resync() {
        let dashboard = mounted(
            ScriptedBackend::default()
                .user(Ok(user("u1")))
                .wardrobe(Ok(vec![item("a", "jacket")]))
                .user(Ok(user("u1"))),
        )
        .await;

        dashboard.mount().await.unwrap();

        let fetches = dashboard
            .backend()
            .calls()
            .into_iter()
            .filter(|c| matches!(c, Call::FetchWardrobe(_)))
            .count();
        assert_eq!(fetches, 1);
        assert_eq!(ids(&dashboard.snapshot().wardrobe), vec!["a"]);
    }

    #[tokio::test]
    async fn test_sync_replaces_wardrobe_wholesale() {
        let dashboard = mounted(
            ScriptedBackend::default()
                .user(Ok(user("u1")))
                .wardrobe(Ok(vec![item("a", "jacket"), item("b", "shoes")]))
                .wardrobe(Ok(vec![item("c", "dress")])),
        )
        .await;
        assert_eq!(ids(&dashboard.snapshot().wardrobe), vec!["a", "b"]);

        assert_eq!(dashboard.sync_wardrobe().await.unwrap(), 1);
        assert_eq!(ids(&dashboard.snapshot().wardrobe), vec!["c"]);
    }

    #[tokio::test]
    async fn test_failed_sync_keeps_previous_wardrobe() {
        let dashboard = mounted(
            ScriptedBackend::default()
                .user(Ok(user("u1")))
                .wardrobe(Ok(vec![item("a", "jacket")]))
                .wardrobe(Err(Error::status(502, "bad gateway"))),
        )
        .await;

        assert!(dashboard.sync_wardrobe().await.is_err());
        assert_eq!(ids(&dashboard.snapshot().wardrobe), vec!["a"]);
    }

    #[tokio::test]
    async fn test_add_item_scenario_counts_category() {
        let analyzed: WardrobeItem = serde_json::from_value(json!({
            "_id": "i1",
            "category": "jacket",
            "color": "navy"
        }))
        .unwrap();
        let dashboard = mounted(
            ScriptedBackend::default()
                .user(Ok(user("u1")))
                .wardrobe(Ok(vec![]))
                .analysis(Ok(analyzed.clone())),
        )
        .await;

        let added = dashboard.add_demo_item().await.unwrap();
        assert_eq!(added, analyzed);

        let state = dashboard.snapshot();
        assert_eq!(state.wardrobe, vec![analyzed]);
        assert_eq!(
            state.counts_by_category(),
            BTreeMap::from([("jacket".to_string(), 1)])
        );
        assert_eq!(
            dashboard.backend().calls().last(),
            Some(&Call::Analyze(AnalyzeRequest {
                user_id: "u1".into(),
                image_url: DEMO_IMAGE_URL.into(),
            }))
        );
    }

    #[tokio::test]
    async fn test_analyzed_item_without_id_is_still_prepended() {
        let anonymous: WardrobeItem =
            serde_json::from_value(json!({ "category": "skirt", "color": null })).unwrap();
        let dashboard = mounted(
            ScriptedBackend::default()
                .user(Ok(user("u1")))
                .wardrobe(Ok(vec![item("a", "jacket")]))
                .analysis(Ok(anonymous.clone())),
        )
        .await;

        dashboard.add_demo_item().await.unwrap();

        let state = dashboard.snapshot();
        assert_eq!(state.wardrobe[0], anonymous);
        assert_eq!(ids(&state.wardrobe), vec!["", "a"]);
        assert_eq!(state.counts_by_category().get("skirt"), Some(&1));
    }

    #[tokio::test]
    async fn test_custom_identity_is_sent_on_mount() {
        let identity = NewUser {
            email: "ada@example.com".into(),
            name: "Ada".into(),
            height_cm: 170.0,
            weight_kg: 60.0,
            style_preferences: vec!["edgy".into()],
        };
        let dashboard = Dashboard::new(
            ScriptedBackend::default().user(Ok(user("u7"))).wardrobe(Ok(vec![])),
            &ClientConfig::default(),
        )
        .with_identity(identity.clone());

        dashboard.mount().await.unwrap();

        assert_eq!(dashboard.snapshot().user_id(), Some("u7"));
        assert_eq!(
            dashboard.backend().calls(),
            vec![Call::EnsureUser(identity), Call::FetchWardrobe("u7".into())]
        );
    }

    #[tokio::test]
    async fn test_add_prepends_without_resync_or_dedup() {
        let dashboard = mounted(
            ScriptedBackend::default()
                .user(Ok(user("u1")))
                .wardrobe(Ok(vec![item("a", "jacket"), item("b", "shoes")]))
                .analysis(Ok(item("x", "shirt")))
                .analysis(Ok(item("x", "shirt"))),
        )
        .await;

        dashboard.add_demo_item().await.unwrap();
        assert_eq!(ids(&dashboard.snapshot().wardrobe), vec!["x", "a", "b"]);

        dashboard.add_demo_item().await.unwrap();
        assert_eq!(ids(&dashboard.snapshot().wardrobe), vec!["x", "x", "a", "b"]);

        let fetches = dashboard
            .backend()
            .calls()
            .into_iter()
            .filter(|c| matches!(c, Call::FetchWardrobe(_)))
            .count();
        assert_eq!(fetches, 1);
    }

    #[tokio::test]
    async fn test_custom_add_requires_image_url() {
        let dashboard = mounted(ScriptedBackend::default().user(Ok(user("u1"))).wardrobe(Ok(vec![]))).await;

        dashboard.set_image_url("   ");
        assert!(matches!(
            dashboard.add_custom_item().await,
            Err(Error::MissingImageUrl)
        ));
        assert!(!dashboard.snapshot().adding);
        assert_eq!(dashboard.backend().calls().len(), 2);
    }

    #[tokio::test]
    async fn test_custom_add_success_clears_input_and_filter() {
        let dashboard = mounted(
            ScriptedBackend::default()
                .user(Ok(user("u1")))
                .wardrobe(Ok(vec![item("a", "shoes")]))
                .analysis(Ok(item("coat", "outerwear"))),
        )
        .await;

        dashboard.set_filter(CategoryFilter::Shoes);
        dashboard.set_image_url(" https://img/coat.jpg ");
        dashboard.add_custom_item().await.unwrap();

        let state = dashboard.snapshot();
        assert_eq!(state.image_url, "");
        assert_eq!(state.filter, CategoryFilter::All);
        assert_eq!(ids(&state.wardrobe), vec!["coat", "a"]);
        assert_eq!(
            dashboard.backend().calls().last(),
            Some(&Call::Analyze(AnalyzeRequest {
                user_id: "u1".into(),
                image_url: "https://img/coat.jpg".into(),
            }))
        );
    }

    #[tokio::test]
    async fn test_custom_add_failure_keeps_input_and_filter() {
        let dashboard = mounted(
            ScriptedBackend::default()
                .user(Ok(user("u1")))
                .wardrobe(Ok(vec![item("a", "shoes")]))
                .analysis(Err(Error::decode("expected value at line 1"))),
        )
        .await;

        dashboard.set_filter(CategoryFilter::Shoes);
        dashboard.set_image_url("https://img/coat.jpg");
        assert!(dashboard.add_custom_item().await.is_err());

        let state = dashboard.snapshot();
        assert_eq!(state.image_url, "https://img/coat.jpg");
        assert_eq!(state.filter, CategoryFilter::Shoes);
        assert_eq!(ids(&state.wardrobe), vec!["a"]);
        assert!(!state.adding);
    }

    #[tokio::test]
    async fn test_adding_flag_spans_the_request() {
        let dashboard = mounted(ScriptedBackend::default().user(Ok(user("u1"))).wardrobe(Ok(vec![]))).await;
        let release = dashboard.backend().gated_analysis();
        let mut rx = dashboard.subscribe();

        assert!(!dashboard.snapshot().adding);

        let (outcome, _) = tokio::join!(dashboard.add_demo_item(), async {
            rx.wait_for(|s| s.adding).await.unwrap();
            // Recommendation flag is independent
            assert!(!dashboard.snapshot().loading);
            release.send(Err(Error::transport("reset by peer"))).unwrap();
        });

        assert!(outcome.is_err());
        assert!(!dashboard.snapshot().adding);
    }

    #[tokio::test]
    async fn test_new_request_clears_previous_recommendation() {
        let dashboard = mounted(
            ScriptedBackend::default()
                .user(Ok(user("u1")))
                .wardrobe(Ok(vec![]))
                .recommendation(Ok(outfit("First Look"))),
        )
        .await;
        dashboard.request_recommendation().await.unwrap();
        assert_eq!(dashboard.snapshot().recommendation, Some(outfit("First Look")));

        let release = dashboard.backend().gated_recommendation();
        let mut rx = dashboard.subscribe();

        let (outcome, _) = tokio::join!(dashboard.request_recommendation(), async {
            rx.wait_for(|s| s.loading).await.unwrap();
            let during = dashboard.snapshot();
            assert!(during.recommendation.is_none());
            assert!(!during.adding);
            release.send(Ok(outfit("Second Look"))).unwrap();
        });

        assert_eq!(outcome.unwrap(), outfit("Second Look"));
        let state = dashboard.snapshot();
        assert!(!state.loading);
        assert_eq!(state.recommendation, Some(outfit("Second Look")));
    }

    #[tokio::test]
    async fn test_failed_recommendation_clears_loading_and_stays_empty() {
        let dashboard = mounted(
            ScriptedBackend::default()
                .user(Ok(user("u1")))
                .wardrobe(Ok(vec![]))
                .recommendation(Ok(outfit("First Look")))
                .recommendation(Err(Error::status(500, "model offline"))),
        )
        .await;
        dashboard.request_recommendation().await.unwrap();

        assert!(dashboard.request_recommendation().await.is_err());
        let state = dashboard.snapshot();
        assert!(!state.loading);
        assert!(state.recommendation.is_none());
    }

    #[tokio::test]
    async fn test_recommendation_uses_current_inputs() {
        let dashboard = mounted(
            ScriptedBackend::default()
                .user(Ok(user("u1")))
                .wardrobe(Ok(vec![]))
                .recommendation(Ok(outfit("Rainy Commute"))),
        )
        .await;

        dashboard.set_occasion("Office");
        dashboard.set_weather("Rainy 9C");
        dashboard.request_recommendation().await.unwrap();

        assert_eq!(
            dashboard.backend().calls().last(),
            Some(&Call::Recommend(RecommendationRequest {
                user_id: "u1".into(),
                occasion: "Office".into(),
                weather: "Rainy 9C".into(),
            }))
        );
    }

    #[tokio::test]
    async fn test_quick_suggest_sends_body_profile() {
        let dashboard = dashboard(ScriptedBackend::default().recommendation(Ok(outfit("Sharp"))));
        let profile = BodyProfile {
            height_cm: 165.0,
            weight_kg: 58.0,
            body_type: BodyType::Hourglass,
            style_choice: "romantic".into(),
        };
        dashboard.set_profile(profile.clone());

        dashboard.quick_suggest().await.unwrap();

        assert_eq!(
            dashboard.backend().calls(),
            vec![Call::RecommendWithoutWardrobe(profile)]
        );
        assert!(!dashboard.snapshot().loading);
    }

    #[tokio::test]
    async fn test_partial_recommendation_is_held_as_returned() {
        let partial: Recommendation =
            serde_json::from_value(json!({ "detail": "no items matched" })).unwrap();
        let dashboard = dashboard(ScriptedBackend::default().recommendation(Ok(partial.clone())));

        dashboard.quick_suggest().await.unwrap();
        assert_eq!(dashboard.snapshot().recommendation, Some(partial));
    }

    #[tokio::test]
    async fn test_recommendation_with_null_items_is_held() {
        let sparse: Recommendation = serde_json::from_value(json!({
            "outfit_name": "Sparse Look",
            "items": null,
            "is_favorite": null
        }))
        .unwrap();
        let dashboard = mounted(
            ScriptedBackend::default()
                .user(Ok(user("u1")))
                .wardrobe(Ok(vec![]))
                .recommendation(Ok(sparse.clone())),
        )
        .await;

        dashboard.request_recommendation().await.unwrap();

        let state = dashboard.snapshot();
        assert_eq!(state.recommendation, Some(sparse));
        assert!(!state.loading);
        assert_eq!(state.stats().favorites, 0);
    }

    #[tokio::test]
    async fn test_overlapping_requests_last_response_wins() {
        let dashboard = dashboard(ScriptedBackend::default());
        let release_first = dashboard.backend().gated_recommendation();
        let release_second = dashboard.backend().gated_recommendation();
        let mut rx = dashboard.subscribe();

        let (first, second, _) = tokio::join!(
            dashboard.quick_suggest(),
            dashboard.quick_suggest(),
            async {
                // Second request completes first
                release_second.send(Ok(outfit("Second"))).unwrap();
                rx.wait_for(|s| s.recommendation == Some(outfit("Second")))
                    .await
                    .unwrap();
                release_first.send(Ok(outfit("First"))).unwrap();
            }
        );

        assert_eq!(first.unwrap(), outfit("First"));
        assert_eq!(second.unwrap(), outfit("Second"));
        let state = dashboard.snapshot();
        assert_eq!(state.recommendation, Some(outfit("First")));
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn test_overlapping_requests_latest_request_wins() {
        let config =
            ClientConfig::default().with_ordering(RecommendationOrdering::LatestRequestWins);
        let dashboard = Dashboard::new(ScriptedBackend::default(), &config);
        let release_first = dashboard.backend().gated_recommendation();
        let release_second = dashboard.backend().gated_recommendation();
        let mut rx = dashboard.subscribe();

        tokio::join!(dashboard.quick_suggest(), dashboard.quick_suggest(), async {
            release_second.send(Ok(outfit("Second"))).unwrap();
            rx.wait_for(|s| s.recommendation == Some(outfit("Second")))
                .await
                .unwrap();
            release_first.send(Ok(outfit("First"))).unwrap();
        });

        let state = dashboard.snapshot();
        assert_eq!(state.recommendation, Some(outfit("Second")));
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn test_superseded_completion_keeps_loading_until_latest() {
        let config =
            ClientConfig::default().with_ordering(RecommendationOrdering::LatestRequestWins);
        let dashboard = Dashboard::new(ScriptedBackend::default(), &config);
        let release_first = dashboard.backend().gated_recommendation();
        let release_second = dashboard.backend().gated_recommendation();

        let (first, _, _) = tokio::join!(dashboard.quick_suggest(), dashboard.quick_suggest(), async {
            release_first.send(Err(Error::transport("timed out"))).unwrap();
            // Let the first request observe its failure
            for _ in 0..10 {
                tokio::task::yield_now().await;
            }
            let during = dashboard.snapshot();
            assert!(during.loading);
            assert!(during.recommendation.is_none());
            release_second.send(Ok(outfit("Second"))).unwrap();
        });

        assert!(first.is_err());
        let state = dashboard.snapshot();
        assert_eq!(state.recommendation, Some(outfit("Second")));
        assert!(!state.loading);
    }
}
