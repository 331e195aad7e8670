// Integration tests for Affinity Engine

use actix_web::{http::StatusCode, test as actix_test, web, App};
use affinity_engine::core::{scoring::DEFAULT_CALIBRATION_EXPONENT, MatchError, Matcher};
use affinity_engine::models::{
    Diet, EducationTier, LifestyleAttributes, Profile, ScoreCandidatesRequest, ScoringWeights,
};
use affinity_engine::routes::{self, compatibility::AppState};
use affinity_engine::services::{
    InMemoryStore, ProfileStore, SentimentAnalyzer, SentimentError, StoreError, SupabaseClient,
    SupabaseTables,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

struct DownStore;

#[async_trait]
impl ProfileStore for DownStore {
    async fn fetch_profiles(&self, _ids: &[String]) -> Result<HashMap<String, Profile>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        Ok(false)
    }
}

struct BrokenSentiment;

impl SentimentAnalyzer for BrokenSentiment {
    fn polarity(&self, _text: &str) -> Result<f64, SentimentError> {
        Err(SentimentError::Unavailable("model not loaded".to_string()))
    }
}

fn scenario_target() -> Profile {
    Profile::new("target")
        .with_interests(["music", "travel"])
        .with_lifestyle(
            LifestyleAttributes::default()
                .with_strict_veg(false)
                .with_diet(Diet::Veg)
                .with_education(EducationTier::Bachelor),
        )
}

fn scenario_candidate() -> Profile {
    Profile::new("candidate")
        .with_interests(["music", "sports"])
        .with_lifestyle(
            LifestyleAttributes::default()
                .with_diet(Diet::NonVeg)
                .with_education(EducationTier::Master),
        )
}

fn app_state(store: Arc<dyn ProfileStore>, matcher: Matcher) -> AppState {
    AppState {
        store,
        matcher,
        max_candidates: 100,
    }
}

#[test]
fn test_integration_end_to_end_scenario() {
    let matcher = Matcher::with_default_weights();

    let ranked = matcher
        .rank(&scenario_target(), &[scenario_candidate()])
        .unwrap();

    assert_eq!(ranked.len(), 1);
    let result = &ranked[0];
    assert_eq!(result.candidate_id, "candidate");
    assert!((result.factors.interest - 0.3333).abs() < 1e-4);
    assert!((result.factors.lifestyle - 0.525).abs() < 1e-9);
    assert_eq!(result.factors.personality, 0.5);
    assert!((result.raw_score - 44.08).abs() < 0.01);
    assert_eq!(result.score, 33.1);
    assert_eq!(result.explanation, vec!["You both like music".to_string()]);
}

#[test]
fn test_integration_strict_veg_veto_lowers_score() {
    let matcher = Matcher::with_default_weights();
    let target = Profile::new("target")
        .with_interests(["music"])
        .with_lifestyle(LifestyleAttributes::from_labels(["Strict Vegetarian", "Masters"]));

    let education = LifestyleAttributes::default().with_education(EducationTier::Master);
    let meat_eater = Profile::new("meat")
        .with_interests(["music"])
        .with_lifestyle(education.clone().with_diet(Diet::NonVeg));
    let vegetarian = Profile::new("veg")
        .with_interests(["music"])
        .with_lifestyle(education.with_diet(Diet::Veg));

    let ranked = matcher.rank(&target, &[meat_eater, vegetarian]).unwrap();

    assert_eq!(ranked[0].candidate_id, "veg");
    assert_eq!(ranked[1].candidate_id, "meat");
    assert_eq!(ranked[1].factors.lifestyle, 0.0);
    assert_eq!(ranked[0].factors.lifestyle, 1.0);
    assert!(ranked[0].score > ranked[1].score);
}

#[test]
fn test_integration_strict_veg_veto_with_disjoint_interests() {
    let matcher = Matcher::with_default_weights();
    let target = Profile::new("target")
        .with_interests(["music", "travel"])
        .with_lifestyle(
            LifestyleAttributes::default()
                .with_strict_veg(true)
                .with_diet(Diet::Veg)
                .with_education(EducationTier::Bachelor),
        );

    let education = LifestyleAttributes::default().with_education(EducationTier::Bachelor);
    let meat_eater = Profile::new("meat")
        .with_interests(["chess", "football"])
        .with_lifestyle(education.clone().with_diet(Diet::NonVeg));
    let vegetarian = Profile::new("veg")
        .with_interests(["chess", "football"])
        .with_lifestyle(education.with_diet(Diet::Veg));

    let ranked = matcher.rank(&target, &[meat_eater, vegetarian]).unwrap();

    assert_eq!(ranked[0].candidate_id, "veg");
    assert_eq!(ranked[0].factors.interest, 0.0);
    assert_eq!(ranked[1].factors.interest, 0.0);
    assert_eq!(ranked[1].factors.lifestyle, 0.0);
    // Only the personality factor is left: 0.3 * 0.5
    assert!((ranked[1].raw_score - 15.0).abs() < 1e-9);
    assert!(ranked[0].score > ranked[1].score);
}

#[test]
fn test_integration_in_memory_store_with_tokio_test() {
    let store = InMemoryStore::from_profiles(vec![scenario_target(), scenario_candidate()]);
    let matcher = Matcher::with_default_weights();
    let request = ScoreCandidatesRequest::new("target", ["candidate", "unknown"]);

    let response = tokio_test::block_on(matcher.score_request(&store, &request)).unwrap();

    assert_eq!(response.results.len(), 1);
    assert_eq!(response.results[0].score, 33.1);
}

#[tokio::test]
async fn test_integration_store_failure_propagates() {
    let matcher = Matcher::with_default_weights();
    let request = ScoreCandidatesRequest::new("target", ["candidate"]);

    let err = matcher.score_request(&DownStore, &request).await.unwrap_err();

    assert!(matches!(err, MatchError::Store(StoreError::Unavailable(_))));
}

#[tokio::test]
async fn test_integration_sentiment_failure_propagates() {
    let matcher = Matcher::new(
        ScoringWeights::default(),
        DEFAULT_CALIBRATION_EXPONENT,
        Arc::new(BrokenSentiment),
    );
    let store = InMemoryStore::from_profiles(vec![
        scenario_target().with_bio("Love hiking"),
        scenario_candidate().with_bio("Coffee and books"),
    ]);
    let request = ScoreCandidatesRequest::new("target", ["candidate"]);

    let err = matcher.score_request(&store, &request).await.unwrap_err();

    assert!(matches!(err, MatchError::Sentiment(_)));
}

#[tokio::test]
async fn test_integration_supabase_store() {
    let mut server = mockito::Server::new_async().await;

    let profiles = server
        .mock("GET", "/rest/v1/profiles")
        .match_query(mockito::Matcher::Any)
        .match_header("apikey", "service-key")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"id": "target", "bio": null}, {"id": "candidate", "bio": ""}]"#)
        .create_async()
        .await;

    let interests = server
        .mock("GET", "/rest/v1/profile_interest_chips")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[
                {"profile_id": "target", "interest_chips": {"label": "Music"}},
                {"profile_id": "target", "interest_chips": {"label": "Travel"}},
                {"profile_id": "candidate", "interest_chips": {"label": "music"}},
                {"profile_id": "candidate", "interest_chips": {"label": "Sports"}},
                {"profile_id": "ghost", "interest_chips": {"label": "Chess"}}
            ]"#,
        )
        .create_async()
        .await;

    let lifestyle = server
        .mock("GET", "/rest/v1/profile_lifestyle_chips")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[
                {"profile_id": "target", "lifestyle_chips": {"label": "Vegetarian"}},
                {"profile_id": "target", "lifestyle_chips": {"label": "Bachelors"}},
                {"profile_id": "candidate", "lifestyle_chips": {"label": "Non-Vegetarian"}},
                {"profile_id": "candidate", "lifestyle_chips": {"label": "Masters"}}
            ]"#,
        )
        .create_async()
        .await;

    let client = SupabaseClient::new(
        server.url(),
        "service-key".to_string(),
        SupabaseTables::default(),
        Duration::from_secs(5),
    )
    .unwrap();

    let matcher = Matcher::with_default_weights();
    let request = ScoreCandidatesRequest::new("target", ["candidate"]);
    let response = matcher.score_request(&client, &request).await.unwrap();

    profiles.assert_async().await;
    interests.assert_async().await;
    lifestyle.assert_async().await;

    assert_eq!(response.results.len(), 1);
    assert_eq!(response.results[0].score, 33.1);
}

#[tokio::test]
async fn test_integration_supabase_unauthorized() {
    let mut server = mockito::Server::new_async().await;

    let _profiles = server
        .mock("GET", "/rest/v1/profiles")
        .match_query(mockito::Matcher::Any)
        .with_status(401)
        .create_async()
        .await;

    let client = SupabaseClient::new(
        server.url(),
        "bad-key".to_string(),
        SupabaseTables::default(),
        Duration::from_secs(5),
    )
    .unwrap();

    let err = client.fetch_profiles(&["target".to_string()]).await.unwrap_err();

    assert!(matches!(err, StoreError::Supabase(_)));
}

#[actix_web::test]
async fn test_integration_score_route_output_contract() {
    let store = InMemoryStore::from_profiles(vec![scenario_target(), scenario_candidate()]);
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(app_state(Arc::new(store), Matcher::with_default_weights())))
            .configure(routes::configure_routes),
    )
    .await;

    let req = actix_test::TestRequest::post()
        .uri("/api/v1/compatibility/score")
        .set_json(ScoreCandidatesRequest::new("target", ["candidate"]))
        .to_request();
    let body: serde_json::Value = actix_test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["target_user_id"], "target");
    let first = &body["results"][0];
    assert_eq!(first["candidate_id"], "candidate");
    assert_eq!(first["score"], 33.1);
    assert_eq!(first["raw_score"], 44.08);
    assert_eq!(first["factors"]["interests"], 0.333);
    assert_eq!(first["factors"]["lifestyle"], 0.525);
    assert_eq!(first["factors"]["personality"], 0.5);
    assert!(first["factors"].get("activity").is_none());
    assert_eq!(first["explanation"][0], "You both like music");
}

#[actix_web::test]
async fn test_integration_store_failure_is_bad_gateway() {
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(app_state(Arc::new(DownStore), Matcher::with_default_weights())))
            .configure(routes::configure_routes),
    )
    .await;

    let req = actix_test::TestRequest::post()
        .uri("/api/v1/compatibility/score")
        .set_json(ScoreCandidatesRequest::new("target", ["candidate"]))
        .to_request();
    let resp = actix_test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
}

#[actix_web::test]
async fn test_integration_health_reports_degraded_store() {
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(app_state(Arc::new(DownStore), Matcher::with_default_weights())))
            .configure(routes::configure_routes),
    )
    .await;

    let req = actix_test::TestRequest::get().uri("/api/v1/health").to_request();
    let body: serde_json::Value = actix_test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "degraded");
}
