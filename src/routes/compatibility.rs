use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use tracing::Instrument;
use validator::Validate;

use crate::core::{MatchError, Matcher};
use crate::models::{ErrorResponse, HealthResponse, ScoreCandidatesRequest};
use crate::services::ProfileStore;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ProfileStore>,
    pub matcher: Matcher,
    pub max_candidates: usize,
}

/// Configure compatibility routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/compatibility/score", web::post().to(score_candidates));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let store_healthy = match state.store.health_check().await {
        Ok(healthy) => healthy,
        Err(e) => {
            tracing::warn!("Store health check failed: {}", e);
            false
        }
    };

    let status = if store_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Score candidates endpoint
///
/// POST /api/v1/compatibility/score
///
/// Request body:
/// ```json
/// {
///   "target_user_id": "string",
///   "candidate_user_ids": ["string"]
/// }
/// ```
async fn score_candidates(
    state: web::Data<AppState>,
    req: web::Json<ScoreCandidatesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for score request: {}", errors);
        return error_response(400, "Validation failed", errors.to_string());
    }

    if req.candidate_user_ids.len() > state.max_candidates {
        return error_response(
            400,
            "Too many candidates",
            format!(
                "{} candidates requested, at most {} allowed",
                req.candidate_user_ids.len(),
                state.max_candidates
            ),
        );
    }

    let span = tracing::info_span!(
        "score_candidates",
        request_id = %uuid::Uuid::new_v4(),
        target_user_id = %req.target_user_id,
    );

    let result = state
        .matcher
        .score_request(&*state.store, &req)
        .instrument(span)
        .await;

    match result {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(MatchError::TargetNotFound(id)) => {
            tracing::info!("Target profile {} not found", id);
            error_response(404, "Target profile not found", format!("No profile with id {}", id))
        }
        Err(e) => {
            tracing::error!("Failed to score candidates for {}: {}", req.target_user_id, e);
            error_response(502, "Upstream failure", e.to_string())
        }
    }
}

fn error_response(status_code: u16, error: &str, message: String) -> HttpResponse {
    let body = ErrorResponse {
        error: error.to_string(),
        message,
        status_code,
    };

    match status_code {
        400 => HttpResponse::BadRequest().json(body),
        404 => HttpResponse::NotFound().json(body),
        _ => HttpResponse::BadGateway().json(body),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Profile;
    use crate::services::InMemoryStore;
    use actix_web::{http::StatusCode, test, App};

    fn state(max_candidates: usize) -> AppState {
        let store = InMemoryStore::from_profiles(vec![
            Profile::new("t").with_interests(["music", "travel"]),
            Profile::new("a").with_interests(["music"]),
        ]);
        AppState {
            store: Arc::new(store),
            matcher: Matcher::with_default_weights(),
            max_candidates,
        }
    }

    #[actix_web::test]
    async fn test_health_check_response() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state(10)))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let body: HealthResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body.status, "healthy");
    }

    #[actix_web::test]
    async fn test_rejects_empty_target() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state(10)))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/compatibility/score")
            .set_json(ScoreCandidatesRequest::new("", ["a"]))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_rejects_too_many_candidates() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state(1)))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/compatibility/score")
            .set_json(ScoreCandidatesRequest::new("t", ["a", "b"]))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_unknown_target_is_not_found() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state(10)))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/compatibility/score")
            .set_json(ScoreCandidatesRequest::new("nobody", ["a"]))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
