use actix_web::{web, HttpResponse};
use std::sync::Arc;

use crate::core::{InterestService, Recommender};
use crate::error::MatchError;
use crate::models::{HealthResponse, LikeRequest, Preferences, UserId};
use crate::services::MatchStore;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn MatchStore>,
    pub interest: InterestService,
    pub recommender: Recommender,
}

impl AppState {
    /// Wire both core services to the same store
    pub fn new(store: Arc<dyn MatchStore>) -> Self {
        Self {
            interest: InterestService::new(store.clone()),
            recommender: Recommender::new(store.clone()),
            store,
        }
    }
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/like", web::post().to(like_user))
        .route("/matches/{user_id}", web::get().to(get_matches))
        .route("/recommendations/{user_id}", web::post().to(get_recommendations));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let healthy = match state.store.health_check().await {
        Ok(ok) => ok,
        Err(e) => {
            tracing::warn!("Store health check failed: {}", e);
            false
        }
    };

    let status = if healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Register a like
///
/// POST /api/v1/like
///
/// Request body:
/// ```json
/// { "user_id": 1, "liked_user_id": 2 }
/// ```
async fn like_user(
    state: web::Data<AppState>,
    req: web::Json<LikeRequest>,
) -> Result<HttpResponse, MatchError> {
    let outcome = state.interest.register_like(&req).await?;
    Ok(HttpResponse::Ok().json(outcome))
}

/// List matches for a user
///
/// GET /api/v1/matches/{user_id}
async fn get_matches(
    state: web::Data<AppState>,
    path: web::Path<UserId>,
) -> Result<HttpResponse, MatchError> {
    let matches = state.interest.list_matches(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(matches))
}

/// Recommend candidates for a user
///
/// POST /api/v1/recommendations/{user_id}
///
/// Request body:
/// ```json
/// {
///   "looking_for_gender": "male",
///   "looking_for_diet_type": "vegan",
///   "age_range": { "min": 28, "max": 32 },
///   "max_distance": 25.0
/// }
/// ```
async fn get_recommendations(
    state: web::Data<AppState>,
    path: web::Path<UserId>,
    preferences: web::Json<Preferences>,
) -> Result<HttpResponse, MatchError> {
    let recommendations = state
        .recommender
        .recommend(path.into_inner(), &preferences)
        .await?;

    Ok(HttpResponse::Ok().json(recommendations))
}
