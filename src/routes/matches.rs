use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::models::{FindMatchesRequest, FindMatchesResponse, HealthResponse, UserQuery};
use crate::routes::{error_body, service_error_response, AppState};

/// Configure health, matching and dashboard routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matches/find", web::post().to(find_matches))
        .route("/dashboard", web::get().to(dashboard));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let store_healthy = state.service.health_check().await;

    let status = if store_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Find matches endpoint
///
/// POST /api/v1/matches/find
///
/// Request body:
/// ```json
/// {
///   "userId": "string",
///   "limit": 3
/// }
/// ```
async fn find_matches(
    state: web::Data<AppState>,
    req: web::Json<FindMatchesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for find_matches request: {:?}", errors);
        return HttpResponse::BadRequest().json(error_body(400, "Validation failed", errors.to_string()));
    }

    let limit = req.limit.map(usize::from);

    match state.service.find_matches(&req.user_id, limit).await {
        Ok(result) => HttpResponse::Ok().json(FindMatchesResponse {
            matches: result.matches,
            total_results: result.total_candidates,
        }),
        Err(e) => service_error_response("Failed to find matches", &e),
    }
}

/// Dashboard summary
///
/// GET /api/v1/dashboard?userId={userId}
async fn dashboard(
    state: web::Data<AppState>,
    query: web::Query<UserQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return HttpResponse::BadRequest().json(error_body(400, "Validation failed", errors.to_string()));
    }

    match state.service.dashboard(&query.user_id).await {
        Ok(stats) => HttpResponse::Ok().json(stats),
        Err(e) => service_error_response("Failed to load dashboard", &e),
    }
}
