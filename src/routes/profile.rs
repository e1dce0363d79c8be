use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::models::{SaveProfileRequest, UserQuery};
use crate::routes::{error_body, service_error_response, AppState};

/// Configure profile routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/profile", web::get().to(get_profile))
        .route("/profile", web::put().to(save_profile));
}

/// GET /api/v1/profile?userId={userId}
async fn get_profile(
    state: web::Data<AppState>,
    query: web::Query<UserQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return HttpResponse::BadRequest().json(error_body(400, "Validation failed", errors.to_string()));
    }

    match state.service.load_profile(&query.user_id).await {
        Ok(profile) => HttpResponse::Ok().json(profile),
        Err(e) => service_error_response("Failed to load profile", &e),
    }
}

/// Create or update a profile
///
/// PUT /api/v1/profile
///
/// Request body:
/// ```json
/// {
///   "userId": "string",
///   "fullName": "string",
///   "skills": "React, Design",
///   "jobTitle": "string"
/// }
/// ```
async fn save_profile(
    state: web::Data<AppState>,
    req: web::Json<SaveProfileRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(error_body(400, "Validation failed", errors.to_string()));
    }

    let SaveProfileRequest { user_id, profile } = req.into_inner();

    match state.service.save_profile(&user_id, profile).await {
        Ok(saved) => HttpResponse::Ok().json(saved),
        Err(e) => service_error_response("Failed to save profile", &e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Matcher, ProposalSynthesizer};
    use crate::models::UserProfile;
    use crate::routes::configure_routes;
    use crate::services::{FreelanceService, InMemoryStore};
    use actix_web::{http::StatusCode, test, App};
    use serde_json::json;
    use std::sync::Arc;

    fn empty_state() -> AppState {
        AppState {
            service: FreelanceService::new(
                Arc::new(InMemoryStore::new()),
                Matcher::default(),
                ProposalSynthesizer::default(),
            ),
        }
    }

    #[actix_web::test]
    async fn test_save_then_load_profile() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(empty_state()))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::put()
            .uri("/api/v1/profile")
            .set_json(json!({"userId": "u1", "fullName": "Ada", "skills": "Rust"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::get().uri("/api/v1/profile?userId=u1").to_request();
        let profile: UserProfile = test::call_and_read_body_json(&app, req).await;

        assert_eq!(profile.full_name.as_deref(), Some("Ada"));
        assert_eq!(profile.skills.as_deref(), Some("Rust"));
    }

    #[actix_web::test]
    async fn test_missing_profile_is_not_found() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(empty_state()))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/v1/profile?userId=ghost").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
