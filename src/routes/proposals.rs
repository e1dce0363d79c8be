use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::models::{
    GenerateProposalRequest, ProposalListResponse, ProposalStatus, UpdateStatusRequest,
    UpdateTextRequest, UserQuery,
};
use crate::routes::{error_body, service_error_response, AppState};

/// Configure proposal routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/proposals", web::get().to(list_proposals))
        .route("/proposals/generate", web::post().to(generate_proposal))
        .route("/proposals/{id}/status", web::patch().to(update_status))
        .route("/proposals/{id}/send", web::post().to(send_proposal))
        .route("/proposals/{id}/text", web::patch().to(update_text));
}

/// Generate a draft proposal for a client
///
/// POST /api/v1/proposals/generate
///
/// Request body:
/// ```json
/// {
///   "userId": "string",
///   "clientId": "string"
/// }
/// ```
async fn generate_proposal(
    state: web::Data<AppState>,
    req: web::Json<GenerateProposalRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(error_body(400, "Validation failed", errors.to_string()));
    }

    match state.service.generate_proposal(&req.user_id, &req.client_id).await {
        Ok(proposal) => HttpResponse::Created().json(proposal),
        Err(e) => service_error_response("Failed to generate proposal", &e),
    }
}

/// GET /api/v1/proposals?userId={userId}
async fn list_proposals(
    state: web::Data<AppState>,
    query: web::Query<UserQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return HttpResponse::BadRequest().json(error_body(400, "Validation failed", errors.to_string()));
    }

    match state.service.list_proposals(&query.user_id).await {
        Ok(proposals) => HttpResponse::Ok().json(ProposalListResponse {
            count: proposals.len(),
            proposals,
        }),
        Err(e) => service_error_response("Failed to list proposals", &e),
    }
}

/// PATCH /api/v1/proposals/{id}/status with `{"status": "draft|sent|accepted|rejected"}`
async fn update_status(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<UpdateStatusRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(error_body(400, "Validation failed", errors.to_string()));
    }

    let status: ProposalStatus = match req.status.parse() {
        Ok(status) => status,
        Err(message) => {
            return HttpResponse::BadRequest().json(error_body(400, "Invalid status", message));
        }
    };

    match state.service.update_proposal_status(&path, status).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => service_error_response("Failed to update proposal", &e),
    }
}

/// POST /api/v1/proposals/{id}/send
async fn send_proposal(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    match state.service.send_proposal(&path).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => service_error_response("Failed to send proposal", &e),
    }
}

/// PATCH /api/v1/proposals/{id}/text with `{"proposalText": "..."}`
async fn update_text(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<UpdateTextRequest>,
) -> impl Responder {
    let text = req.into_inner().proposal_text;

    match state.service.update_proposal_text(&path, text).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => service_error_response("Failed to update proposal", &e),
    }
}
