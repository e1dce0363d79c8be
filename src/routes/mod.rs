// Route exports
pub mod matches;
pub mod portfolio;
pub mod profile;
pub mod proposals;
pub mod tasks;

use actix_web::{web, HttpResponse};

use crate::models::ErrorResponse;
use crate::services::{FreelanceService, ServiceError, StoreError};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub service: FreelanceService,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(matches::configure)
            .configure(profile::configure)
            .configure(proposals::configure)
            .configure(tasks::configure)
            .configure(portfolio::configure),
    );
}

/// Build a JSON error body
pub(crate) fn error_body(status_code: u16, error: &str, message: impl Into<String>) -> ErrorResponse {
    ErrorResponse {
        error: error.to_string(),
        message: message.into(),
        status_code,
    }
}

/// Map a workflow failure to an HTTP response
pub(crate) fn service_error_response(context: &str, err: &ServiceError) -> HttpResponse {
    match err {
        ServiceError::ProfileNotFound(_) => {
            HttpResponse::NotFound().json(error_body(404, "Profile incomplete", err.to_string()))
        }
        ServiceError::ClientNotFound(_)
        | ServiceError::ProposalNotFound(_)
        | ServiceError::TaskNotFound(_)
        | ServiceError::PortfolioItemNotFound(_) => {
            HttpResponse::NotFound().json(error_body(404, "Not found", err.to_string()))
        }
        ServiceError::InvalidTransition { .. } => {
            HttpResponse::Conflict().json(error_body(409, "Invalid status transition", err.to_string()))
        }
        ServiceError::Store(StoreError::NotFound(_)) => {
            HttpResponse::NotFound().json(error_body(404, "Not found", err.to_string()))
        }
        ServiceError::Store(_) => {
            tracing::error!("{}: {}", context, err);
            HttpResponse::BadGateway().json(error_body(502, context, err.to_string()))
        }
    }
}
