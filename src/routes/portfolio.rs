use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::models::{PortfolioListResponse, PortfolioRequest, UserQuery};
use crate::routes::{error_body, service_error_response, AppState};

/// Configure portfolio routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/portfolio", web::get().to(list_items))
        .route("/portfolio", web::post().to(add_item))
        .route("/portfolio/{id}", web::put().to(update_item))
        .route("/portfolio/{id}", web::delete().to(delete_item));
}

/// GET /api/v1/portfolio?userId={userId}
async fn list_items(
    state: web::Data<AppState>,
    query: web::Query<UserQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return HttpResponse::BadRequest().json(error_body(400, "Validation failed", errors.to_string()));
    }

    match state.service.list_portfolio(&query.user_id).await {
        Ok(items) => HttpResponse::Ok().json(PortfolioListResponse {
            count: items.len(),
            items,
        }),
        Err(e) => service_error_response("Failed to list portfolio", &e),
    }
}

/// Add a portfolio entry
///
/// POST /api/v1/portfolio
///
/// Request body:
/// ```json
/// {
///   "userId": "string",
///   "projectName": "string",
///   "technologies": ["React", "Rust"],
///   "projectDate": "2024-05-01"
/// }
/// ```
async fn add_item(
    state: web::Data<AppState>,
    req: web::Json<PortfolioRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(error_body(400, "Validation failed", errors.to_string()));
    }

    let PortfolioRequest { user_id, item } = req.into_inner();

    match state.service.add_portfolio_item(&user_id, item).await {
        Ok(item) => HttpResponse::Created().json(item),
        Err(e) => service_error_response("Failed to add portfolio item", &e),
    }
}

/// PUT /api/v1/portfolio/{id} with the same body as creation
async fn update_item(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<PortfolioRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(error_body(400, "Validation failed", errors.to_string()));
    }

    let PortfolioRequest { user_id, item } = req.into_inner();

    match state.service.update_portfolio_item(&path, &user_id, item).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => service_error_response("Failed to update portfolio item", &e),
    }
}

/// DELETE /api/v1/portfolio/{id}
async fn delete_item(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    match state.service.delete_portfolio_item(&path).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => service_error_response("Failed to delete portfolio item", &e),
    }
}
