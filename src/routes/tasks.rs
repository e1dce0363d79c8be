use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::models::{CreateTaskRequest, TaskListResponse, TaskStatus, UpdateStatusRequest, UserQuery};
use crate::routes::{error_body, service_error_response, AppState};

/// Configure task board routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/tasks", web::get().to(list_tasks))
        .route("/tasks", web::post().to(create_task))
        .route("/tasks/{id}/status", web::patch().to(update_status));
}

/// GET /api/v1/tasks?userId={userId}
async fn list_tasks(
    state: web::Data<AppState>,
    query: web::Query<UserQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return HttpResponse::BadRequest().json(error_body(400, "Validation failed", errors.to_string()));
    }

    match state.service.list_tasks(&query.user_id).await {
        Ok(tasks) => HttpResponse::Ok().json(TaskListResponse {
            count: tasks.len(),
            tasks,
        }),
        Err(e) => service_error_response("Failed to list tasks", &e),
    }
}

/// Create a task
///
/// POST /api/v1/tasks
///
/// Request body:
/// ```json
/// {
///   "userId": "string",
///   "title": "string",
///   "taskTitle": "string",
///   "notes": "string",
///   "dueDate": "2024-06-01",
///   "status": "pending"
/// }
/// ```
async fn create_task(
    state: web::Data<AppState>,
    req: web::Json<CreateTaskRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(error_body(400, "Validation failed", errors.to_string()));
    }

    let CreateTaskRequest { user_id, task } = req.into_inner();

    match state.service.create_task(&user_id, task).await {
        Ok(task) => HttpResponse::Created().json(task),
        Err(e) => service_error_response("Failed to create task", &e),
    }
}

/// PATCH /api/v1/tasks/{id}/status with `{"status": "pending|in_progress|completed"}`
async fn update_status(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<UpdateStatusRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(error_body(400, "Validation failed", errors.to_string()));
    }

    let status: TaskStatus = match req.status.parse() {
        Ok(status) => status,
        Err(message) => {
            return HttpResponse::BadRequest().json(error_body(400, "Invalid status", message));
        }
    };

    match state.service.update_task_status(&path, status).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => service_error_response("Failed to update task", &e),
    }
}
