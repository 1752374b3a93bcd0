use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse,
    class_tasks::requests::{CreateTaskRequest, UpdateTaskRequest},
};
use crate::routes::classes::list_class_tasks;
use crate::runtime::RequestContext;
use crate::services::ClassTaskService;

pub async fn create_task(
    req: HttpRequest,
    ctx: RequestContext,
    service: web::Data<ClassTaskService>,
    class_id: web::Path<String>,
    task: web::Json<CreateTaskRequest>,
) -> ActixResult<HttpResponse> {
    let user = RequireJWT::extract_user(&req)?;
    let task = service
        .create_task(&ctx, &user.user_id, &class_id, task.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(ApiResponse::success(task, "Task created successfully")))
}

pub async fn get_task(
    ctx: RequestContext,
    service: web::Data<ClassTaskService>,
    task_id: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let task = service.get_task(&ctx, &task_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(task, "Task retrieved")))
}

pub async fn update_task(
    req: HttpRequest,
    ctx: RequestContext,
    service: web::Data<ClassTaskService>,
    task_id: web::Path<String>,
    update: web::Json<UpdateTaskRequest>,
) -> ActixResult<HttpResponse> {
    let user = RequireJWT::extract_user(&req)?;
    let task = service
        .update_task(&ctx, &user.user_id, &task_id, update.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(task, "Task updated successfully")))
}

pub async fn delete_task(
    req: HttpRequest,
    ctx: RequestContext,
    service: web::Data<ClassTaskService>,
    task_id: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let user = RequireJWT::extract_user(&req)?;
    service.delete_task(&ctx, &user.user_id, &task_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Task deleted successfully")))
}

// 挂载在 /api/v1/classes 下
pub fn configure_class_task_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/{class_id}/tasks")
            .route(web::get().to(list_class_tasks))
            .route(web::post().to(create_task).wrap(RequireJWT)),
    );
}

pub fn configure_task_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/tasks").service(
            web::resource("/{task_id}")
                .route(web::get().to(get_task))
                .route(web::patch().to(update_task).wrap(RequireJWT))
                .route(web::delete().to(delete_task).wrap(RequireJWT)),
        ),
    );
}
