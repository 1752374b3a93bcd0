use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse,
    class_tasks::requests::TaskRangeQuery,
    classes::requests::{CreateClassRequest, UpdateClassRequest},
};
use crate::routes::{class_members, class_schedules, class_tasks};
use crate::runtime::RequestContext;
use crate::services::ClassService;

// HTTP处理程序
pub async fn create_class(
    req: HttpRequest,
    ctx: RequestContext,
    service: web::Data<ClassService>,
    class_data: web::Json<CreateClassRequest>,
) -> ActixResult<HttpResponse> {
    let user = RequireJWT::extract_user(&req)?;
    let class = service
        .create_class(&ctx, &user.user_id, class_data.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(ApiResponse::success(class, "Class created successfully")))
}

pub async fn get_class(
    ctx: RequestContext,
    service: web::Data<ClassService>,
    class_id: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let class = service.get_class_info(&ctx, &class_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(class, "Class retrieved")))
}

pub async fn get_class_by_name(
    ctx: RequestContext,
    service: web::Data<ClassService>,
    path: web::Path<(String, String)>,
) -> ActixResult<HttpResponse> {
    let (username, name) = path.into_inner();
    let class = service.get_class_info_by_name(&ctx, &username, &name).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(class, "Class retrieved")))
}

pub async fn update_class(
    req: HttpRequest,
    ctx: RequestContext,
    service: web::Data<ClassService>,
    class_id: web::Path<String>,
    update_data: web::Json<UpdateClassRequest>,
) -> ActixResult<HttpResponse> {
    let user = RequireJWT::extract_user(&req)?;
    let class = service
        .update_class(&ctx, &user.user_id, &class_id, update_data.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(class, "Class updated successfully")))
}

pub async fn delete_class(
    req: HttpRequest,
    ctx: RequestContext,
    service: web::Data<ClassService>,
    class_id: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let user = RequireJWT::extract_user(&req)?;
    service.delete_class(&ctx, &user.user_id, &class_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Class deleted successfully")))
}

pub async fn list_class_tasks(
    ctx: RequestContext,
    service: web::Data<ClassService>,
    class_id: web::Path<String>,
    range: web::Query<TaskRangeQuery>,
) -> ActixResult<HttpResponse> {
    let tasks = service
        .list_tasks(&ctx, &class_id, range.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(tasks, "Tasks retrieved")))
}

pub async fn list_class_schedules(
    ctx: RequestContext,
    service: web::Data<ClassService>,
    class_id: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let schedules = service.list_schedules(&ctx, &class_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(schedules, "Schedules retrieved")))
}

// 配置路由
//
// 同一前缀只能注册一个 scope，成员 / 任务 / 课表的班级子路由在这里挂载
pub fn configure_classes_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/classes")
            .service(
                web::resource("")
                    .wrap(RequireJWT)
                    .route(web::post().to(create_class)),
            )
            // 必须先于 /{class_id}/... 注册
            .route("/by-name/{username}/{name}", web::get().to(get_class_by_name))
            .service(
                web::resource("/{class_id}")
                    .route(web::get().to(get_class))
                    .route(web::patch().to(update_class).wrap(RequireJWT))
                    .route(web::delete().to(delete_class).wrap(RequireJWT)),
            )
            .configure(class_members::configure_class_members_routes)
            .configure(class_tasks::configure_class_task_routes)
            .configure(class_schedules::configure_class_schedule_routes),
    );
}
