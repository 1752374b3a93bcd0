use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use serde::Serialize;

use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, class_schedules::requests::CreateScheduleRequest};
use crate::routes::classes::list_class_schedules;
use crate::runtime::RequestContext;
use crate::services::ClassScheduleService;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ClearSchedulesResponse {
    removed: u64,
}

pub async fn create_schedule(
    req: HttpRequest,
    ctx: RequestContext,
    service: web::Data<ClassScheduleService>,
    class_id: web::Path<String>,
    schedule: web::Json<CreateScheduleRequest>,
) -> ActixResult<HttpResponse> {
    let user = RequireJWT::extract_user(&req)?;
    let schedule = service
        .create_schedule(&ctx, &user.user_id, &class_id, schedule.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(ApiResponse::success(
        schedule,
        "Schedule created successfully",
    )))
}

pub async fn clear_schedules(
    req: HttpRequest,
    ctx: RequestContext,
    service: web::Data<ClassScheduleService>,
    path: web::Path<(String, i16)>,
) -> ActixResult<HttpResponse> {
    let user = RequireJWT::extract_user(&req)?;
    let (class_id, day) = path.into_inner();
    let removed = service
        .clear_schedules(&ctx, &user.user_id, &class_id, day)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        ClearSchedulesResponse { removed },
        "Schedules cleared successfully",
    )))
}

pub async fn get_schedule(
    ctx: RequestContext,
    service: web::Data<ClassScheduleService>,
    schedule_id: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let schedule = service.get_schedule(&ctx, &schedule_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(schedule, "Schedule retrieved")))
}

pub async fn delete_schedule(
    req: HttpRequest,
    ctx: RequestContext,
    service: web::Data<ClassScheduleService>,
    schedule_id: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let user = RequireJWT::extract_user(&req)?;
    service
        .delete_schedule(&ctx, &user.user_id, &schedule_id)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Schedule deleted successfully")))
}

// 挂载在 /api/v1/classes 下
pub fn configure_class_schedule_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/{class_id}/schedules")
            .route(web::get().to(list_class_schedules))
            .route(web::post().to(create_schedule).wrap(RequireJWT)),
    )
    .service(
        web::resource("/{class_id}/schedules/day/{day}")
            .wrap(RequireJWT)
            .route(web::delete().to(clear_schedules)),
    );
}

pub fn configure_schedule_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/schedules").service(
            web::resource("/{schedule_id}")
                .route(web::get().to(get_schedule))
                .route(web::delete().to(delete_schedule).wrap(RequireJWT)),
        ),
    );
}
