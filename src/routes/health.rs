use actix_web::{HttpResponse, Result as ActixResult, web};
use serde::Serialize;

use crate::models::{ApiResponse, AppStartTime};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthStatus {
    status: &'static str,
    version: &'static str,
    uptime_seconds: i64,
}

pub async fn health(start_time: Option<web::Data<AppStartTime>>) -> ActixResult<HttpResponse> {
    let uptime_seconds = start_time
        .map(|t| {
            chrono::Utc::now()
                .signed_duration_since(t.start_datetime)
                .num_seconds()
        })
        .unwrap_or_default();

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        HealthStatus {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
            uptime_seconds,
        },
        "Service is healthy",
    )))
}

// 配置路由
pub fn configure_health_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/v1/health", web::get().to(health));
}
