//! API 路由层
//!
//! 处理程序只负责提取参数与包装响应，业务逻辑在 services 中。
//! 标注为公开的接口不经过 `RequireJWT`。

pub mod class_members;

pub mod class_schedules;

pub mod class_tasks;

pub mod classes;

pub mod health;

pub mod users;

pub use class_schedules::configure_schedule_routes;
pub use class_tasks::configure_task_routes;
pub use classes::configure_classes_routes;
pub use health::configure_health_routes;
pub use users::configure_user_routes;

use actix_web::web;

/// 注册全部 API 路由
pub fn configure_api_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_health_routes)
        .configure(configure_user_routes)
        .configure(configure_classes_routes)
        .configure(configure_task_routes)
        .configure(configure_schedule_routes);
}
