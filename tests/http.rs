//! HTTP 层冒烟测试：路由、令牌中间件与错误映射

use std::sync::Arc;

use actix_web::{App, http::StatusCode, test, web};
use rust_classroom_next::config::StorageConfig;
use rust_classroom_next::routes;
use rust_classroom_next::runtime::lifetime::startup::StartupContext;
use rust_classroom_next::storage::{MemoryStorage, Storage};
use rust_classroom_next::utils::{json_error_handler, jwt::JwtUtils};
use serde_json::{Value, json};

const SECRET: &str = "http-test-secret";

fn startup() -> StartupContext {
    let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
    StartupContext::new(storage, JwtUtils::new(SECRET), StorageConfig::default())
}

fn bearer(user_id: &str, email: &str) -> (&'static str, String) {
    let token = JwtUtils::new(SECRET)
        .generate_token_with_expiry(user_id, email, chrono::Duration::minutes(5))
        .unwrap();
    ("Authorization", format!("Bearer {token}"))
}

macro_rules! app {
    ($startup:expr) => {
        test::init_service(
            App::new()
                .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                .configure(|cfg| $startup.configure_app_data(cfg))
                .configure(routes::configure_api_routes),
        )
        .await
    };
}

#[actix_web::test]
async fn test_health_is_public() {
    let startup = startup();
    let app = app!(startup);

    let req = test::TestRequest::get().uri("/api/v1/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 0);
    assert_eq!(body["data"]["status"], "ok");
}

#[actix_web::test]
async fn test_missing_or_bad_token_is_unauthorized() {
    let startup = startup();
    let app = app!(startup);

    let req = test::TestRequest::post()
        .uri("/api/v1/classes")
        .set_json(json!({ "name": "math" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let forged = JwtUtils::new("other-secret")
        .generate_token_with_expiry("u1", "", chrono::Duration::minutes(5))
        .unwrap();
    let req = test::TestRequest::get()
        .uri("/api/v1/users/profile")
        .insert_header(("Authorization", format!("Bearer {forged}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_class_lifecycle_over_http() {
    let startup = startup();
    let app = app!(startup);
    let owner = bearer("owner-1", "owner@example.com");
    let outsider = bearer("outsider-1", "outsider@example.com");

    let req = test::TestRequest::post()
        .uri("/api/v1/classes")
        .insert_header(owner.clone())
        .set_json(json!({ "name": "math", "description": "algebra" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let class_id = body["data"]["classId"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["ownerId"], "owner-1");

    // 公开读取
    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/classes/{class_id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // 首次请求时自动创建的用户
    let req = test::TestRequest::get()
        .uri("/api/v1/users/profile")
        .insert_header(owner.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["userId"], "owner-1");
    assert_eq!(body["data"]["userStatistics"]["ownedClass"], 1);

    // 非成员创建任务
    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/classes/{class_id}/tasks"))
        .insert_header(outsider)
        .set_json(json!({ "name": "essay", "dueDate": "2030-01-01T00:00:00Z" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // 课表日期不合法
    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/classes/{class_id}/schedules/day/9"))
        .insert_header(owner.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/classes/{class_id}"))
        .insert_header(owner)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/classes/{class_id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body["message"],
        format!("can not find class with id \"{class_id}\"")
    );
}

#[actix_web::test]
async fn test_add_unknown_member_is_unprocessable() {
    let startup = startup();
    let app = app!(startup);
    let owner = bearer("owner-1", "owner@example.com");

    let req = test::TestRequest::post()
        .uri("/api/v1/classes")
        .insert_header(owner.clone())
        .set_json(json!({ "name": "math" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let class_id = body["data"]["classId"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/classes/{class_id}/members"))
        .insert_header(owner)
        .set_json(json!({ "username": "ghost" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[actix_web::test]
async fn test_task_window_near_max_time_is_bad_request() {
    let startup = startup();
    let app = app!(startup);
    let owner = bearer("owner-1", "owner@example.com");

    let req = test::TestRequest::post()
        .uri("/api/v1/classes")
        .insert_header(owner)
        .set_json(json!({ "name": "math" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let class_id = body["data"]["classId"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri(&format!(
            "/api/v1/classes/{class_id}/tasks?from=%2B262142-12-30T00:00:00Z"
        ))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // 服务仍可用
    let req = test::TestRequest::get().uri("/api/v1/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}
