use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, users::requests::UpdateUserRequest};
use crate::runtime::RequestContext;
use crate::services::UserService;

// 当前用户主页
pub async fn get_user_profile(
    req: HttpRequest,
    ctx: RequestContext,
    service: web::Data<UserService>,
) -> ActixResult<HttpResponse> {
    let user = RequireJWT::extract_user(&req)?;
    let profile = service.get_user_profile(&ctx, user).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(profile, "User profile retrieved")))
}

pub async fn update_user_profile(
    req: HttpRequest,
    ctx: RequestContext,
    service: web::Data<UserService>,
    update: web::Json<UpdateUserRequest>,
) -> ActixResult<HttpResponse> {
    let user = RequireJWT::extract_user(&req)?;
    let user = service
        .update_user(&ctx, &user.user_id, update.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        user,
        "User information updated successfully",
    )))
}

pub async fn get_user_classes(
    req: HttpRequest,
    ctx: RequestContext,
    service: web::Data<UserService>,
) -> ActixResult<HttpResponse> {
    let user = RequireJWT::extract_user(&req)?;
    let classes = service.get_user_classes(&ctx, &user.user_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(classes, "Owned classes retrieved")))
}

pub async fn get_user_joined_classes(
    req: HttpRequest,
    ctx: RequestContext,
    service: web::Data<UserService>,
) -> ActixResult<HttpResponse> {
    let user = RequireJWT::extract_user(&req)?;
    let members = service.get_user_joined_classes(&ctx, &user.user_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(members, "Joined classes retrieved")))
}

pub async fn get_other_user_profile(
    ctx: RequestContext,
    service: web::Data<UserService>,
    user_id: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let profile = service.get_user_profile_by_id(&ctx, &user_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(profile, "User profile retrieved")))
}

pub async fn get_other_user_profile_by_username(
    ctx: RequestContext,
    service: web::Data<UserService>,
    username: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let profile = service.get_user_profile_by_username(&ctx, &username).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(profile, "User profile retrieved")))
}

// 配置路由
pub fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/users")
            .service(
                web::resource("/profile")
                    .wrap(RequireJWT)
                    .route(web::get().to(get_user_profile))
                    .route(web::patch().to(update_user_profile)),
            )
            .service(
                web::resource("/classes")
                    .wrap(RequireJWT)
                    .route(web::get().to(get_user_classes)),
            )
            .service(
                web::resource("/joined")
                    .wrap(RequireJWT)
                    .route(web::get().to(get_user_joined_classes)),
            )
            // 公开接口：查看他人主页
            .route("/id/{user_id}/profile", web::get().to(get_other_user_profile))
            .route(
                "/username/{username}/profile",
                web::get().to(get_other_user_profile_by_username),
            ),
    );
}
