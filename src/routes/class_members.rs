use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse,
    class_members::requests::{AddMemberRequest, UpdateMemberRequest},
};
use crate::runtime::RequestContext;
use crate::services::ClassMemberService;

pub async fn list_members(
    req: HttpRequest,
    ctx: RequestContext,
    service: web::Data<ClassMemberService>,
    class_id: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let user = RequireJWT::extract_user(&req)?;
    let members = service.list_members(&ctx, &user.user_id, &class_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(members, "Members retrieved")))
}

pub async fn add_member(
    req: HttpRequest,
    ctx: RequestContext,
    service: web::Data<ClassMemberService>,
    class_id: web::Path<String>,
    member: web::Json<AddMemberRequest>,
) -> ActixResult<HttpResponse> {
    let user = RequireJWT::extract_user(&req)?;
    let member = service
        .add_member_by_username(&ctx, &user.user_id, &class_id, member.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(ApiResponse::success(member, "Member added successfully")))
}

pub async fn update_member(
    req: HttpRequest,
    ctx: RequestContext,
    service: web::Data<ClassMemberService>,
    path: web::Path<(String, String)>,
    update: web::Json<UpdateMemberRequest>,
) -> ActixResult<HttpResponse> {
    let user = RequireJWT::extract_user(&req)?;
    let (class_id, user_id) = path.into_inner();
    let member = service
        .update_member(&ctx, &user.user_id, &class_id, &user_id, update.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(member, "Member updated successfully")))
}

pub async fn delete_member(
    req: HttpRequest,
    ctx: RequestContext,
    service: web::Data<ClassMemberService>,
    path: web::Path<(String, String)>,
) -> ActixResult<HttpResponse> {
    let user = RequireJWT::extract_user(&req)?;
    let (class_id, user_id) = path.into_inner();
    service
        .delete_member(&ctx, &user.user_id, &class_id, &user_id)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Member removed successfully")))
}

// 挂载在 /api/v1/classes 下，全部需要登录
pub fn configure_class_members_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/{class_id}/members")
            .wrap(RequireJWT)
            .route(web::get().to(list_members))
            .route(web::post().to(add_member)),
    )
    .service(
        web::resource("/{class_id}/members/{user_id}")
            .wrap(RequireJWT)
            .route(web::patch().to(update_member))
            .route(web::delete().to(delete_member)),
    );
}
