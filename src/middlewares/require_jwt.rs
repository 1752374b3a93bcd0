/*!
 * JWT 认证中间件
 *
 * 校验外部身份提供方签发的 HS256 令牌，并把对应的本地用户放入请求扩展。
 * 首次出现的用户会按令牌中的 sub / email 自动创建。
 *
 * ## 使用方法
 *
 * ```rust,ignore
 * use actix_web::{web, App};
 * use crate::middlewares::RequireJWT;
 *
 * App::new().service(
 *     web::scope("/classes")
 *         .wrap(RequireJWT)
 *         .route("", web::post().to(create_class)),
 * );
 *
 * async fn create_class(req: HttpRequest) -> ActixResult<HttpResponse> {
 *     let user = RequireJWT::extract_user(&req)?;
 *     // ...
 * }
 * ```
 *
 * ## 认证流程
 *
 * 1. 客户端在请求头中包含 `Authorization: Bearer <JWT_TOKEN>`
 * 2. 中间件校验签名与过期时间
 * 3. 读取或创建本地用户，存入请求扩展后继续处理
 * 4. 令牌无效或缺失时返回 401
 */

use std::rc::Rc;

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpRequest, HttpResponse, ResponseError,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::{Method, StatusCode},
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{debug, info};

use crate::config::StorageConfig;
use crate::errors::{ClassroomError, Result};
use crate::models::users::entities::User;
use crate::runtime::RequestContext;
use crate::services::UserService;
use crate::utils::jwt::JwtUtils;

const BEARER_PREFIX: &str = "Bearer ";
const AUTHORIZATION_HEADER: &str = "Authorization";

#[derive(Clone)]
pub struct RequireJWT;

// 提取并验证令牌，返回本地用户
async fn extract_and_validate_jwt(req: &ServiceRequest) -> Result<User> {
    let token = req
        .headers()
        .get(AUTHORIZATION_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix(BEARER_PREFIX))
        .ok_or_else(|| {
            ClassroomError::authentication("Missing or invalid Authorization header")
        })?;

    let jwt = req
        .app_data::<web::Data<JwtUtils>>()
        .ok_or_else(|| ClassroomError::authentication("JWT verifier not configured"))?;

    let claims = jwt.verify_token(token).map_err(|err| {
        info!("JWT token validation failed: {}", err);
        ClassroomError::authentication("Invalid JWT token")
    })?;
    if claims.sub.is_empty() {
        return Err(ClassroomError::authentication("Missing subject in JWT"));
    }

    let users = req
        .app_data::<web::Data<UserService>>()
        .ok_or_else(|| ClassroomError::authentication("User service not configured"))?;
    let ctx = req
        .app_data::<web::Data<StorageConfig>>()
        .map(|config| RequestContext::from_config(config))
        .unwrap_or_default();

    users.get_or_provision(&ctx, &claims.sub, &claims.email).await
}

impl<S, B> Transform<S, ServiceRequest> for RequireJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireJWTMiddleware<S>;
    type Future = Ready<std::result::Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireJWTMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireJWTMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireJWTMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, std::result::Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<std::result::Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            // 预检请求直接放行
            if req.method() == Method::OPTIONS {
                return Ok(req.into_response(
                    HttpResponse::build(StatusCode::NO_CONTENT)
                        .finish()
                        .map_into_right_body(),
                ));
            }

            match extract_and_validate_jwt(&req).await {
                Ok(user) => {
                    debug!("JWT authentication successful for ID: {}", user.user_id);
                    req.extensions_mut().insert(user);
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err(err) => {
                    info!(
                        "JWT authentication failed for request to {}: {}",
                        req.path(),
                        err
                    );
                    // 存储层的错误按原类别返回，其余一律 401
                    let err = match err {
                        ClassroomError::Authentication(_)
                        | ClassroomError::Cancelled(_)
                        | ClassroomError::DeadlineExceeded(_)
                        | ClassroomError::DatabaseConnection(_)
                        | ClassroomError::DatabaseOperation(_) => err,
                        other => ClassroomError::authentication(format!(
                            "Unauthorized: {}",
                            other.message()
                        )),
                    };
                    Ok(req.into_response(err.error_response().map_into_right_body()))
                }
            }
        })
    }
}

// 辅助函数：从请求中提取用户信息
impl RequireJWT {
    /// 从请求扩展中提取当前用户
    /// 此函数应该在应用了RequireJWT中间件的路由处理程序中使用
    pub fn extract_user(req: &HttpRequest) -> Result<User> {
        req.extensions()
            .get::<User>()
            .cloned()
            .ok_or_else(|| ClassroomError::authentication("Unauthorized: missing user"))
    }
}
