use tracing::info;

use super::UserService;
use crate::errors::Result;
use crate::models::users::{entities::User, requests::UpdateUserRequest};
use crate::runtime::RequestContext;
use crate::utils::Validate;

// 用户名冲突由存储层返回 AlreadyExists
pub async fn update_user(
    service: &UserService,
    ctx: &RequestContext,
    user_id: &str,
    update: UpdateUserRequest,
) -> Result<User> {
    update.validate()?;

    let user = service.storage().update_user(ctx, user_id, update).await?;
    info!("User {} updated profile, username {}", user_id, user.username);
    Ok(user)
}
