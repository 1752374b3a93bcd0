use tracing::info;

use super::{ClassMemberService, ensure_grantable};
use crate::errors::{ClassroomError, Result};
use crate::models::class_members::{
    entities::{ClassMember, MemberLevel},
    requests::AddMemberRequest,
};
use crate::runtime::RequestContext;
use crate::services::access::access_class;
use crate::utils::validate::validate_username;

pub async fn add_member_by_username(
    service: &ClassMemberService,
    ctx: &RequestContext,
    caller_id: &str,
    class_id: &str,
    request: AddMemberRequest,
) -> Result<ClassMember> {
    validate_username(&request.username)?;

    let storage = service.storage();
    let caller = access_class(storage, ctx, caller_id, class_id, MemberLevel::Admin).await?;

    let level = request.level.unwrap_or_default();
    ensure_grantable(caller.level, level)?;

    // 引用的用户不存在属于无法处理的请求，而不是资源缺失
    let user = storage
        .get_user_by_username(ctx, &request.username)
        .await
        .map_err(|e| {
            if e.is_not_found() {
                ClassroomError::unprocessable(format!(
                    "can not find user with username \"{}\"",
                    request.username
                ))
            } else {
                e
            }
        })?;

    let member = storage
        .create_member(ctx, class_id, &user.user_id, level)
        .await?;
    info!(
        "User {} added to class {} as {} by {}",
        user.user_id, class_id, level, caller_id
    );
    Ok(member)
}
