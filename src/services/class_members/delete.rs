use tracing::info;

use super::ClassMemberService;
use crate::errors::{ClassroomError, Result};
use crate::models::class_members::entities::MemberLevel;
use crate::runtime::RequestContext;
use crate::services::access::access_class;

// 目标不存在时视为已删除
pub async fn delete_member(
    service: &ClassMemberService,
    ctx: &RequestContext,
    caller_id: &str,
    class_id: &str,
    user_id: &str,
) -> Result<()> {
    let storage = service.storage();
    access_class(storage, ctx, caller_id, class_id, MemberLevel::Admin).await?;

    let target = match storage.get_member(ctx, class_id, user_id).await {
        Ok(target) => target,
        Err(e) if e.is_not_found() => return Ok(()),
        Err(e) => return Err(e),
    };
    if target.level == MemberLevel::Owner {
        return Err(ClassroomError::forbidden("the owner of a class can not be removed"));
    }

    storage.delete_member(ctx, class_id, user_id).await?;
    info!("Member {} removed from class {} by {}", user_id, class_id, caller_id);
    Ok(())
}
