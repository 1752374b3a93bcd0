use tracing::info;

use super::{ClassMemberService, ensure_grantable};
use crate::errors::{ClassroomError, Result};
use crate::models::class_members::{
    entities::{ClassMember, MemberLevel},
    requests::UpdateMemberRequest,
};
use crate::runtime::RequestContext;
use crate::services::access::access_class;

pub async fn update_member(
    service: &ClassMemberService,
    ctx: &RequestContext,
    caller_id: &str,
    class_id: &str,
    user_id: &str,
    update: UpdateMemberRequest,
) -> Result<ClassMember> {
    let storage = service.storage();
    let caller = access_class(storage, ctx, caller_id, class_id, MemberLevel::Admin).await?;

    if let Some(level) = update.level {
        ensure_grantable(caller.level, level)?;
    }

    let target = storage.get_member(ctx, class_id, user_id).await.map_err(|e| {
        if e.is_not_found() {
            e.with_message(format!(
                "can not find member \"{user_id}\" in class \"{class_id}\""
            ))
        } else {
            e
        }
    })?;
    if target.level == MemberLevel::Owner {
        return Err(ClassroomError::forbidden("the owner of a class can not be changed"));
    }

    let member = storage.update_member(ctx, class_id, user_id, update).await?;
    info!(
        "Member {} of class {} set to {} by {}",
        user_id, class_id, member.level, caller_id
    );
    Ok(member)
}
