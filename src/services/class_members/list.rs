use super::ClassMemberService;
use crate::errors::Result;
use crate::models::class_members::entities::{ClassMember, MemberLevel};
use crate::runtime::RequestContext;
use crate::services::access::access_class;

pub async fn list_members(
    service: &ClassMemberService,
    ctx: &RequestContext,
    caller_id: &str,
    class_id: &str,
) -> Result<Vec<ClassMember>> {
    let storage = service.storage();
    access_class(storage, ctx, caller_id, class_id, MemberLevel::Admin).await?;
    storage.list_members(ctx, class_id).await
}
