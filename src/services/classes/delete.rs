use tracing::info;

use super::ClassService;
use crate::errors::Result;
use crate::models::class_members::entities::MemberLevel;
use crate::runtime::RequestContext;
use crate::services::access::access_class;

// 只删除班级记录，成员、任务与课表不级联删除
pub async fn delete_class(
    service: &ClassService,
    ctx: &RequestContext,
    caller_id: &str,
    class_id: &str,
) -> Result<()> {
    let storage = service.storage();
    access_class(storage, ctx, caller_id, class_id, MemberLevel::Admin).await?;

    storage.delete_class(ctx, class_id).await?;
    info!("Class {} deleted by {}", class_id, caller_id);
    Ok(())
}
