use tracing::info;

use super::ClassTaskService;
use crate::errors::Result;
use crate::models::class_members::entities::MemberLevel;
use crate::runtime::RequestContext;
use crate::services::access::{access_class, class_not_found};

// 已删除的任务在加载阶段返回 NotFound，存储层删除本身保持幂等
pub async fn delete_task(
    service: &ClassTaskService,
    ctx: &RequestContext,
    caller_id: &str,
    task_id: &str,
) -> Result<()> {
    let storage = service.storage();
    let task = super::get::get_task(service, ctx, task_id).await?;

    storage
        .get_class(ctx, &task.class_id)
        .await
        .map_err(|e| {
            if e.is_not_found() {
                class_not_found(&task.class_id)
            } else {
                e
            }
        })?;
    access_class(storage, ctx, caller_id, &task.class_id, MemberLevel::Admin).await?;

    storage.delete_task(ctx, task_id).await?;
    info!("Task {} deleted by {}", task_id, caller_id);
    Ok(())
}
