use tracing::info;

use super::ClassTaskService;
use crate::errors::Result;
use crate::models::class_members::entities::MemberLevel;
use crate::models::class_tasks::{entities::ClassTask, requests::UpdateTaskRequest};
use crate::runtime::RequestContext;
use crate::services::access::{access_class, class_not_found};
use crate::utils::Validate;

pub async fn update_task(
    service: &ClassTaskService,
    ctx: &RequestContext,
    caller_id: &str,
    task_id: &str,
    update: UpdateTaskRequest,
) -> Result<ClassTask> {
    update.validate()?;

    let storage = service.storage();
    let task = super::get::get_task(service, ctx, task_id).await?;

    // 重新解析所属班级
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

    let minimum = if task.author_id == caller_id {
        MemberLevel::Member
    } else {
        MemberLevel::Admin
    };
    access_class(storage, ctx, caller_id, &task.class_id, minimum).await?;

    let task = storage.update_task(ctx, task_id, update).await?;
    info!("Task {} updated by {}", task_id, caller_id);
    Ok(task)
}
