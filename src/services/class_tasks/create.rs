use tracing::info;

use super::ClassTaskService;
use crate::errors::Result;
use crate::models::class_members::entities::MemberLevel;
use crate::models::class_tasks::{entities::ClassTask, requests::CreateTaskRequest};
use crate::runtime::RequestContext;
use crate::services::access::access_class;
use crate::utils::Validate;

pub async fn create_task(
    service: &ClassTaskService,
    ctx: &RequestContext,
    caller_id: &str,
    class_id: &str,
    task: CreateTaskRequest,
) -> Result<ClassTask> {
    task.validate()?;

    let storage = service.storage();
    access_class(storage, ctx, caller_id, class_id, MemberLevel::Member).await?;

    let task = storage.create_task(ctx, class_id, caller_id, task).await?;
    info!("Task {} created in class {} by {}", task.task_id, class_id, caller_id);
    Ok(task)
}
