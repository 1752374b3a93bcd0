use super::{ClassTaskService, task_window};
use crate::errors::Result;
use crate::models::class_tasks::{entities::ClassTask, requests::TaskRangeQuery};
use crate::runtime::RequestContext;

pub async fn get_task(
    service: &ClassTaskService,
    ctx: &RequestContext,
    task_id: &str,
) -> Result<ClassTask> {
    service
        .storage()
        .get_task(ctx, task_id)
        .await
        .map_err(|e| {
            if e.is_not_found() {
                e.with_message(format!("can not find task with id \"{task_id}\""))
            } else {
                e
            }
        })
}

// 半开区间 [from, to)
pub async fn get_tasks_with_range(
    service: &ClassTaskService,
    ctx: &RequestContext,
    class_id: &str,
    range: TaskRangeQuery,
) -> Result<Vec<ClassTask>> {
    let (from, to) = task_window(range.from, range.to)?;
    service
        .storage()
        .get_tasks_with_range(ctx, class_id, from, to)
        .await
}
