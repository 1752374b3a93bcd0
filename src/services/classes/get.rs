use tracing::debug;

use super::ClassService;
use crate::errors::{ClassroomError, Result};
use crate::models::class_schedules::entities::ClassSchedule;
use crate::models::class_tasks::{entities::ClassTask, requests::TaskRangeQuery};
use crate::models::classes::entities::Class;
use crate::runtime::RequestContext;
use crate::services::access::class_not_found;
use crate::services::class_tasks::task_window;

pub async fn get_class_info(
    service: &ClassService,
    ctx: &RequestContext,
    class_id: &str,
) -> Result<Class> {
    service
        .storage()
        .get_class(ctx, class_id)
        .await
        .map_err(|e| {
            if e.is_not_found() {
                class_not_found(class_id)
            } else {
                e
            }
        })
}

pub async fn get_class_info_by_name(
    service: &ClassService,
    ctx: &RequestContext,
    owner_username: &str,
    name: &str,
) -> Result<Class> {
    let storage = service.storage();

    let owner = storage
        .get_user_by_username(ctx, owner_username)
        .await
        .map_err(|e| {
            if e.is_not_found() {
                e.with_message(format!("can not find user with username \"{owner_username}\""))
            } else {
                e
            }
        })?;

    debug!("Resolved class owner {} to {}", owner_username, owner.user_id);

    storage
        .get_class_by_name(ctx, &owner.user_id, name)
        .await
        .map_err(|e| {
            if e.is_not_found() {
                ClassroomError::not_found(format!(
                    "can not find class with name \"{name}\" owned by \"{owner_username}\""
                ))
            } else {
                e
            }
        })
}

pub async fn list_tasks(
    service: &ClassService,
    ctx: &RequestContext,
    class_id: &str,
    range: TaskRangeQuery,
) -> Result<Vec<ClassTask>> {
    let storage = service.storage();
    get_class_info(service, ctx, class_id).await?;

    let (from, to) = task_window(range.from, range.to)?;
    storage.get_tasks_with_range(ctx, class_id, from, to).await
}

pub async fn list_schedules(
    service: &ClassService,
    ctx: &RequestContext,
    class_id: &str,
) -> Result<Vec<ClassSchedule>> {
    get_class_info(service, ctx, class_id).await?;
    service.storage().get_schedules(ctx, class_id).await
}
