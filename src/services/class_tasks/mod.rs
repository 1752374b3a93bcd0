pub mod create;
pub mod delete;
pub mod get;
pub mod update;

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use crate::errors::{ClassroomError, Result};
use crate::models::class_tasks::{
    entities::ClassTask,
    requests::{CreateTaskRequest, TaskRangeQuery, UpdateTaskRequest},
};
use crate::runtime::RequestContext;
use crate::storage::Storage;

/// 未指定区间时的默认窗口长度
pub const DEFAULT_TASK_WINDOW_DAYS: i64 = 7;

/// 计算任务查询窗口：from 缺省为现在，to 缺省为 from + 7 天
///
/// from 过于接近时间上限导致无法推算 to 时返回校验错误。
pub fn task_window(
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    let from = from.unwrap_or_else(Utc::now);
    let to = match to {
        Some(to) => to,
        None => from
            .checked_add_signed(Duration::days(DEFAULT_TASK_WINDOW_DAYS))
            .ok_or_else(|| ClassroomError::validation("from is out of range"))?,
    };
    Ok((from, to))
}

pub struct ClassTaskService {
    storage: Arc<dyn Storage>,
}

impl ClassTaskService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub(crate) fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }

    // 创建任务，需要 member 及以上
    pub async fn create_task(
        &self,
        ctx: &RequestContext,
        caller_id: &str,
        class_id: &str,
        task: CreateTaskRequest,
    ) -> Result<ClassTask> {
        create::create_task(self, ctx, caller_id, class_id, task).await
    }

    pub async fn get_task(&self, ctx: &RequestContext, task_id: &str) -> Result<ClassTask> {
        get::get_task(self, ctx, task_id).await
    }

    pub async fn get_tasks_with_range(
        &self,
        ctx: &RequestContext,
        class_id: &str,
        range: TaskRangeQuery,
    ) -> Result<Vec<ClassTask>> {
        get::get_tasks_with_range(self, ctx, class_id, range).await
    }

    // 作者需要 member，其他人需要 admin
    pub async fn update_task(
        &self,
        ctx: &RequestContext,
        caller_id: &str,
        task_id: &str,
        update: UpdateTaskRequest,
    ) -> Result<ClassTask> {
        update::update_task(self, ctx, caller_id, task_id, update).await
    }

    pub async fn delete_task(
        &self,
        ctx: &RequestContext,
        caller_id: &str,
        task_id: &str,
    ) -> Result<()> {
        delete::delete_task(self, ctx, caller_id, task_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_window_is_seven_days() {
        let from = Utc::now();
        let (start, end) = task_window(Some(from), None).unwrap();
        assert_eq!(start, from);
        assert_eq!(end - start, Duration::days(7));

        let (start, end) = task_window(None, None).unwrap();
        assert_eq!(end - start, Duration::days(7));
    }

    #[test]
    fn test_window_near_max_time_is_rejected() {
        let query: TaskRangeQuery =
            serde_json::from_str(r#"{"from":"+262142-12-30T00:00:00Z"}"#).unwrap();
        let err = task_window(query.from, query.to).unwrap_err();
        assert!(matches!(err, ClassroomError::Validation(_)));

        // 显式给出 to 时不需要推算
        let to = DateTime::<Utc>::MAX_UTC;
        assert!(task_window(query.from, Some(to)).is_ok());
    }

    #[test]
    fn test_explicit_window_kept() {
        let from = Utc::now();
        let to = from + Duration::hours(3);
        assert_eq!(task_window(Some(from), Some(to)).unwrap(), (from, to));
    }
}
