//! 班级任务存储操作

use super::{SeaOrmStorage, ensure_updated, query_err};
use crate::entity::class_task::{ActiveModel, Column, Entity as ClassTasks};
use crate::errors::{ClassroomError, Result};
use crate::models::class_tasks::{
    entities::ClassTask,
    requests::{CreateTaskRequest, UpdateTaskRequest},
};
use crate::utils::{
    generate_id,
    time::{now_millis, to_millis, truncate_millis},
};
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

fn task_not_found() -> ClassroomError {
    ClassroomError::not_found("task does not exist")
}

impl SeaOrmStorage {
    pub async fn create_task_impl(
        &self,
        class_id: &str,
        author_id: &str,
        task: CreateTaskRequest,
    ) -> Result<ClassTask> {
        let task = ClassTask {
            task_id: generate_id(),
            class_id: class_id.to_string(),
            author_id: author_id.to_string(),
            created_at: now_millis(),
            name: task.name,
            description: task.description.unwrap_or_default(),
            due_date: truncate_millis(task.due_date),
        };

        ClassTasks::insert(ActiveModel {
            task_id: Set(task.task_id.clone()),
            class_id: Set(task.class_id.clone()),
            author_id: Set(task.author_id.clone()),
            name: Set(task.name.clone()),
            description: Set(task.description.clone()),
            due_date: Set(to_millis(task.due_date)),
            created_at: Set(to_millis(task.created_at)),
        })
        .exec_without_returning(&self.db)
        .await
        .map_err(query_err("创建任务失败"))?;

        Ok(task)
    }

    pub async fn get_task_impl(&self, task_id: &str) -> Result<ClassTask> {
        ClassTasks::find_by_id(task_id)
            .one(&self.db)
            .await
            .map_err(query_err("查询任务失败"))?
            .map(|m| m.into_class_task())
            .ok_or_else(task_not_found)
    }

    pub async fn get_tasks_impl(&self, class_id: &str) -> Result<Vec<ClassTask>> {
        let tasks = ClassTasks::find()
            .filter(Column::ClassId.eq(class_id))
            .order_by_asc(Column::DueDate)
            .order_by_asc(Column::TaskId)
            .all(&self.db)
            .await
            .map_err(query_err("查询任务列表失败"))?;

        Ok(tasks.into_iter().map(|m| m.into_class_task()).collect())
    }

    /// 半开区间 [from, to) 内的任务
    pub async fn get_tasks_with_range_impl(
        &self,
        class_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<ClassTask>> {
        let tasks = ClassTasks::find()
            .filter(Column::ClassId.eq(class_id))
            .filter(Column::DueDate.gte(to_millis(from)))
            .filter(Column::DueDate.lt(to_millis(to)))
            .order_by_asc(Column::DueDate)
            .order_by_asc(Column::TaskId)
            .all(&self.db)
            .await
            .map_err(query_err("查询任务列表失败"))?;

        Ok(tasks.into_iter().map(|m| m.into_class_task()).collect())
    }

    pub async fn update_task_impl(
        &self,
        task_id: &str,
        update: UpdateTaskRequest,
    ) -> Result<ClassTask> {
        let existing = ClassTasks::find_by_id(task_id)
            .one(&self.db)
            .await
            .map_err(query_err("查询任务失败"))?
            .ok_or_else(task_not_found)?;

        let mut task = existing.into_class_task();
        task.apply_update(&update);

        let result = ClassTasks::update_many()
            .col_expr(Column::Name, Expr::value(task.name.clone()))
            .col_expr(Column::Description, Expr::value(task.description.clone()))
            .col_expr(Column::DueDate, Expr::value(to_millis(task.due_date)))
            .filter(Column::TaskId.eq(task_id))
            .exec(&self.db)
            .await
            .map_err(query_err("更新任务失败"))?;
        ensure_updated(result.rows_affected, task_not_found)?;

        Ok(task)
    }

    pub async fn delete_task_impl(&self, task_id: &str) -> Result<()> {
        ClassTasks::delete_by_id(task_id)
            .exec(&self.db)
            .await
            .map_err(query_err("删除任务失败"))?;
        Ok(())
    }
}
