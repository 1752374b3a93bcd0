use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::MemoryStorage;
use crate::errors::{ClassroomError, Result};
use crate::models::class_tasks::{
    entities::ClassTask,
    requests::{CreateTaskRequest, UpdateTaskRequest},
};
use crate::runtime::RequestContext;
use crate::storage::ClassTaskRepository;
use crate::utils::{
    generate_id,
    time::{now_millis, truncate_millis},
};

fn task_not_found() -> ClassroomError {
    ClassroomError::not_found("task does not exist")
}

fn sort_tasks(tasks: &mut [ClassTask]) {
    tasks.sort_by(|a, b| {
        a.due_date
            .cmp(&b.due_date)
            .then_with(|| a.task_id.cmp(&b.task_id))
    });
}

#[async_trait]
impl ClassTaskRepository for MemoryStorage {
    async fn create_task(
        &self,
        ctx: &RequestContext,
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
        let mut tasks = self.tasks.write().await;
        ctx.ensure_active()?;
        tasks.insert(task.task_id.clone(), task.clone());
        Ok(task)
    }

    async fn get_task(&self, ctx: &RequestContext, task_id: &str) -> Result<ClassTask> {
        ctx.ensure_active()?;
        self.tasks
            .read()
            .await
            .get(task_id)
            .cloned()
            .ok_or_else(task_not_found)
    }

    async fn get_tasks(&self, ctx: &RequestContext, class_id: &str) -> Result<Vec<ClassTask>> {
        ctx.ensure_active()?;
        let mut tasks: Vec<ClassTask> = self
            .tasks
            .read()
            .await
            .values()
            .filter(|t| t.class_id == class_id)
            .cloned()
            .collect();
        sort_tasks(&mut tasks);
        Ok(tasks)
    }

    async fn get_tasks_with_range(
        &self,
        ctx: &RequestContext,
        class_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<ClassTask>> {
        ctx.ensure_active()?;
        let (from, to) = (truncate_millis(from), truncate_millis(to));
        let mut tasks: Vec<ClassTask> = self
            .tasks
            .read()
            .await
            .values()
            .filter(|t| t.class_id == class_id && t.due_date >= from && t.due_date < to)
            .cloned()
            .collect();
        sort_tasks(&mut tasks);
        Ok(tasks)
    }

    async fn update_task(
        &self,
        ctx: &RequestContext,
        task_id: &str,
        update: UpdateTaskRequest,
    ) -> Result<ClassTask> {
        let mut tasks = self.tasks.write().await;
        ctx.ensure_active()?;
        let task = tasks.get_mut(task_id).ok_or_else(task_not_found)?;
        task.apply_update(&update);
        Ok(task.clone())
    }

    async fn delete_task(&self, ctx: &RequestContext, task_id: &str) -> Result<()> {
        let mut tasks = self.tasks.write().await;
        ctx.ensure_active()?;
        tasks.remove(task_id);
        Ok(())
    }
}
