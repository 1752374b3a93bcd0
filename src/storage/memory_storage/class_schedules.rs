use async_trait::async_trait;

use super::MemoryStorage;
use crate::errors::{ClassroomError, Result};
use crate::models::class_schedules::{entities::ClassSchedule, requests::CreateScheduleRequest};
use crate::runtime::RequestContext;
use crate::storage::ClassScheduleRepository;
use crate::utils::{generate_id, time::now_millis};

#[async_trait]
impl ClassScheduleRepository for MemoryStorage {
    async fn create_schedule(
        &self,
        ctx: &RequestContext,
        class_id: &str,
        author_id: &str,
        schedule: CreateScheduleRequest,
    ) -> Result<ClassSchedule> {
        let schedule = ClassSchedule {
            schedule_id: generate_id(),
            class_id: class_id.to_string(),
            author_id: author_id.to_string(),
            created_at: now_millis(),
            name: schedule.name,
            start_at: schedule.start_at,
            duration: schedule.duration,
            day: schedule.day,
        };
        let mut schedules = self.schedules.write().await;
        ctx.ensure_active()?;
        schedules.insert(schedule.schedule_id.clone(), schedule.clone());
        Ok(schedule)
    }

    async fn get_schedule(&self, ctx: &RequestContext, schedule_id: &str) -> Result<ClassSchedule> {
        ctx.ensure_active()?;
        self.schedules
            .read()
            .await
            .get(schedule_id)
            .cloned()
            .ok_or_else(|| ClassroomError::not_found("schedule does not exist"))
    }

    async fn get_schedules(
        &self,
        ctx: &RequestContext,
        class_id: &str,
    ) -> Result<Vec<ClassSchedule>> {
        ctx.ensure_active()?;
        let mut schedules: Vec<ClassSchedule> = self
            .schedules
            .read()
            .await
            .values()
            .filter(|s| s.class_id == class_id)
            .cloned()
            .collect();
        schedules.sort_by(|a, b| {
            (a.day, a.start_at, &a.schedule_id).cmp(&(b.day, b.start_at, &b.schedule_id))
        });
        Ok(schedules)
    }

    async fn delete_schedule(&self, ctx: &RequestContext, schedule_id: &str) -> Result<()> {
        let mut schedules = self.schedules.write().await;
        ctx.ensure_active()?;
        schedules.remove(schedule_id);
        Ok(())
    }

    async fn clear_schedules(&self, ctx: &RequestContext, class_id: &str, day: i16)
    -> Result<u64> {
        let mut schedules = self.schedules.write().await;
        ctx.ensure_active()?;
        let before = schedules.len();
        schedules.retain(|_, s| !(s.class_id == class_id && s.day == day));
        Ok((before - schedules.len()) as u64)
    }
}
