pub mod create;
pub mod delete;
pub mod get;

use std::sync::Arc;

use crate::errors::Result;
use crate::models::class_schedules::{
    entities::ClassSchedule, requests::CreateScheduleRequest,
};
use crate::runtime::RequestContext;
use crate::storage::Storage;

pub struct ClassScheduleService {
    storage: Arc<dyn Storage>,
}

impl ClassScheduleService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub(crate) fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }

    pub async fn create_schedule(
        &self,
        ctx: &RequestContext,
        caller_id: &str,
        class_id: &str,
        schedule: CreateScheduleRequest,
    ) -> Result<ClassSchedule> {
        create::create_schedule(self, ctx, caller_id, class_id, schedule).await
    }

    pub async fn get_schedule(
        &self,
        ctx: &RequestContext,
        schedule_id: &str,
    ) -> Result<ClassSchedule> {
        get::get_schedule(self, ctx, schedule_id).await
    }

    pub async fn get_schedules(
        &self,
        ctx: &RequestContext,
        class_id: &str,
    ) -> Result<Vec<ClassSchedule>> {
        get::get_schedules(self, ctx, class_id).await
    }

    pub async fn delete_schedule(
        &self,
        ctx: &RequestContext,
        caller_id: &str,
        schedule_id: &str,
    ) -> Result<()> {
        delete::delete_schedule(self, ctx, caller_id, schedule_id).await
    }

    // 返回删除条数，重复调用返回 0
    pub async fn clear_schedules(
        &self,
        ctx: &RequestContext,
        caller_id: &str,
        class_id: &str,
        day: i16,
    ) -> Result<u64> {
        delete::clear_schedules(self, ctx, caller_id, class_id, day).await
    }
}
