//! 班级课表存储操作

use super::{SeaOrmStorage, query_err};
use crate::entity::class_schedule::{ActiveModel, Column, Entity as ClassSchedules};
use crate::errors::{ClassroomError, Result};
use crate::models::class_schedules::{entities::ClassSchedule, requests::CreateScheduleRequest};
use crate::utils::{
    generate_id,
    time::{now_millis, to_millis},
};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    pub async fn create_schedule_impl(
        &self,
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

        ClassSchedules::insert(ActiveModel {
            schedule_id: Set(schedule.schedule_id.clone()),
            class_id: Set(schedule.class_id.clone()),
            author_id: Set(schedule.author_id.clone()),
            name: Set(schedule.name.clone()),
            start_at: Set(schedule.start_at),
            duration: Set(schedule.duration),
            day: Set(schedule.day),
            created_at: Set(to_millis(schedule.created_at)),
        })
        .exec_without_returning(&self.db)
        .await
        .map_err(query_err("创建课表失败"))?;

        Ok(schedule)
    }

    pub async fn get_schedule_impl(&self, schedule_id: &str) -> Result<ClassSchedule> {
        ClassSchedules::find_by_id(schedule_id)
            .one(&self.db)
            .await
            .map_err(query_err("查询课表失败"))?
            .map(|m| m.into_class_schedule())
            .ok_or_else(|| ClassroomError::not_found("schedule does not exist"))
    }

    pub async fn get_schedules_impl(&self, class_id: &str) -> Result<Vec<ClassSchedule>> {
        let schedules = ClassSchedules::find()
            .filter(Column::ClassId.eq(class_id))
            .order_by_asc(Column::Day)
            .order_by_asc(Column::StartAt)
            .order_by_asc(Column::ScheduleId)
            .all(&self.db)
            .await
            .map_err(query_err("查询课表失败"))?;

        Ok(schedules
            .into_iter()
            .map(|m| m.into_class_schedule())
            .collect())
    }

    pub async fn delete_schedule_impl(&self, schedule_id: &str) -> Result<()> {
        ClassSchedules::delete_by_id(schedule_id)
            .exec(&self.db)
            .await
            .map_err(query_err("删除课表失败"))?;
        Ok(())
    }

    /// 清空某天的课表
    pub async fn clear_schedules_impl(&self, class_id: &str, day: i16) -> Result<u64> {
        let result = ClassSchedules::delete_many()
            .filter(Column::ClassId.eq(class_id))
            .filter(Column::Day.eq(day))
            .exec(&self.db)
            .await
            .map_err(query_err("清空课表失败"))?;

        Ok(result.rows_affected)
    }
}
