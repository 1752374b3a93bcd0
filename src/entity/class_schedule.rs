//! 班级课表实体

use sea_orm::entity::prelude::*;

use crate::utils::time::from_millis;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "class_schedule")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub schedule_id: String,
    pub class_id: String,
    pub author_id: String,
    pub name: String,
    pub start_at: i32,
    pub duration: i32,
    pub day: i16,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_class_schedule(self) -> crate::models::class_schedules::entities::ClassSchedule {
        crate::models::class_schedules::entities::ClassSchedule {
            schedule_id: self.schedule_id,
            class_id: self.class_id,
            author_id: self.author_id,
            created_at: from_millis(self.created_at),
            name: self.name,
            start_at: self.start_at,
            duration: self.duration,
            day: self.day,
        }
    }
}
