//! 班级任务实体

use sea_orm::entity::prelude::*;

use crate::utils::time::from_millis;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "class_task")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub task_id: String,
    pub class_id: String,
    pub author_id: String,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub due_date: i64,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_class_task(self) -> crate::models::class_tasks::entities::ClassTask {
        crate::models::class_tasks::entities::ClassTask {
            task_id: self.task_id,
            class_id: self.class_id,
            author_id: self.author_id,
            created_at: from_millis(self.created_at),
            name: self.name,
            description: self.description,
            due_date: from_millis(self.due_date),
        }
    }
}
