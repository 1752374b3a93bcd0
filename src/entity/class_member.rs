//! 班级成员实体，(class_id, user_id) 复合主键

use sea_orm::entity::prelude::*;

use crate::models::class_members::entities::{ClassMember, MemberLevel};
use crate::utils::time::from_millis;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "class_member")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub class_id: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: String,
    pub level: String,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_class_member(self) -> ClassMember {
        ClassMember {
            class_id: self.class_id,
            user_id: self.user_id,
            level: MemberLevel::from_tag(&self.level),
            created_at: from_millis(self.created_at),
        }
    }
}
