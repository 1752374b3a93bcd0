//! 用户实体

use sea_orm::entity::prelude::*;

use crate::utils::time::from_millis;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "app_user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: String,
    #[sea_orm(unique)]
    pub username: String,
    pub name: String,
    // 空邮箱存为 NULL，避免唯一索引冲突
    #[sea_orm(unique)]
    pub email: Option<String>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_user(self) -> crate::models::users::entities::User {
        crate::models::users::entities::User {
            user_id: self.user_id,
            created_at: from_millis(self.created_at),
            username: self.username,
            name: self.name,
            email: self.email.unwrap_or_default(),
        }
    }
}
