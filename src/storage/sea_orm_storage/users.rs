//! 用户存储操作

use super::{SeaOrmStorage, ensure_updated, map_write_err, query_err};
use crate::entity::app_user::{ActiveModel, Column, Entity as Users};
use crate::errors::{ClassroomError, Result};
use crate::models::users::{
    entities::User,
    requests::{CreateUserRequest, UpdateUserRequest},
};
use crate::utils::time::{now_millis, to_millis};
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Set};

fn user_not_found() -> ClassroomError {
    ClassroomError::not_found("user does not exist")
}

impl SeaOrmStorage {
    /// 创建用户，user_id / username / email 冲突返回 AlreadyExists
    pub async fn create_user_impl(&self, user: CreateUserRequest) -> Result<User> {
        let user = User {
            user_id: user.user_id,
            created_at: now_millis(),
            username: user.username,
            name: user.name,
            email: user.email,
        };

        Users::insert(ActiveModel {
            user_id: Set(user.user_id.clone()),
            username: Set(user.username.clone()),
            name: Set(user.name.clone()),
            email: Set(Some(user.email.clone()).filter(|e| !e.is_empty())),
            created_at: Set(to_millis(user.created_at)),
        })
        .exec_without_returning(&self.db)
        .await
        .map_err(|e| map_write_err(e, "user", "创建用户失败"))?;

        Ok(user)
    }

    pub async fn get_user_by_user_id_impl(&self, user_id: &str) -> Result<User> {
        Users::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(query_err("查询用户失败"))?
            .map(|m| m.into_user())
            .ok_or_else(user_not_found)
    }

    pub async fn get_user_by_username_impl(&self, username: &str) -> Result<User> {
        Users::find()
            .filter(Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(query_err("查询用户失败"))?
            .map(|m| m.into_user())
            .ok_or_else(user_not_found)
    }

    /// 更新用户名 / 昵称
    pub async fn update_user_impl(
        &self,
        user_id: &str,
        update: UpdateUserRequest,
    ) -> Result<User> {
        let existing = Users::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(query_err("查询用户失败"))?
            .ok_or_else(user_not_found)?;

        let mut user = existing.into_user();
        user.apply_update(&update);

        let result = Users::update_many()
            .col_expr(Column::Username, Expr::value(user.username.clone()))
            .col_expr(Column::Name, Expr::value(user.name.clone()))
            .filter(Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(|e| map_write_err(e, "user", "更新用户失败"))?;
        ensure_updated(result.rows_affected, user_not_found)?;

        Ok(user)
    }

    pub async fn delete_user_impl(&self, user_id: &str) -> Result<()> {
        Users::delete_by_id(user_id)
            .exec(&self.db)
            .await
            .map_err(query_err("删除用户失败"))?;
        Ok(())
    }
}
