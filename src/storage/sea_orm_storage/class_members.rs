//! 班级成员存储操作

use super::{SeaOrmStorage, ensure_updated, map_write_err, query_err};
use crate::entity::class_member::{ActiveModel, Column, Entity as ClassMembers};
use crate::errors::{ClassroomError, Result};
use crate::models::class_members::{
    entities::{ClassMember, MemberLevel},
    requests::UpdateMemberRequest,
};
use crate::utils::time::{now_millis, to_millis};
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

fn member_not_found() -> ClassroomError {
    ClassroomError::not_found("member does not exist")
}

impl SeaOrmStorage {
    /// 列出班级成员
    pub async fn list_members_impl(&self, class_id: &str) -> Result<Vec<ClassMember>> {
        let members = ClassMembers::find()
            .filter(Column::ClassId.eq(class_id))
            .order_by_asc(Column::CreatedAt)
            .order_by_asc(Column::UserId)
            .all(&self.db)
            .await
            .map_err(query_err("查询班级成员失败"))?;

        Ok(members.into_iter().map(|m| m.into_class_member()).collect())
    }

    /// 列出用户加入的班级
    pub async fn list_joined_impl(&self, user_id: &str) -> Result<Vec<ClassMember>> {
        let members = ClassMembers::find()
            .filter(Column::UserId.eq(user_id))
            .order_by_asc(Column::CreatedAt)
            .order_by_asc(Column::ClassId)
            .all(&self.db)
            .await
            .map_err(query_err("查询用户班级关联失败"))?;

        Ok(members.into_iter().map(|m| m.into_class_member()).collect())
    }

    pub async fn get_member_impl(&self, class_id: &str, user_id: &str) -> Result<ClassMember> {
        ClassMembers::find_by_id((class_id.to_string(), user_id.to_string()))
            .one(&self.db)
            .await
            .map_err(query_err("查询班级成员失败"))?
            .map(|m| m.into_class_member())
            .ok_or_else(member_not_found)
    }

    /// 添加成员，复合主键冲突映射为 AlreadyExists
    pub async fn create_member_impl(
        &self,
        class_id: &str,
        user_id: &str,
        level: MemberLevel,
    ) -> Result<ClassMember> {
        let member = ClassMember {
            class_id: class_id.to_string(),
            user_id: user_id.to_string(),
            level,
            created_at: now_millis(),
        };

        ClassMembers::insert(ActiveModel {
            class_id: Set(member.class_id.clone()),
            user_id: Set(member.user_id.clone()),
            level: Set(member.level.to_string()),
            created_at: Set(to_millis(member.created_at)),
        })
        .exec_without_returning(&self.db)
        .await
        .map_err(|e| map_write_err(e, "member", "添加班级成员失败"))?;

        Ok(member)
    }

    /// 更新成员等级
    pub async fn update_member_impl(
        &self,
        class_id: &str,
        user_id: &str,
        update: UpdateMemberRequest,
    ) -> Result<ClassMember> {
        let existing = ClassMembers::find_by_id((class_id.to_string(), user_id.to_string()))
            .one(&self.db)
            .await
            .map_err(query_err("查询班级成员失败"))?
            .ok_or_else(member_not_found)?;

        let Some(level) = update.level else {
            return Ok(existing.into_class_member());
        };

        let result = ClassMembers::update_many()
            .col_expr(Column::Level, Expr::value(level.to_string()))
            .filter(Column::ClassId.eq(class_id))
            .filter(Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(query_err("更新班级成员失败"))?;
        ensure_updated(result.rows_affected, member_not_found)?;

        let mut member = existing.into_class_member();
        member.level = level;
        Ok(member)
    }

    /// 移除成员（幂等）
    pub async fn delete_member_impl(&self, class_id: &str, user_id: &str) -> Result<()> {
        ClassMembers::delete_by_id((class_id.to_string(), user_id.to_string()))
            .exec(&self.db)
            .await
            .map_err(query_err("移除班级成员失败"))?;
        Ok(())
    }
}
