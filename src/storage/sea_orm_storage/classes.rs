//! 班级存储操作

use super::{SeaOrmStorage, ensure_updated, map_write_err, query_err};
use crate::entity::class::{ActiveModel, Column, Entity as Classes};
use crate::entity::class_member::ActiveModel as ClassMemberActiveModel;
use crate::entity::prelude::ClassMembers;
use crate::errors::{ClassroomError, Result};
use crate::models::{
    class_members::entities::{ClassMember, MemberLevel},
    classes::{
        entities::Class,
        requests::{CreateClassRequest, UpdateClassRequest},
    },
};
use crate::utils::{
    generate_id,
    time::{now_millis, to_millis},
};
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait};

fn class_not_found() -> ClassroomError {
    ClassroomError::not_found("class does not exist")
}

fn new_class(owner_id: &str, class: CreateClassRequest) -> Class {
    Class {
        class_id: generate_id(),
        owner_id: owner_id.to_string(),
        created_at: now_millis(),
        name: class.name,
        description: class.description.unwrap_or_default(),
    }
}

fn to_active_model(class: &Class) -> ActiveModel {
    ActiveModel {
        class_id: Set(class.class_id.clone()),
        owner_id: Set(class.owner_id.clone()),
        name: Set(class.name.clone()),
        description: Set(class.description.clone()),
        created_at: Set(to_millis(class.created_at)),
    }
}

impl SeaOrmStorage {
    /// 通过ID获取班级
    pub async fn get_class_impl(&self, class_id: &str) -> Result<Class> {
        Classes::find_by_id(class_id)
            .one(&self.db)
            .await
            .map_err(query_err("查询班级失败"))?
            .map(|m| m.into_class())
            .ok_or_else(class_not_found)
    }

    /// 列出用户创建的班级
    pub async fn get_classes_by_owner_id_impl(&self, owner_id: &str) -> Result<Vec<Class>> {
        let classes = Classes::find()
            .filter(Column::OwnerId.eq(owner_id))
            .order_by_asc(Column::CreatedAt)
            .order_by_asc(Column::ClassId)
            .all(&self.db)
            .await
            .map_err(query_err("查询班级列表失败"))?;

        Ok(classes.into_iter().map(|m| m.into_class()).collect())
    }

    /// 通过创建者与名称获取班级
    pub async fn get_class_by_name_impl(&self, owner_id: &str, name: &str) -> Result<Class> {
        Classes::find()
            .filter(Column::OwnerId.eq(owner_id))
            .filter(Column::Name.eq(name))
            .order_by_asc(Column::CreatedAt)
            .order_by_asc(Column::ClassId)
            .one(&self.db)
            .await
            .map_err(query_err("查询班级失败"))?
            .map(|m| m.into_class())
            .ok_or_else(class_not_found)
    }

    /// 创建班级
    pub async fn create_class_impl(
        &self,
        owner_id: &str,
        class: CreateClassRequest,
    ) -> Result<Class> {
        let class = new_class(owner_id, class);

        Classes::insert(to_active_model(&class))
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| map_write_err(e, "class", "创建班级失败"))?;

        Ok(class)
    }

    /// 在同一事务中创建班级与 owner 成员
    ///
    /// 事务在被取消（future 被丢弃）时回滚
    pub async fn create_class_with_owner_impl(
        &self,
        owner_id: &str,
        class: CreateClassRequest,
    ) -> Result<(Class, ClassMember)> {
        let class = new_class(owner_id, class);
        let member = ClassMember {
            class_id: class.class_id.clone(),
            user_id: owner_id.to_string(),
            level: MemberLevel::Owner,
            created_at: class.created_at,
        };

        let txn = self.db.begin().await.map_err(query_err("开启事务失败"))?;

        Classes::insert(to_active_model(&class))
            .exec_without_returning(&txn)
            .await
            .map_err(|e| map_write_err(e, "class", "创建班级失败"))?;

        ClassMembers::insert(ClassMemberActiveModel {
            class_id: Set(member.class_id.clone()),
            user_id: Set(member.user_id.clone()),
            level: Set(member.level.to_string()),
            created_at: Set(to_millis(member.created_at)),
        })
        .exec_without_returning(&txn)
        .await
        .map_err(|e| map_write_err(e, "member", "创建班级成员失败"))?;

        txn.commit().await.map_err(query_err("提交事务失败"))?;

        Ok((class, member))
    }

    /// 局部更新班级
    pub async fn update_class_impl(
        &self,
        class_id: &str,
        update: UpdateClassRequest,
    ) -> Result<Class> {
        let existing = Classes::find_by_id(class_id)
            .one(&self.db)
            .await
            .map_err(query_err("查询班级失败"))?
            .ok_or_else(class_not_found)?;

        let mut class = existing.into_class();
        class.apply_update(&update);

        let result = Classes::update_many()
            .col_expr(Column::Name, Expr::value(class.name.clone()))
            .col_expr(Column::Description, Expr::value(class.description.clone()))
            .filter(Column::ClassId.eq(class_id))
            .exec(&self.db)
            .await
            .map_err(|e| map_write_err(e, "class", "更新班级失败"))?;
        ensure_updated(result.rows_affected, class_not_found)?;

        Ok(class)
    }

    /// 删除班级（幂等）
    pub async fn delete_class_impl(&self, class_id: &str) -> Result<()> {
        Classes::delete_by_id(class_id)
            .exec(&self.db)
            .await
            .map_err(query_err("删除班级失败"))?;
        Ok(())
    }
}
