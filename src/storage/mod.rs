//! 数据存储层
//!
//! 每种实体一个仓储 trait，两套实现（内存 / SeaORM）对外行为完全一致：
//! 相同的错误类别、幂等删除、局部更新语义、唯一性约束与排序。
//!
//! 排序约定：
//! - 班级：created_at, class_id
//! - 成员：created_at, 再按另一半主键
//! - 任务：due_date, task_id
//! - 课表：day, start_at, schedule_id

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::warn;

use crate::config::{AppConfig, StorageBackend};
use crate::errors::Result;
use crate::models::{
    class_members::{
        entities::{ClassMember, MemberLevel},
        requests::UpdateMemberRequest,
    },
    class_schedules::{entities::ClassSchedule, requests::CreateScheduleRequest},
    class_tasks::{
        entities::ClassTask,
        requests::{CreateTaskRequest, UpdateTaskRequest},
    },
    classes::{
        entities::Class,
        requests::{CreateClassRequest, UpdateClassRequest},
    },
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateUserRequest},
    },
};
use crate::runtime::RequestContext;

pub mod memory_storage;
pub mod sea_orm_storage;

pub use memory_storage::MemoryStorage;
pub use sea_orm_storage::SeaOrmStorage;

#[async_trait]
pub trait ClassRepository: Send + Sync {
    // 通过ID获取班级
    async fn get_class(&self, ctx: &RequestContext, class_id: &str) -> Result<Class>;
    // 列出某用户创建的班级
    async fn get_classes_by_owner_id(
        &self,
        ctx: &RequestContext,
        owner_id: &str,
    ) -> Result<Vec<Class>>;
    // 通过创建者与班级名获取，同名时取最早创建的
    async fn get_class_by_name(
        &self,
        ctx: &RequestContext,
        owner_id: &str,
        name: &str,
    ) -> Result<Class>;
    // 创建班级，class_id 由存储层生成
    async fn create_class(
        &self,
        ctx: &RequestContext,
        owner_id: &str,
        class: CreateClassRequest,
    ) -> Result<Class>;
    // 原子地创建班级与创建者的 owner 成员记录
    async fn create_class_with_owner(
        &self,
        ctx: &RequestContext,
        owner_id: &str,
        class: CreateClassRequest,
    ) -> Result<(Class, ClassMember)>;
    // 局部更新名称 / 描述
    async fn update_class(
        &self,
        ctx: &RequestContext,
        class_id: &str,
        update: UpdateClassRequest,
    ) -> Result<Class>;
    // 删除班级（幂等，不级联）
    async fn delete_class(&self, ctx: &RequestContext, class_id: &str) -> Result<()>;
}

#[async_trait]
pub trait ClassMemberRepository: Send + Sync {
    async fn list_members(&self, ctx: &RequestContext, class_id: &str)
    -> Result<Vec<ClassMember>>;
    async fn list_joined(&self, ctx: &RequestContext, user_id: &str) -> Result<Vec<ClassMember>>;
    async fn get_member(
        &self,
        ctx: &RequestContext,
        class_id: &str,
        user_id: &str,
    ) -> Result<ClassMember>;
    // 重复的 (class_id, user_id) 返回 AlreadyExists
    async fn create_member(
        &self,
        ctx: &RequestContext,
        class_id: &str,
        user_id: &str,
        level: MemberLevel,
    ) -> Result<ClassMember>;
    // 只修改 level；不存在时返回 NotFound
    async fn update_member(
        &self,
        ctx: &RequestContext,
        class_id: &str,
        user_id: &str,
        update: UpdateMemberRequest,
    ) -> Result<ClassMember>;
    async fn delete_member(&self, ctx: &RequestContext, class_id: &str, user_id: &str)
    -> Result<()>;
}

#[async_trait]
pub trait ClassTaskRepository: Send + Sync {
    async fn create_task(
        &self,
        ctx: &RequestContext,
        class_id: &str,
        author_id: &str,
        task: CreateTaskRequest,
    ) -> Result<ClassTask>;
    async fn get_task(&self, ctx: &RequestContext, task_id: &str) -> Result<ClassTask>;
    async fn get_tasks(&self, ctx: &RequestContext, class_id: &str) -> Result<Vec<ClassTask>>;
    // 半开区间 [from, to)，按 due_date 排序
    async fn get_tasks_with_range(
        &self,
        ctx: &RequestContext,
        class_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<ClassTask>>;
    async fn update_task(
        &self,
        ctx: &RequestContext,
        task_id: &str,
        update: UpdateTaskRequest,
    ) -> Result<ClassTask>;
    async fn delete_task(&self, ctx: &RequestContext, task_id: &str) -> Result<()>;
}

#[async_trait]
pub trait ClassScheduleRepository: Send + Sync {
    async fn create_schedule(
        &self,
        ctx: &RequestContext,
        class_id: &str,
        author_id: &str,
        schedule: CreateScheduleRequest,
    ) -> Result<ClassSchedule>;
    async fn get_schedule(&self, ctx: &RequestContext, schedule_id: &str) -> Result<ClassSchedule>;
    async fn get_schedules(
        &self,
        ctx: &RequestContext,
        class_id: &str,
    ) -> Result<Vec<ClassSchedule>>;
    async fn delete_schedule(&self, ctx: &RequestContext, schedule_id: &str) -> Result<()>;
    // 清空某班级某天的课表，返回删除条数
    async fn clear_schedules(&self, ctx: &RequestContext, class_id: &str, day: i16)
    -> Result<u64>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    // user_id 来自外部身份提供方；user_id / username / email 任一重复返回 AlreadyExists
    async fn create_user(&self, ctx: &RequestContext, user: CreateUserRequest) -> Result<User>;
    async fn get_user_by_user_id(&self, ctx: &RequestContext, user_id: &str) -> Result<User>;
    async fn get_user_by_username(&self, ctx: &RequestContext, username: &str) -> Result<User>;
    // 只允许修改用户名与昵称
    async fn update_user(
        &self,
        ctx: &RequestContext,
        user_id: &str,
        update: UpdateUserRequest,
    ) -> Result<User>;
    async fn delete_user(&self, ctx: &RequestContext, user_id: &str) -> Result<()>;
}

/// 全部仓储能力的集合，服务层以 `Arc<dyn Storage>` 注入
pub trait Storage:
    ClassRepository
    + ClassMemberRepository
    + ClassTaskRepository
    + ClassScheduleRepository
    + UserRepository
{
}

impl<T> Storage for T where
    T: ClassRepository
        + ClassMemberRepository
        + ClassTaskRepository
        + ClassScheduleRepository
        + UserRepository
{
}

/// 按配置创建存储后端
pub async fn create_storage(config: &AppConfig) -> Result<Arc<dyn Storage>> {
    match config.storage.backend {
        StorageBackend::SeaOrm => {
            let storage = SeaOrmStorage::new_async(&config.database).await?;
            Ok(Arc::new(storage))
        }
        StorageBackend::Memory => {
            warn!("Using in-memory storage, data will be lost on restart");
            Ok(Arc::new(MemoryStorage::new()))
        }
    }
}
