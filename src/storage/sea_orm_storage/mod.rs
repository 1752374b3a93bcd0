//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。
//! 每次 SQL 往返都通过 `RequestContext::run` 与取消令牌、截止时间赛跑。

mod class_members;
mod class_schedules;
mod class_tasks;
mod classes;
mod users;

use crate::config::DatabaseConfig;
use crate::errors::{ClassroomError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr, SqlErr};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例并运行迁移
    pub async fn new_async(config: &DatabaseConfig) -> Result<Self> {
        let db_url = Self::build_database_url(&config.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| ClassroomError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    ///
    /// 内存库只能有一个连接，否则每个连接看到的都是各自独立的空库
    async fn connect_sqlite(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let in_memory = url.contains(":memory:") || url.contains("mode=memory");

        let mut opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| ClassroomError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(5));
        if !in_memory {
            opt = opt
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
                .pragma("cache_size", "-64000")
                .pragma("temp_store", "memory")
                .pragma("wal_autocheckpoint", "1000");
        }

        let mut pool_opts = SqlitePoolOptions::new()
            .max_connections(config.pool_size.max(1))
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(300));
        if in_memory {
            pool_opts = pool_opts
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }

        let pool = pool_opts.connect_with(opt).await.map_err(|e| {
            ClassroomError::database_connection(format!("SQLite 连接失败: {e}"))
        })?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.timeout))
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| ClassroomError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(ClassroomError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite:, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

/// 唯一约束冲突映射为 AlreadyExists，其余归为数据库操作错误
pub(crate) fn map_write_err(err: DbErr, entity: &str, action: &str) -> ClassroomError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            ClassroomError::already_exists(format!("{entity} already exists"))
        }
        _ => ClassroomError::database_operation(format!("{action}: {err}")),
    }
}

/// 先读后写的更新中，目标行在两步之间被删除时 update 命中 0 行，按不存在处理
pub(crate) fn ensure_updated(
    rows_affected: u64,
    not_found: impl FnOnce() -> ClassroomError,
) -> Result<()> {
    if rows_affected == 0 {
        return Err(not_found());
    }
    Ok(())
}

pub(crate) fn query_err(action: &str) -> impl FnOnce(DbErr) -> ClassroomError + '_ {
    move |e| ClassroomError::database_operation(format!("{action}: {e}"))
}

// 仓储 trait 实现
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
use crate::storage::{
    ClassMemberRepository, ClassRepository, ClassScheduleRepository, ClassTaskRepository,
    UserRepository,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
impl ClassRepository for SeaOrmStorage {
    async fn get_class(&self, ctx: &RequestContext, class_id: &str) -> Result<Class> {
        ctx.run(self.get_class_impl(class_id)).await
    }

    async fn get_classes_by_owner_id(
        &self,
        ctx: &RequestContext,
        owner_id: &str,
    ) -> Result<Vec<Class>> {
        ctx.run(self.get_classes_by_owner_id_impl(owner_id)).await
    }

    async fn get_class_by_name(
        &self,
        ctx: &RequestContext,
        owner_id: &str,
        name: &str,
    ) -> Result<Class> {
        ctx.run(self.get_class_by_name_impl(owner_id, name)).await
    }

    async fn create_class(
        &self,
        ctx: &RequestContext,
        owner_id: &str,
        class: CreateClassRequest,
    ) -> Result<Class> {
        ctx.run(self.create_class_impl(owner_id, class)).await
    }

    async fn create_class_with_owner(
        &self,
        ctx: &RequestContext,
        owner_id: &str,
        class: CreateClassRequest,
    ) -> Result<(Class, ClassMember)> {
        ctx.run(self.create_class_with_owner_impl(owner_id, class))
            .await
    }

    async fn update_class(
        &self,
        ctx: &RequestContext,
        class_id: &str,
        update: UpdateClassRequest,
    ) -> Result<Class> {
        ctx.run(self.update_class_impl(class_id, update)).await
    }

    async fn delete_class(&self, ctx: &RequestContext, class_id: &str) -> Result<()> {
        ctx.run(self.delete_class_impl(class_id)).await
    }
}

#[async_trait]
impl ClassMemberRepository for SeaOrmStorage {
    async fn list_members(
        &self,
        ctx: &RequestContext,
        class_id: &str,
    ) -> Result<Vec<ClassMember>> {
        ctx.run(self.list_members_impl(class_id)).await
    }

    async fn list_joined(&self, ctx: &RequestContext, user_id: &str) -> Result<Vec<ClassMember>> {
        ctx.run(self.list_joined_impl(user_id)).await
    }

    async fn get_member(
        &self,
        ctx: &RequestContext,
        class_id: &str,
        user_id: &str,
    ) -> Result<ClassMember> {
        ctx.run(self.get_member_impl(class_id, user_id)).await
    }

    async fn create_member(
        &self,
        ctx: &RequestContext,
        class_id: &str,
        user_id: &str,
        level: MemberLevel,
    ) -> Result<ClassMember> {
        ctx.run(self.create_member_impl(class_id, user_id, level))
            .await
    }

    async fn update_member(
        &self,
        ctx: &RequestContext,
        class_id: &str,
        user_id: &str,
        update: UpdateMemberRequest,
    ) -> Result<ClassMember> {
        ctx.run(self.update_member_impl(class_id, user_id, update))
            .await
    }

    async fn delete_member(&self, ctx: &RequestContext, class_id: &str, user_id: &str)
    -> Result<()> {
        ctx.run(self.delete_member_impl(class_id, user_id)).await
    }
}

#[async_trait]
impl ClassTaskRepository for SeaOrmStorage {
    async fn create_task(
        &self,
        ctx: &RequestContext,
        class_id: &str,
        author_id: &str,
        task: CreateTaskRequest,
    ) -> Result<ClassTask> {
        ctx.run(self.create_task_impl(class_id, author_id, task))
            .await
    }

    async fn get_task(&self, ctx: &RequestContext, task_id: &str) -> Result<ClassTask> {
        ctx.run(self.get_task_impl(task_id)).await
    }

    async fn get_tasks(&self, ctx: &RequestContext, class_id: &str) -> Result<Vec<ClassTask>> {
        ctx.run(self.get_tasks_impl(class_id)).await
    }

    async fn get_tasks_with_range(
        &self,
        ctx: &RequestContext,
        class_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<ClassTask>> {
        ctx.run(self.get_tasks_with_range_impl(class_id, from, to))
            .await
    }

    async fn update_task(
        &self,
        ctx: &RequestContext,
        task_id: &str,
        update: UpdateTaskRequest,
    ) -> Result<ClassTask> {
        ctx.run(self.update_task_impl(task_id, update)).await
    }

    async fn delete_task(&self, ctx: &RequestContext, task_id: &str) -> Result<()> {
        ctx.run(self.delete_task_impl(task_id)).await
    }
}

#[async_trait]
impl ClassScheduleRepository for SeaOrmStorage {
    async fn create_schedule(
        &self,
        ctx: &RequestContext,
        class_id: &str,
        author_id: &str,
        schedule: CreateScheduleRequest,
    ) -> Result<ClassSchedule> {
        ctx.run(self.create_schedule_impl(class_id, author_id, schedule))
            .await
    }

    async fn get_schedule(&self, ctx: &RequestContext, schedule_id: &str) -> Result<ClassSchedule> {
        ctx.run(self.get_schedule_impl(schedule_id)).await
    }

    async fn get_schedules(
        &self,
        ctx: &RequestContext,
        class_id: &str,
    ) -> Result<Vec<ClassSchedule>> {
        ctx.run(self.get_schedules_impl(class_id)).await
    }

    async fn delete_schedule(&self, ctx: &RequestContext, schedule_id: &str) -> Result<()> {
        ctx.run(self.delete_schedule_impl(schedule_id)).await
    }

    async fn clear_schedules(&self, ctx: &RequestContext, class_id: &str, day: i16)
    -> Result<u64> {
        ctx.run(self.clear_schedules_impl(class_id, day)).await
    }
}

#[async_trait]
impl UserRepository for SeaOrmStorage {
    async fn create_user(&self, ctx: &RequestContext, user: CreateUserRequest) -> Result<User> {
        ctx.run(self.create_user_impl(user)).await
    }

    async fn get_user_by_user_id(&self, ctx: &RequestContext, user_id: &str) -> Result<User> {
        ctx.run(self.get_user_by_user_id_impl(user_id)).await
    }

    async fn get_user_by_username(&self, ctx: &RequestContext, username: &str) -> Result<User> {
        ctx.run(self.get_user_by_username_impl(username)).await
    }

    async fn update_user(
        &self,
        ctx: &RequestContext,
        user_id: &str,
        update: UpdateUserRequest,
    ) -> Result<User> {
        ctx.run(self.update_user_impl(user_id, update)).await
    }

    async fn delete_user(&self, ctx: &RequestContext, user_id: &str) -> Result<()> {
        ctx.run(self.delete_user_impl(user_id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_hitting_no_rows_is_not_found() {
        let err = ensure_updated(0, || ClassroomError::not_found("member does not exist"))
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(ensure_updated(1, || ClassroomError::not_found("unused")).is_ok());
    }

    #[test]
    fn test_build_database_url() {
        assert_eq!(
            SeaOrmStorage::build_database_url(":memory:").unwrap(),
            "sqlite::memory:"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url("data.db").unwrap(),
            "sqlite://data.db?mode=rwc"
        );
        assert!(SeaOrmStorage::build_database_url("ftp://x").is_err());
    }
}
