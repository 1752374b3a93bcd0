//! 内存存储实现
//!
//! 每个实体集合一把锁：班级、任务、课表、用户使用 `tokio::sync::RwLock<HashMap>`，
//! 成员关系使用 `DashMap`，以 (class_id, user_id) 为键，查重与插入在同一个 entry 锁内完成。
//! 锁只在读写 map 时持有，从不跨越对其他资源的 `.await`。

mod class_members;
mod class_schedules;
mod class_tasks;
mod classes;
mod users;

use std::collections::HashMap;

use dashmap::DashMap;
use tokio::sync::RwLock;

use crate::models::{
    class_members::entities::ClassMember, class_schedules::entities::ClassSchedule,
    class_tasks::entities::ClassTask, classes::entities::Class, users::entities::User,
};

type MemberKey = (String, String);

/// 进程内并发存储，用于测试与轻量部署
#[derive(Debug, Default)]
pub struct MemoryStorage {
    classes: RwLock<HashMap<String, Class>>,
    members: DashMap<MemberKey, ClassMember>,
    tasks: RwLock<HashMap<String, ClassTask>>,
    schedules: RwLock<HashMap<String, ClassSchedule>>,
    users: RwLock<HashMap<String, User>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

fn member_key(class_id: &str, user_id: &str) -> MemberKey {
    (class_id.to_string(), user_id.to_string())
}
