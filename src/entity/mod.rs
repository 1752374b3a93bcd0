//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! 时间统一以 epoch 毫秒存储；表之间只有索引，没有外键约束。

pub mod prelude;

pub mod app_user;
pub mod class;
pub mod class_member;
pub mod class_schedule;
pub mod class_task;
