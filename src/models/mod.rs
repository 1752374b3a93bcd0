//! 业务数据模型
//!
//! 每个实体按 entities / requests / responses 拆分。

pub mod class_members;
pub mod class_schedules;
pub mod class_tasks;
pub mod classes;
pub mod common;
pub mod users;

pub use common::{ApiResponse, AppStartTime, ErrorCode};
