//! 业务逻辑层
//!
//! 服务只依赖 `Arc<dyn Storage>`，接收已认证的调用者 ID，不感知 HTTP。
//! 所有修改类操作先通过 `access::access_class` 校验调用者在班级中的等级。

pub mod access;
pub mod class_members;
pub mod class_schedules;
pub mod class_tasks;
pub mod classes;
pub mod users;

pub use access::{Access, access_class, resolve};
pub use class_members::ClassMemberService;
pub use class_schedules::ClassScheduleService;
pub use class_tasks::ClassTaskService;
pub use classes::ClassService;
pub use users::UserService;
