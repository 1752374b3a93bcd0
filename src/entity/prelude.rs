//! 预导入模块，方便使用

pub use super::app_user::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
pub use super::class::{ActiveModel as ClassActiveModel, Entity as Classes, Model as ClassModel};
pub use super::class_member::{
    ActiveModel as ClassMemberActiveModel, Entity as ClassMembers, Model as ClassMemberModel,
};
pub use super::class_schedule::{
    ActiveModel as ClassScheduleActiveModel, Entity as ClassSchedules,
    Model as ClassScheduleModel,
};
pub use super::class_task::{
    ActiveModel as ClassTaskActiveModel, Entity as ClassTasks, Model as ClassTaskModel,
};
