use serde::Serialize;

use super::entities::User;
use crate::models::classes::entities::Class;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStatistics {
    pub joined_class: usize,
    pub owned_class: usize,
}

// 用户主页：基本信息 + 统计 + 创建的班级
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(flatten)]
    pub user: User,
    pub user_statistics: UserStatistics,
    pub owned_class: Vec<Class>,
}
