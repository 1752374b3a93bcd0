use serde::{Deserialize, Serialize};

use super::requests::UpdateUserRequest;

// 用户实体
//
// user_id 由外部身份提供方分配，本地从不生成
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: String,
    pub created_at: chrono::DateTime<chrono::Utc>,

    pub username: String, // 可变，唯一
    pub name: String,     // 可变
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub email: String, // 不可变，唯一
}

impl User {
    /// 局部更新，只允许修改用户名与昵称
    pub fn apply_update(&mut self, update: &UpdateUserRequest) {
        if let Some(username) = update.username.as_deref().filter(|s| !s.is_empty()) {
            self.username = username.to_string();
        }
        if let Some(name) = update.name.as_deref().filter(|s| !s.is_empty()) {
            self.name = name.to_string();
        }
    }
}
