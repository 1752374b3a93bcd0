use serde::{Deserialize, Serialize};

use super::requests::UpdateClassRequest;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Class {
    // 班级ID，创建时生成，不可变
    pub class_id: String,
    // 创建者ID，不可变
    pub owner_id: String,
    // 创建时间，不可变
    pub created_at: chrono::DateTime<chrono::Utc>,
    // 班级名称
    pub name: String,
    // 班级描述
    pub description: String,
}

impl Class {
    /// 局部更新：仅非空字段覆盖，ID / 创建者 / 创建时间永不改变
    pub fn apply_update(&mut self, update: &UpdateClassRequest) {
        if let Some(name) = update.name.as_deref().filter(|s| !s.is_empty()) {
            self.name = name.to_string();
        }
        if let Some(description) = update.description.as_deref().filter(|s| !s.is_empty()) {
            self.description = description.to_string();
        }
    }
}
