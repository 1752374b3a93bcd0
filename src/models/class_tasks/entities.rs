use serde::{Deserialize, Serialize};

use super::requests::UpdateTaskRequest;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassTask {
    pub task_id: String,
    pub class_id: String,
    pub author_id: String,
    pub created_at: chrono::DateTime<chrono::Utc>,

    pub name: String,
    pub description: String,
    pub due_date: chrono::DateTime<chrono::Utc>,
}

impl ClassTask {
    /// 局部更新：非空字段覆盖原值
    pub fn apply_update(&mut self, update: &UpdateTaskRequest) {
        if let Some(name) = update.name.as_deref().filter(|s| !s.is_empty()) {
            self.name = name.to_string();
        }
        if let Some(description) = update.description.as_deref().filter(|s| !s.is_empty()) {
            self.description = description.to_string();
        }
        if let Some(due_date) = update.due_date {
            self.due_date = crate::utils::time::truncate_millis(due_date);
        }
    }
}
