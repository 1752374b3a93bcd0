use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassSchedule {
    pub schedule_id: String,
    pub class_id: String,
    pub author_id: String,
    pub created_at: chrono::DateTime<chrono::Utc>,

    pub name: String,
    // 当天零点起的秒数
    pub start_at: i32,
    // 分钟
    pub duration: i32,
    // 0-6，星期几
    pub day: i16,
}
