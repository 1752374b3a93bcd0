use serde::Deserialize;

// 创建班级请求
//
// owner_id 不从请求体读取，由已认证的调用者决定
#[derive(Debug, Clone, Deserialize)]
pub struct CreateClassRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

// 更新班级请求，空字段表示不修改
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateClassRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}
