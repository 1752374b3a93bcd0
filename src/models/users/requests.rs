use serde::Deserialize;

// 用户创建请求，user_id 来自身份令牌
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub user_id: String,
    pub username: String,
    pub name: String,
    pub email: String,
}

// 用户更新请求
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub name: Option<String>,
}
