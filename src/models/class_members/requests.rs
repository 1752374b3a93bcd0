use serde::Deserialize;

use super::entities::MemberLevel;

// 通过用户名添加成员
#[derive(Debug, Clone, Deserialize)]
pub struct AddMemberRequest {
    pub username: String,
    // 缺省为 member
    #[serde(default)]
    pub level: Option<MemberLevel>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateMemberRequest {
    pub level: Option<MemberLevel>, // 只有等级可修改
}
