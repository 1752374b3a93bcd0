use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// 班级成员等级
///
/// 全序关系由 [`MemberLevel::ORDINAL`] 声明：越靠后的等级越高。
/// 新增中间等级时只需插入数组对应位置，比较逻辑不变。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberLevel {
    #[default]
    Member, // 普通成员
    Admin, // 管理员
    Owner, // 创建者
}

impl MemberLevel {
    pub const MEMBER: &'static str = "member";
    pub const ADMIN: &'static str = "admin";
    pub const OWNER: &'static str = "owner";

    /// 从低到高排列的全部等级
    pub const ORDINAL: [MemberLevel; 3] = [
        MemberLevel::Member,
        MemberLevel::Admin,
        MemberLevel::Owner,
    ];

    /// 在 ORDINAL 中的位置
    pub fn rank(self) -> usize {
        Self::ORDINAL
            .iter()
            .position(|level| *level == self)
            .unwrap_or(0)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MemberLevel::Member => Self::MEMBER,
            MemberLevel::Admin => Self::ADMIN,
            MemberLevel::Owner => Self::OWNER,
        }
    }

    /// 宽松解析：无法识别的标签视为最低等级
    pub fn from_tag(tag: &str) -> Self {
        tag.parse().unwrap_or(MemberLevel::Member)
    }
}

impl PartialOrd for MemberLevel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MemberLevel {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl<'de> Deserialize<'de> for MemberLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "invalid member level: '{s}'. supported levels: member, admin, owner"
            ))
        })
    }
}

impl std::fmt::Display for MemberLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for MemberLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            MemberLevel::MEMBER => Ok(MemberLevel::Member),
            MemberLevel::ADMIN => Ok(MemberLevel::Admin),
            MemberLevel::OWNER => Ok(MemberLevel::Owner),
            _ => Err(format!("Invalid member level: {s}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassMember {
    pub class_id: String,
    pub user_id: String,
    pub level: MemberLevel,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_order() {
        assert!(MemberLevel::Owner > MemberLevel::Admin);
        assert!(MemberLevel::Admin > MemberLevel::Member);
        assert!(MemberLevel::Owner > MemberLevel::Member);
        assert_eq!(MemberLevel::Admin.cmp(&MemberLevel::Admin), Ordering::Equal);
    }

    #[test]
    fn test_unknown_tag_is_lowest() {
        assert_eq!(MemberLevel::from_tag("teacher"), MemberLevel::Member);
        assert_eq!(MemberLevel::from_tag(""), MemberLevel::Member);
        assert_eq!(MemberLevel::from_tag("owner"), MemberLevel::Owner);
    }

    #[test]
    fn test_strict_deserialize() {
        let level: MemberLevel = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(level, MemberLevel::Admin);
        assert!(serde_json::from_str::<MemberLevel>("\"root\"").is_err());
    }
}
