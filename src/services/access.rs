//! 班级权限判定
//!
//! `resolve` 是纯函数，只比较等级；`access_class` 读取调用者在班级中的成员记录后交给它判定。

use tracing::warn;

use crate::errors::{ClassroomError, Result};
use crate::models::class_members::entities::{ClassMember, MemberLevel};
use crate::runtime::RequestContext;
use crate::storage::Storage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    Deny,
}

/// 当且仅当 level >= minimum 时允许
pub fn resolve(level: MemberLevel, minimum: MemberLevel) -> Access {
    if level >= minimum {
        Access::Allow
    } else {
        Access::Deny
    }
}

pub(crate) fn class_not_found(class_id: &str) -> ClassroomError {
    ClassroomError::not_found(format!("can not find class with id \"{class_id}\""))
}

/// 校验调用者在班级中的等级不低于 minimum，返回其成员记录
///
/// 没有成员记录时返回 Forbidden；若班级本身也不存在则返回 NotFound。
pub async fn access_class(
    storage: &dyn Storage,
    ctx: &RequestContext,
    caller_id: &str,
    class_id: &str,
    minimum: MemberLevel,
) -> Result<ClassMember> {
    let member = match storage.get_member(ctx, class_id, caller_id).await {
        Ok(member) => member,
        Err(e) if e.is_not_found() => {
            if let Err(e) = storage.get_class(ctx, class_id).await {
                return Err(if e.is_not_found() {
                    class_not_found(class_id)
                } else {
                    e
                });
            }
            warn!("User {} denied on class {}: not a member", caller_id, class_id);
            return Err(ClassroomError::forbidden("you are not a member of this class"));
        }
        Err(e) => return Err(e),
    };

    match resolve(member.level, minimum) {
        Access::Allow => Ok(member),
        Access::Deny => {
            warn!(
                "User {} denied on class {}: level {} below {}",
                caller_id, class_id, member.level, minimum
            );
            Err(ClassroomError::forbidden(format!(
                "requires {minimum} level in this class"
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_is_monotonic() {
        for a in MemberLevel::ORDINAL {
            for b in MemberLevel::ORDINAL {
                let expected = if a >= b { Access::Allow } else { Access::Deny };
                assert_eq!(resolve(a, b), expected, "resolve({a}, {b})");
                if resolve(a, b) == Access::Allow && resolve(b, a) == Access::Allow {
                    assert_eq!(a, b);
                }
            }
        }
    }

    #[test]
    fn test_resolve_examples() {
        assert_eq!(resolve(MemberLevel::Owner, MemberLevel::Admin), Access::Allow);
        assert_eq!(resolve(MemberLevel::Admin, MemberLevel::Admin), Access::Allow);
        assert_eq!(resolve(MemberLevel::Member, MemberLevel::Admin), Access::Deny);
        assert_eq!(resolve(MemberLevel::Member, MemberLevel::Member), Access::Allow);
    }
}
