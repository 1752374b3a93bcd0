pub mod add;
pub mod delete;
pub mod list;
pub mod update;

use std::sync::Arc;

use crate::errors::{ClassroomError, Result};
use crate::models::class_members::{
    entities::{ClassMember, MemberLevel},
    requests::{AddMemberRequest, UpdateMemberRequest},
};
use crate::runtime::RequestContext;
use crate::storage::Storage;

pub struct ClassMemberService {
    storage: Arc<dyn Storage>,
}

impl ClassMemberService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub(crate) fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }

    // 通过用户名添加成员，需要 admin
    pub async fn add_member_by_username(
        &self,
        ctx: &RequestContext,
        caller_id: &str,
        class_id: &str,
        request: AddMemberRequest,
    ) -> Result<ClassMember> {
        add::add_member_by_username(self, ctx, caller_id, class_id, request).await
    }

    pub async fn list_members(
        &self,
        ctx: &RequestContext,
        caller_id: &str,
        class_id: &str,
    ) -> Result<Vec<ClassMember>> {
        list::list_members(self, ctx, caller_id, class_id).await
    }

    pub async fn update_member(
        &self,
        ctx: &RequestContext,
        caller_id: &str,
        class_id: &str,
        user_id: &str,
        update: UpdateMemberRequest,
    ) -> Result<ClassMember> {
        update::update_member(self, ctx, caller_id, class_id, user_id, update).await
    }

    pub async fn delete_member(
        &self,
        ctx: &RequestContext,
        caller_id: &str,
        class_id: &str,
        user_id: &str,
    ) -> Result<()> {
        delete::delete_member(self, ctx, caller_id, class_id, user_id).await
    }
}

/// 授予等级的上限：不能授予 owner，也不能高于调用者自身
pub(crate) fn ensure_grantable(caller_level: MemberLevel, level: MemberLevel) -> Result<()> {
    if level == MemberLevel::Owner {
        return Err(ClassroomError::forbidden("owner level can not be granted"));
    }
    if level > caller_level {
        return Err(ClassroomError::forbidden(format!(
            "can not grant {level} level above your own {caller_level} level"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_grantable() {
        assert!(ensure_grantable(MemberLevel::Owner, MemberLevel::Admin).is_ok());
        assert!(ensure_grantable(MemberLevel::Admin, MemberLevel::Admin).is_ok());
        assert!(ensure_grantable(MemberLevel::Admin, MemberLevel::Member).is_ok());

        let err = ensure_grantable(MemberLevel::Owner, MemberLevel::Owner).unwrap_err();
        assert!(matches!(err, ClassroomError::Forbidden(_)));
        let err = ensure_grantable(MemberLevel::Member, MemberLevel::Admin).unwrap_err();
        assert!(matches!(err, ClassroomError::Forbidden(_)));
    }
}
