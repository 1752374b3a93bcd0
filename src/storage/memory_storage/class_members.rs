use async_trait::async_trait;
use dashmap::mapref::entry::Entry;

use super::{MemoryStorage, member_key};
use crate::errors::{ClassroomError, Result};
use crate::models::class_members::{
    entities::{ClassMember, MemberLevel},
    requests::UpdateMemberRequest,
};
use crate::runtime::RequestContext;
use crate::storage::ClassMemberRepository;
use crate::utils::time::now_millis;

fn member_not_found() -> ClassroomError {
    ClassroomError::not_found("member does not exist")
}

#[async_trait]
impl ClassMemberRepository for MemoryStorage {
    async fn list_members(
        &self,
        ctx: &RequestContext,
        class_id: &str,
    ) -> Result<Vec<ClassMember>> {
        ctx.ensure_active()?;
        let mut members: Vec<ClassMember> = self
            .members
            .iter()
            .filter(|entry| entry.key().0 == class_id)
            .map(|entry| entry.value().clone())
            .collect();
        members.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.user_id.cmp(&b.user_id))
        });
        Ok(members)
    }

    async fn list_joined(&self, ctx: &RequestContext, user_id: &str) -> Result<Vec<ClassMember>> {
        ctx.ensure_active()?;
        let mut members: Vec<ClassMember> = self
            .members
            .iter()
            .filter(|entry| entry.key().1 == user_id)
            .map(|entry| entry.value().clone())
            .collect();
        members.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.class_id.cmp(&b.class_id))
        });
        Ok(members)
    }

    async fn get_member(
        &self,
        ctx: &RequestContext,
        class_id: &str,
        user_id: &str,
    ) -> Result<ClassMember> {
        ctx.ensure_active()?;
        self.members
            .get(&member_key(class_id, user_id))
            .map(|entry| entry.value().clone())
            .ok_or_else(member_not_found)
    }

    async fn create_member(
        &self,
        ctx: &RequestContext,
        class_id: &str,
        user_id: &str,
        level: MemberLevel,
    ) -> Result<ClassMember> {
        ctx.ensure_active()?;
        // entry 持有分片写锁，查重与插入不可分割
        match self.members.entry(member_key(class_id, user_id)) {
            Entry::Occupied(_) => Err(ClassroomError::already_exists("member already exists")),
            Entry::Vacant(entry) => {
                let member = ClassMember {
                    class_id: class_id.to_string(),
                    user_id: user_id.to_string(),
                    level,
                    created_at: now_millis(),
                };
                entry.insert(member.clone());
                Ok(member)
            }
        }
    }

    async fn update_member(
        &self,
        ctx: &RequestContext,
        class_id: &str,
        user_id: &str,
        update: UpdateMemberRequest,
    ) -> Result<ClassMember> {
        ctx.ensure_active()?;
        let mut member = self
            .members
            .get_mut(&member_key(class_id, user_id))
            .ok_or_else(member_not_found)?;
        if let Some(level) = update.level {
            member.level = level;
        }
        Ok(member.value().clone())
    }

    async fn delete_member(&self, ctx: &RequestContext, class_id: &str, user_id: &str)
    -> Result<()> {
        ctx.ensure_active()?;
        self.members.remove(&member_key(class_id, user_id));
        Ok(())
    }
}
