use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use tracing::debug;

use super::{MemoryStorage, member_key};
use crate::errors::{ClassroomError, Result};
use crate::models::{
    class_members::entities::{ClassMember, MemberLevel},
    classes::{
        entities::Class,
        requests::{CreateClassRequest, UpdateClassRequest},
    },
};
use crate::runtime::RequestContext;
use crate::storage::ClassRepository;
use crate::utils::{generate_id, time::now_millis};

fn new_class(owner_id: &str, class: CreateClassRequest) -> Class {
    Class {
        class_id: generate_id(),
        owner_id: owner_id.to_string(),
        created_at: now_millis(),
        name: class.name,
        description: class.description.unwrap_or_default(),
    }
}

fn class_not_found() -> ClassroomError {
    ClassroomError::not_found("class does not exist")
}

fn sort_classes(classes: &mut [Class]) {
    classes.sort_by(|a, b| {
        a.created_at
            .cmp(&b.created_at)
            .then_with(|| a.class_id.cmp(&b.class_id))
    });
}

#[async_trait]
impl ClassRepository for MemoryStorage {
    async fn get_class(&self, ctx: &RequestContext, class_id: &str) -> Result<Class> {
        ctx.ensure_active()?;
        self.classes
            .read()
            .await
            .get(class_id)
            .cloned()
            .ok_or_else(class_not_found)
    }

    async fn get_classes_by_owner_id(
        &self,
        ctx: &RequestContext,
        owner_id: &str,
    ) -> Result<Vec<Class>> {
        ctx.ensure_active()?;
        let mut classes: Vec<Class> = self
            .classes
            .read()
            .await
            .values()
            .filter(|c| c.owner_id == owner_id)
            .cloned()
            .collect();
        sort_classes(&mut classes);
        Ok(classes)
    }

    async fn get_class_by_name(
        &self,
        ctx: &RequestContext,
        owner_id: &str,
        name: &str,
    ) -> Result<Class> {
        let classes = self.get_classes_by_owner_id(ctx, owner_id).await?;
        debug!("Looking up class {} among {} owned classes", name, classes.len());
        classes
            .into_iter()
            .find(|c| c.name == name)
            .ok_or_else(class_not_found)
    }

    async fn create_class(
        &self,
        ctx: &RequestContext,
        owner_id: &str,
        class: CreateClassRequest,
    ) -> Result<Class> {
        let class = new_class(owner_id, class);
        let mut classes = self.classes.write().await;
        ctx.ensure_active()?;
        classes.insert(class.class_id.clone(), class.clone());
        Ok(class)
    }

    async fn create_class_with_owner(
        &self,
        ctx: &RequestContext,
        owner_id: &str,
        class: CreateClassRequest,
    ) -> Result<(Class, ClassMember)> {
        let class = new_class(owner_id, class);
        let member = ClassMember {
            class_id: class.class_id.clone(),
            user_id: owner_id.to_string(),
            level: MemberLevel::Owner,
            created_at: class.created_at,
        };

        // 持有班级写锁期间写入成员表，两者对外同时可见
        let mut classes = self.classes.write().await;
        ctx.ensure_active()?;
        match self.members.entry(member_key(&class.class_id, owner_id)) {
            Entry::Occupied(_) => {
                return Err(ClassroomError::already_exists("member already exists"));
            }
            Entry::Vacant(entry) => {
                entry.insert(member.clone());
            }
        }
        classes.insert(class.class_id.clone(), class.clone());
        Ok((class, member))
    }

    async fn update_class(
        &self,
        ctx: &RequestContext,
        class_id: &str,
        update: UpdateClassRequest,
    ) -> Result<Class> {
        let mut classes = self.classes.write().await;
        ctx.ensure_active()?;
        let class = classes.get_mut(class_id).ok_or_else(class_not_found)?;
        class.apply_update(&update);
        Ok(class.clone())
    }

    async fn delete_class(&self, ctx: &RequestContext, class_id: &str) -> Result<()> {
        let mut classes = self.classes.write().await;
        ctx.ensure_active()?;
        classes.remove(class_id);
        Ok(())
    }
}
