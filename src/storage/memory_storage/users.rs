use async_trait::async_trait;

use super::MemoryStorage;
use crate::errors::{ClassroomError, Result};
use crate::models::users::{
    entities::User,
    requests::{CreateUserRequest, UpdateUserRequest},
};
use crate::runtime::RequestContext;
use crate::storage::UserRepository;
use crate::utils::time::now_millis;

fn user_not_found() -> ClassroomError {
    ClassroomError::not_found("user does not exist")
}

fn user_already_exists() -> ClassroomError {
    ClassroomError::already_exists("user already exists")
}

#[async_trait]
impl UserRepository for MemoryStorage {
    async fn create_user(&self, ctx: &RequestContext, user: CreateUserRequest) -> Result<User> {
        let mut users = self.users.write().await;
        ctx.ensure_active()?;

        // user_id / username / 非空 email 均唯一
        let conflict = users.contains_key(&user.user_id)
            || users.values().any(|u| {
                u.username == user.username || (!user.email.is_empty() && u.email == user.email)
            });
        if conflict {
            return Err(user_already_exists());
        }

        let user = User {
            user_id: user.user_id,
            created_at: now_millis(),
            username: user.username,
            name: user.name,
            email: user.email,
        };
        users.insert(user.user_id.clone(), user.clone());
        Ok(user)
    }

    async fn get_user_by_user_id(&self, ctx: &RequestContext, user_id: &str) -> Result<User> {
        ctx.ensure_active()?;
        self.users
            .read()
            .await
            .get(user_id)
            .cloned()
            .ok_or_else(user_not_found)
    }

    async fn get_user_by_username(&self, ctx: &RequestContext, username: &str) -> Result<User> {
        ctx.ensure_active()?;
        self.users
            .read()
            .await
            .values()
            .find(|u| u.username == username)
            .cloned()
            .ok_or_else(user_not_found)
    }

    async fn update_user(
        &self,
        ctx: &RequestContext,
        user_id: &str,
        update: UpdateUserRequest,
    ) -> Result<User> {
        let mut users = self.users.write().await;
        ctx.ensure_active()?;
        if !users.contains_key(user_id) {
            return Err(user_not_found());
        }

        if let Some(username) = update.username.as_deref().filter(|s| !s.is_empty())
            && users
                .values()
                .any(|u| u.user_id != user_id && u.username == username)
        {
            return Err(user_already_exists());
        }

        let user = users.get_mut(user_id).ok_or_else(user_not_found)?;
        user.apply_update(&update);
        Ok(user.clone())
    }

    async fn delete_user(&self, ctx: &RequestContext, user_id: &str) -> Result<()> {
        let mut users = self.users.write().await;
        ctx.ensure_active()?;
        users.remove(user_id);
        Ok(())
    }
}
