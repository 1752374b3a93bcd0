pub mod profile;
pub mod provision;
pub mod update;

use std::sync::Arc;

use crate::errors::Result;
use crate::models::{
    class_members::entities::ClassMember,
    classes::entities::Class,
    users::{entities::User, requests::UpdateUserRequest, responses::UserProfile},
};
use crate::runtime::RequestContext;
use crate::storage::Storage;

pub struct UserService {
    storage: Arc<dyn Storage>,
}

impl UserService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub(crate) fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }

    // 当前用户主页：统计创建与加入的班级数
    pub async fn get_user_profile(&self, ctx: &RequestContext, user: User) -> Result<UserProfile> {
        profile::get_user_profile(self, ctx, user).await
    }

    pub async fn get_user_profile_by_id(
        &self,
        ctx: &RequestContext,
        user_id: &str,
    ) -> Result<UserProfile> {
        profile::get_user_profile_by_id(self, ctx, user_id).await
    }

    pub async fn get_user_profile_by_username(
        &self,
        ctx: &RequestContext,
        username: &str,
    ) -> Result<UserProfile> {
        profile::get_user_profile_by_username(self, ctx, username).await
    }

    // 创建的班级
    pub async fn get_user_classes(&self, ctx: &RequestContext, user_id: &str) -> Result<Vec<Class>> {
        profile::get_user_classes(self, ctx, user_id).await
    }

    // 加入的班级（成员记录）
    pub async fn get_user_joined_classes(
        &self,
        ctx: &RequestContext,
        user_id: &str,
    ) -> Result<Vec<ClassMember>> {
        profile::get_user_joined_classes(self, ctx, user_id).await
    }

    pub async fn update_user(
        &self,
        ctx: &RequestContext,
        user_id: &str,
        update: UpdateUserRequest,
    ) -> Result<User> {
        update::update_user(self, ctx, user_id, update).await
    }

    // 读取用户，不存在时按令牌信息创建
    pub async fn get_or_provision(
        &self,
        ctx: &RequestContext,
        user_id: &str,
        email: &str,
    ) -> Result<User> {
        provision::get_or_provision(self, ctx, user_id, email).await
    }
}
