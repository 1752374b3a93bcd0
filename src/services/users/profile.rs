use tracing::debug;

use super::UserService;
use crate::errors::Result;
use crate::models::{
    class_members::entities::ClassMember,
    classes::entities::Class,
    users::{
        entities::User,
        responses::{UserProfile, UserStatistics},
    },
};
use crate::runtime::RequestContext;

pub async fn get_user_profile(
    service: &UserService,
    ctx: &RequestContext,
    user: User,
) -> Result<UserProfile> {
    let storage = service.storage();

    let owned_class = storage.get_classes_by_owner_id(ctx, &user.user_id).await?;
    let joined = storage.list_joined(ctx, &user.user_id).await?;

    debug!(
        "User {} owns {} classes and joined {}",
        user.user_id,
        owned_class.len(),
        joined.len()
    );

    Ok(UserProfile {
        user,
        user_statistics: UserStatistics {
            joined_class: joined.len(),
            owned_class: owned_class.len(),
        },
        owned_class,
    })
}

pub async fn get_user_profile_by_id(
    service: &UserService,
    ctx: &RequestContext,
    user_id: &str,
) -> Result<UserProfile> {
    let user = service
        .storage()
        .get_user_by_user_id(ctx, user_id)
        .await
        .map_err(|e| {
            if e.is_not_found() {
                e.with_message(format!("can not find user with id \"{user_id}\""))
            } else {
                e
            }
        })?;
    get_user_profile(service, ctx, user).await
}

pub async fn get_user_profile_by_username(
    service: &UserService,
    ctx: &RequestContext,
    username: &str,
) -> Result<UserProfile> {
    let user = service
        .storage()
        .get_user_by_username(ctx, username)
        .await
        .map_err(|e| {
            if e.is_not_found() {
                e.with_message(format!("can not find user with username \"{username}\""))
            } else {
                e
            }
        })?;
    get_user_profile(service, ctx, user).await
}

pub async fn get_user_classes(
    service: &UserService,
    ctx: &RequestContext,
    user_id: &str,
) -> Result<Vec<Class>> {
    service.storage().get_classes_by_owner_id(ctx, user_id).await
}

pub async fn get_user_joined_classes(
    service: &UserService,
    ctx: &RequestContext,
    user_id: &str,
) -> Result<Vec<ClassMember>> {
    service.storage().list_joined(ctx, user_id).await
}
