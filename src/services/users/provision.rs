use tracing::{debug, info, warn};

use super::UserService;
use crate::errors::{ClassroomError, Result};
use crate::models::users::{entities::User, requests::CreateUserRequest};
use crate::runtime::RequestContext;
use crate::utils::validate::USERNAME_MAX;

const PROVISION_ATTEMPTS: usize = 3;

/// 生成形如 `u0189f...` 的默认用户名，长度不超过用户名上限
pub fn generate_username() -> String {
    let id = uuid::Uuid::now_v7().simple().to_string();
    // uuid v7 的高位是时间戳，取低位保证同一毫秒内也不同
    let tail = &id[id.len() - (USERNAME_MAX - 1)..];
    format!("u{tail}")
}

pub async fn get_or_provision(
    service: &UserService,
    ctx: &RequestContext,
    user_id: &str,
    email: &str,
) -> Result<User> {
    let storage = service.storage();

    match storage.get_user_by_user_id(ctx, user_id).await {
        Ok(user) => return Ok(user),
        Err(e) if e.is_not_found() => {
            debug!("User {} not found, provisioning", user_id);
        }
        Err(e) => return Err(e),
    }

    let mut last_err = ClassroomError::already_exists("can not provision user");
    for _ in 0..PROVISION_ATTEMPTS {
        let username = generate_username();
        let request = CreateUserRequest {
            user_id: user_id.to_string(),
            username: username.clone(),
            name: username,
            email: email.to_string(),
        };

        match storage.create_user(ctx, request).await {
            Ok(user) => {
                info!("Provisioned user {} as {}", user.user_id, user.username);
                return Ok(user);
            }
            Err(ClassroomError::AlreadyExists(msg)) => {
                // 并发请求可能已经创建了同一用户
                if let Ok(user) = storage.get_user_by_user_id(ctx, user_id).await {
                    return Ok(user);
                }
                warn!("Provisioning user {} conflicted: {}", user_id, msg);
                last_err = ClassroomError::AlreadyExists(msg);
            }
            Err(e) => return Err(e),
        }
    }

    Err(last_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::validate::validate_username;

    #[test]
    fn test_generated_username_is_valid() {
        let a = generate_username();
        let b = generate_username();
        assert_eq!(a.len(), USERNAME_MAX);
        assert!(validate_username(&a).is_ok());
        assert_ne!(a, b);
    }
}
