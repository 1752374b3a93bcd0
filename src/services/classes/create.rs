use tracing::info;

use super::ClassService;
use crate::errors::Result;
use crate::models::classes::{entities::Class, requests::CreateClassRequest};
use crate::runtime::RequestContext;
use crate::utils::Validate;

pub async fn create_class(
    service: &ClassService,
    ctx: &RequestContext,
    caller_id: &str,
    class: CreateClassRequest,
) -> Result<Class> {
    class.validate()?;

    // 班级与 owner 成员记录原子写入
    let (class, _owner) = service
        .storage()
        .create_class_with_owner(ctx, caller_id, class)
        .await?;

    info!("Class {} ({}) created by {}", class.name, class.class_id, caller_id);
    Ok(class)
}
