use tracing::info;

use super::ClassService;
use crate::errors::Result;
use crate::models::class_members::entities::MemberLevel;
use crate::models::classes::{entities::Class, requests::UpdateClassRequest};
use crate::runtime::RequestContext;
use crate::services::access::access_class;
use crate::utils::Validate;

pub async fn update_class(
    service: &ClassService,
    ctx: &RequestContext,
    caller_id: &str,
    class_id: &str,
    update: UpdateClassRequest,
) -> Result<Class> {
    update.validate()?;

    let storage = service.storage();
    access_class(storage, ctx, caller_id, class_id, MemberLevel::Admin).await?;

    let class = storage.update_class(ctx, class_id, update).await?;
    info!("Class {} updated by {}", class_id, caller_id);
    Ok(class)
}
