use tracing::info;

use super::ClassScheduleService;
use crate::errors::Result;
use crate::models::class_members::entities::MemberLevel;
use crate::runtime::RequestContext;
use crate::services::access::{access_class, class_not_found};
use crate::utils::validate::validate_day;

pub async fn delete_schedule(
    service: &ClassScheduleService,
    ctx: &RequestContext,
    caller_id: &str,
    schedule_id: &str,
) -> Result<()> {
    let storage = service.storage();
    let schedule = super::get::get_schedule(service, ctx, schedule_id).await?;

    storage
        .get_class(ctx, &schedule.class_id)
        .await
        .map_err(|e| {
            if e.is_not_found() {
                class_not_found(&schedule.class_id)
            } else {
                e
            }
        })?;
    access_class(storage, ctx, caller_id, &schedule.class_id, MemberLevel::Admin).await?;

    storage.delete_schedule(ctx, schedule_id).await?;
    info!("Schedule {} deleted by {}", schedule_id, caller_id);
    Ok(())
}

pub async fn clear_schedules(
    service: &ClassScheduleService,
    ctx: &RequestContext,
    caller_id: &str,
    class_id: &str,
    day: i16,
) -> Result<u64> {
    validate_day(day)?;

    let storage = service.storage();
    access_class(storage, ctx, caller_id, class_id, MemberLevel::Admin).await?;

    let removed = storage.clear_schedules(ctx, class_id, day).await?;
    info!(
        "Cleared {} schedules of class {} on day {} by {}",
        removed, class_id, day, caller_id
    );
    Ok(removed)
}
