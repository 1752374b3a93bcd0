use tracing::info;

use super::ClassScheduleService;
use crate::errors::Result;
use crate::models::class_members::entities::MemberLevel;
use crate::models::class_schedules::{
    entities::ClassSchedule, requests::CreateScheduleRequest,
};
use crate::runtime::RequestContext;
use crate::services::access::access_class;
use crate::utils::Validate;

pub async fn create_schedule(
    service: &ClassScheduleService,
    ctx: &RequestContext,
    caller_id: &str,
    class_id: &str,
    schedule: CreateScheduleRequest,
) -> Result<ClassSchedule> {
    schedule.validate()?;

    let storage = service.storage();
    access_class(storage, ctx, caller_id, class_id, MemberLevel::Member).await?;

    let schedule = storage
        .create_schedule(ctx, class_id, caller_id, schedule)
        .await?;
    info!(
        "Schedule {} created in class {} on day {} by {}",
        schedule.schedule_id, class_id, schedule.day, caller_id
    );
    Ok(schedule)
}
