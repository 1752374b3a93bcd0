use super::ClassScheduleService;
use crate::errors::Result;
use crate::models::class_schedules::entities::ClassSchedule;
use crate::runtime::RequestContext;

pub async fn get_schedule(
    service: &ClassScheduleService,
    ctx: &RequestContext,
    schedule_id: &str,
) -> Result<ClassSchedule> {
    service
        .storage()
        .get_schedule(ctx, schedule_id)
        .await
        .map_err(|e| {
            if e.is_not_found() {
                e.with_message(format!("can not find schedule with id \"{schedule_id}\""))
            } else {
                e
            }
        })
}

pub async fn get_schedules(
    service: &ClassScheduleService,
    ctx: &RequestContext,
    class_id: &str,
) -> Result<Vec<ClassSchedule>> {
    service.storage().get_schedules(ctx, class_id).await
}
