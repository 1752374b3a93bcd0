pub mod create;
pub mod delete;
pub mod get;
pub mod update;

use std::sync::Arc;

use crate::errors::Result;
use crate::models::class_schedules::entities::ClassSchedule;
use crate::models::class_tasks::{entities::ClassTask, requests::TaskRangeQuery};
use crate::models::classes::{
    entities::Class,
    requests::{CreateClassRequest, UpdateClassRequest},
};
use crate::runtime::RequestContext;
use crate::storage::Storage;

pub struct ClassService {
    storage: Arc<dyn Storage>,
}

impl ClassService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub(crate) fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }

    // 创建班级，创建者自动成为 owner
    pub async fn create_class(
        &self,
        ctx: &RequestContext,
        caller_id: &str,
        class: CreateClassRequest,
    ) -> Result<Class> {
        create::create_class(self, ctx, caller_id, class).await
    }

    // 根据班级 ID 获取班级信息
    pub async fn get_class_info(&self, ctx: &RequestContext, class_id: &str) -> Result<Class> {
        get::get_class_info(self, ctx, class_id).await
    }

    // 根据创建者用户名与班级名获取班级信息
    pub async fn get_class_info_by_name(
        &self,
        ctx: &RequestContext,
        owner_username: &str,
        name: &str,
    ) -> Result<Class> {
        get::get_class_info_by_name(self, ctx, owner_username, name).await
    }

    // 班级任务列表，默认从现在起一周
    pub async fn list_tasks(
        &self,
        ctx: &RequestContext,
        class_id: &str,
        range: TaskRangeQuery,
    ) -> Result<Vec<ClassTask>> {
        get::list_tasks(self, ctx, class_id, range).await
    }

    // 班级课表
    pub async fn list_schedules(
        &self,
        ctx: &RequestContext,
        class_id: &str,
    ) -> Result<Vec<ClassSchedule>> {
        get::list_schedules(self, ctx, class_id).await
    }

    // 更新班级信息
    pub async fn update_class(
        &self,
        ctx: &RequestContext,
        caller_id: &str,
        class_id: &str,
        update: UpdateClassRequest,
    ) -> Result<Class> {
        update::update_class(self, ctx, caller_id, class_id, update).await
    }

    // 根据班级 ID 删除班级
    pub async fn delete_class(
        &self,
        ctx: &RequestContext,
        caller_id: &str,
        class_id: &str,
    ) -> Result<()> {
        delete::delete_class(self, ctx, caller_id, class_id).await
    }
}
