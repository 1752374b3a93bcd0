use std::sync::Arc;

use actix_web::web;
use tracing::{debug, warn};

use crate::config::{AppConfig, StorageConfig};
use crate::errors::Result;
use crate::services::{
    ClassMemberService, ClassScheduleService, ClassService, ClassTaskService, UserService,
};
use crate::storage::{Storage, create_storage};
use crate::utils::jwt::JwtUtils;

#[derive(Clone)]
pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub jwt: JwtUtils,
    pub storage_config: StorageConfig,
}

impl StartupContext {
    /// 直接使用已有的存储后端（测试与嵌入场景）
    pub fn new(storage: Arc<dyn Storage>, jwt: JwtUtils, storage_config: StorageConfig) -> Self {
        Self {
            storage,
            jwt,
            storage_config,
        }
    }

    /// 注册各服务与共享状态，供路由处理程序通过 `web::Data` 提取
    pub fn configure_app_data(&self, cfg: &mut web::ServiceConfig) {
        let storage = self.storage.clone();
        cfg.app_data(web::Data::new(storage.clone()))
            .app_data(web::Data::new(self.jwt.clone()))
            .app_data(web::Data::new(self.storage_config.clone()))
            .app_data(web::Data::new(ClassService::new(storage.clone())))
            .app_data(web::Data::new(ClassMemberService::new(storage.clone())))
            .app_data(web::Data::new(ClassTaskService::new(storage.clone())))
            .app_data(web::Data::new(ClassScheduleService::new(storage.clone())))
            .app_data(web::Data::new(UserService::new(storage)));
    }
}

/// 准备服务器启动的上下文
/// 按配置创建存储后端并执行迁移
pub async fn prepare_server_startup(config: &AppConfig) -> Result<StartupContext> {
    debug!("Preparing storage backend {:?}", config.storage.backend);

    let storage = create_storage(config).await?;
    warn!("Storage backend initialized and migrations completed");

    Ok(StartupContext::new(
        storage,
        JwtUtils::from_config(&config.jwt),
        config.storage.clone(),
    ))
}
