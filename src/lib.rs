//! Classroom - 班级管理平台后端服务
//!
//! 基于 Actix Web 构建的班级、成员、任务与课表管理后端。
//!
//! # 架构
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `middlewares`: 身份认证中间件
//! - `models`: 数据模型定义
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期与请求上下文
//! - `services`: 业务逻辑层（含班级权限判定）
//! - `storage`: 数据存储层（内存 / SeaORM 双实现）
//! - `utils`: 工具函数

pub mod config;
pub mod entity;
pub mod errors;
pub mod middlewares;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
