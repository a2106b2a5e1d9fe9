//! # 配置管理模块
//!
//! 处理应用配置加载、验证和管理

mod admin;
mod app_config;
mod database;
mod deployment;
pub mod loader;

pub use admin::{
    AdminConfig, AdminCredentials, AdminField, DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD,
};
pub use app_config::{ApiKeyConfig, AppConfig, EndpointConfig};
pub use database::{DatabaseConfig, PostgresConfig};
pub use deployment::{DeploymentConfig, DeploymentMode, EnvironmentClassifier};
pub use loader::load as load_config;

#[cfg(any(test, feature = "testing"))]
pub use deployment::MockEnvironmentClassifier;
