//! # 测试数据
//!
//! 常用的配置组合

use crate::config::{AdminConfig, AppConfig, DeploymentConfig, DeploymentMode};

/// 管理员已配置的应用配置
#[must_use]
pub fn test_config(mode: DeploymentMode) -> AppConfig {
    AppConfig {
        admin: AdminConfig {
            email: Some("admin@test.local".to_string()),
            password: Some("test-password".to_string()),
            allow_insecure_defaults: true,
        },
        deployment: DeploymentConfig { mode },
        ..AppConfig::default()
    }
}

#[must_use]
pub fn cloud_config() -> AppConfig {
    test_config(DeploymentMode::Cloud)
}

#[must_use]
pub fn self_hosted_config() -> AppConfig {
    test_config(DeploymentMode::SelfHosted)
}

/// 未配置管理员凭证的配置
#[must_use]
pub fn unconfigured_admin(mut config: AppConfig, allow_insecure_defaults: bool) -> AppConfig {
    config.admin = AdminConfig {
        email: None,
        password: None,
        allow_insecure_defaults,
    };
    config
}
