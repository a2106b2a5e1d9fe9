//! # 应用配置结构定义

use super::{AdminConfig, DatabaseConfig, DeploymentConfig, PostgresConfig};
use crate::ensure_config;
use crate::error::{HubError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 应用主配置结构
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// 数据库连接配置
    pub database: DatabaseConfig,
    /// 连接摘要中展示的 PostgreSQL 信息
    pub postgres: PostgresConfig,
    /// 管理员凭证
    pub admin: AdminConfig,
    /// 部署模式
    pub deployment: DeploymentConfig,
    /// API 密钥
    pub api_key: ApiKeyConfig,
    /// 启动完成后提示的访问地址
    pub endpoints: EndpointConfig,
}

/// API 密钥配置
#[derive(Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiKeyConfig {
    /// 预先配置的密钥，存在时不再生成
    pub key: Option<String>,
}

impl fmt::Debug for ApiKeyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKeyConfig")
            .field("key", &self.key.as_ref().map(|_| "***"))
            .finish()
    }
}

/// 对外访问地址
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    pub dashboard_url: String,
    pub api_url: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            dashboard_url: "http://localhost:3000".to_string(),
            api_url: "http://localhost:8000/api".to_string(),
        }
    }
}

impl AppConfig {
    /// 验证配置的有效性
    pub fn validate(&self) -> Result<()> {
        ensure_config!(!self.database.url.trim().is_empty(), "数据库URL不能为空");
        ensure_config!(
            self.database.is_sqlite() || self.database.is_postgres(),
            "不支持的数据库URL: {}",
            self.database.url
        );
        ensure_config!(
            self.database.max_connections > 0,
            "数据库最大连接数必须大于0"
        );
        ensure_config!(self.postgres.port > 0, "无效的 POSTGRES_PORT: 0");

        for (name, value) in [
            ("dashboard_url", &self.endpoints.dashboard_url),
            ("api_url", &self.endpoints.api_url),
        ] {
            url::Url::parse(value).map_err(|e| {
                HubError::config_with_source(format!("无效的 {name}: {value}"), e)
            })?;
        }

        if let Some(key) = &self.api_key.key {
            ensure_config!(!key.trim().is_empty(), "API_KEY 不能为空字符串");
        }

        Ok(())
    }
}
