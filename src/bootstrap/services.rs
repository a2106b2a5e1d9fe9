//! # 启动流程依赖的服务集合

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::ai_config::{AiConfigStore, SeaOrmAiConfigStore};
use crate::auth::{ApiKeyService, SeaOrmApiKeyService};
use crate::config::{AppConfig, EnvironmentClassifier};
use crate::database::{DatabaseStats, SeaOrmDatabaseStats};

/// 启动流程的协作方，由调用方构造后注入
#[derive(Clone)]
pub struct StartupServices {
    pub api_keys: Arc<dyn ApiKeyService>,
    pub database: Arc<dyn DatabaseStats>,
    pub ai_configs: Arc<dyn AiConfigStore>,
    pub environment: Arc<dyn EnvironmentClassifier>,
}

impl StartupServices {
    /// 基于数据库连接创建全部默认实现
    #[must_use]
    pub fn from_database(db: Arc<DatabaseConnection>, config: &AppConfig) -> Self {
        Self {
            api_keys: Arc::new(SeaOrmApiKeyService::new(Arc::clone(&db), &config.api_key)),
            database: Arc::new(SeaOrmDatabaseStats::new(Arc::clone(&db))),
            ai_configs: Arc::new(SeaOrmAiConfigStore::new(db)),
            environment: Arc::new(config.deployment),
        }
    }
}
