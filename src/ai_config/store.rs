//! # AI 模型配置存储

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use entity::{AiModelConfigs, ai_model_configs};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use super::types::{AiModelConfig, NewAiModelConfig};
use crate::error::{HubError, Result};
use crate::{ldebug, logging::{LogComponent, LogStage}};

/// AI 模型配置存储
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait AiConfigStore: Send + Sync {
    /// 全部已保存的配置，可能为空
    async fn find_all(&self) -> Result<Vec<AiModelConfig>>;

    /// 保存一条新配置，返回记录 id
    async fn create(&self, config: NewAiModelConfig) -> Result<i32>;
}

/// Sea-ORM 实现
#[derive(Clone)]
pub struct SeaOrmAiConfigStore {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmAiConfigStore {
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AiConfigStore for SeaOrmAiConfigStore {
    async fn find_all(&self) -> Result<Vec<AiModelConfig>> {
        AiModelConfigs::find()
            .order_by_asc(ai_model_configs::Column::Id)
            .all(self.db.as_ref())
            .await?
            .into_iter()
            .map(AiModelConfig::try_from)
            .collect()
    }

    async fn create(&self, config: NewAiModelConfig) -> Result<i32> {
        let now = Utc::now().naive_utc();
        let model = ai_model_configs::ActiveModel {
            modality: Set(config.modality.as_str().to_string()),
            provider_id: Set(config.provider_id.clone()),
            model_id: Set(config.model_id.clone()),
            system_prompt: Set(config.system_prompt.clone()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(self.db.as_ref())
        .await
        .map_err(|e| {
            HubError::database_with_source(
                format!("保存 AI 模型配置失败 ({}/{}): {e}", config.modality, config.model_id),
                e,
            )
        })?;

        ldebug!(
            "system",
            LogStage::Seeding,
            LogComponent::AiConfig,
            "ai_config_created",
            &format!("创建 AI 模型配置 #{}", model.id),
            modality = config.modality,
            model = config.model_id
        );

        Ok(model.id)
    }
}
