//! # 默认 AI 模型配置
//!
//! 仅在云端部署且存储为空时写入一组默认配置。检查与写入之间没有事务，
//! 依赖启动流程在每个进程中只执行一次。

use super::store::AiConfigStore;
use super::types::{Modality, NewAiModelConfig};
use crate::config::EnvironmentClassifier;
use crate::error::Result;
use crate::{ldebug, linfo, logging::{LogComponent, LogStage}};

/// 默认服务商
pub const DEFAULT_PROVIDER_ID: &str = "openrouter";
/// 默认文本模型
pub const DEFAULT_TEXT_MODEL: &str = "anthropic/claude-3.5-haiku";
/// 默认图像模型
pub const DEFAULT_IMAGE_MODEL: &str = "google/gemini-2.5-flash-image-preview";
/// 文本模型的默认系统提示词
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// 默认配置，按写入顺序排列（先文本后图像）
#[must_use]
pub fn default_ai_configs() -> [NewAiModelConfig; 2] {
    [
        NewAiModelConfig::new(Modality::Text, DEFAULT_PROVIDER_ID, DEFAULT_TEXT_MODEL)
            .with_system_prompt(DEFAULT_SYSTEM_PROMPT),
        NewAiModelConfig::new(Modality::Image, DEFAULT_PROVIDER_ID, DEFAULT_IMAGE_MODEL),
    ]
}

/// 写入结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedOutcome {
    /// 非云端部署，未访问存储
    SkippedNotCloud,
    /// 已存在配置，未写入
    SkippedExisting { existing: usize },
    /// 已写入默认配置
    Seeded { ids: Vec<i32> },
}

impl SeedOutcome {
    #[must_use]
    pub const fn is_seeded(&self) -> bool {
        matches!(self, Self::Seeded { .. })
    }
}

/// 按需写入默认 AI 模型配置
///
/// `create` 的错误直接返回，已经写入的记录不会回滚。
pub async fn seed_default_ai_configs_if_needed(
    environment: &dyn EnvironmentClassifier,
    store: &dyn AiConfigStore,
) -> Result<SeedOutcome> {
    if !environment.is_cloud_environment() {
        return Ok(SeedOutcome::SkippedNotCloud);
    }

    let existing = store.find_all().await?;
    if !existing.is_empty() {
        ldebug!(
            "system",
            LogStage::Seeding,
            LogComponent::AiConfig,
            "ai_configs_present",
            &format!("已存在 {} 条 AI 模型配置，跳过默认配置", existing.len())
        );
        return Ok(SeedOutcome::SkippedExisting {
            existing: existing.len(),
        });
    }

    let mut ids = Vec::with_capacity(2);
    for config in default_ai_configs() {
        ids.push(store.create(config).await?);
    }

    linfo!(
        "system",
        LogStage::Seeding,
        LogComponent::AiConfig,
        "default_models_configured",
        &format!(
            "✅ 已配置默认模型: text={DEFAULT_TEXT_MODEL}, image={DEFAULT_IMAGE_MODEL} ({DEFAULT_PROVIDER_ID})"
        )
    );

    Ok(SeedOutcome::Seeded { ids })
}
