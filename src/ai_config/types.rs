//! # AI 模型配置类型

use std::fmt;
use std::str::FromStr;

use entity::ai_model_configs;
use serde::{Deserialize, Serialize};

use crate::error::HubError;

/// 模态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    Text,
    Image,
}

impl Modality {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
        }
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Modality {
    type Err = HubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "image" => Ok(Self::Image),
            other => Err(HubError::database(format!("未知的模态: {other}"))),
        }
    }
}

/// 待创建的 AI 模型配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAiModelConfig {
    pub modality: Modality,
    pub provider_id: String,
    pub model_id: String,
    pub system_prompt: Option<String>,
}

impl NewAiModelConfig {
    pub fn new(modality: Modality, provider_id: impl Into<String>, model_id: impl Into<String>) -> Self {
        Self {
            modality,
            provider_id: provider_id.into(),
            model_id: model_id.into(),
            system_prompt: None,
        }
    }

    #[must_use]
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }
}

/// 已保存的 AI 模型配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiModelConfig {
    pub id: i32,
    pub modality: Modality,
    pub provider_id: String,
    pub model_id: String,
    pub system_prompt: Option<String>,
}

impl AiModelConfig {
    /// 去掉 id 后的内容，便于比较
    #[must_use]
    pub fn content(&self) -> NewAiModelConfig {
        NewAiModelConfig {
            modality: self.modality,
            provider_id: self.provider_id.clone(),
            model_id: self.model_id.clone(),
            system_prompt: self.system_prompt.clone(),
        }
    }
}

impl TryFrom<ai_model_configs::Model> for AiModelConfig {
    type Error = HubError;

    fn try_from(model: ai_model_configs::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            modality: model.modality.parse()?,
            provider_id: model.provider_id,
            model_id: model.model_id,
            system_prompt: model.system_prompt,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modality_round_trip_through_str() {
        assert_eq!("text".parse::<Modality>().unwrap(), Modality::Text);
        assert_eq!(Modality::Image.to_string(), "image");
        assert!("video".parse::<Modality>().is_err());
    }

    #[test]
    fn test_try_from_rejects_unknown_modality() {
        let now = chrono::Utc::now().naive_utc();
        let model = ai_model_configs::Model {
            id: 7,
            modality: "audio".to_string(),
            provider_id: "openrouter".to_string(),
            model_id: "x".to_string(),
            system_prompt: None,
            created_at: now,
            updated_at: now,
        };
        assert!(AiModelConfig::try_from(model).is_err());
    }

    #[test]
    fn test_builder() {
        let config = NewAiModelConfig::new(Modality::Text, "openrouter", "m").with_system_prompt("p");
        assert_eq!(config.system_prompt.as_deref(), Some("p"));
    }
}
