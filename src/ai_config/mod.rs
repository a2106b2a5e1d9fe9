//! # AI 模型配置模块
//!
//! 默认 AI 服务商配置的类型、存储和首次启动写入

pub mod seeder;
pub mod store;
pub mod types;

pub use seeder::{SeedOutcome, default_ai_configs, seed_default_ai_configs_if_needed};
pub use store::{AiConfigStore, SeaOrmAiConfigStore};
pub use types::{AiModelConfig, Modality, NewAiModelConfig};

#[cfg(any(test, feature = "testing"))]
pub use store::MockAiConfigStore;
