//! # Entity 模块
//!
//! 包含所有 Sea-ORM 实体定义

pub mod ai_model_configs;
pub mod system_settings;

pub use ai_model_configs::Entity as AiModelConfigs;
pub use system_settings::Entity as SystemSettings;
