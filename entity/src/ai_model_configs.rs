//! # AI 模型配置实体定义
//!
//! 按模态（文本/图像）记录默认使用的服务商与模型

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// AI 模型配置实体
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "ai_model_configs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// 模态：`text` 或 `image`
    pub modality: String,
    pub provider_id: String,
    pub model_id: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub system_prompt: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
