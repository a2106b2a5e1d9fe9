//! # 系统设置实体定义
//!
//! 键值形式保存的系统级设置，例如自动生成的 API 密钥

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 保存自动生成 API 密钥时使用的键名
pub const API_KEY_SETTING: &str = "api_key";

/// 系统设置实体
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "system_settings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,
    #[sea_orm(column_type = "Text")]
    pub value: String,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
