//! # API 密钥初始化
//!
//! 优先使用配置中的密钥；否则复用数据库中已保存的密钥；都没有时生成新密钥并持久化。

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use entity::{SystemSettings, system_settings};
use rand::Rng;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};

use crate::config::ApiKeyConfig;
use crate::error::{HubError, Result};
use crate::{linfo, logging::{LogComponent, LogStage}};

/// 生成的密钥前缀
pub const API_KEY_PREFIX: &str = "sk-";
/// 前缀之后的随机部分长度
pub const API_KEY_RANDOM_LEN: usize = 48;

/// API 密钥
///
/// `Debug` 输出会打码，`Display` 输出完整值。
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// 生成新的随机密钥
    #[must_use]
    pub fn generate() -> Self {
        Self(format!(
            "{API_KEY_PREFIX}{}",
            generate_random_key(API_KEY_RANDOM_LEN)
        ))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 只保留首尾各 4 个字符
    #[must_use]
    pub fn masked(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        if chars.len() <= 8 {
            return "*".repeat(chars.len());
        }
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}...{tail}")
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ApiKey").field(&self.masked()).finish()
    }
}

/// 生成随机密钥
fn generate_random_key(length: usize) -> String {
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::thread_rng();

    (0..length)
        .map(|_| {
            let idx = rng.gen_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// 凭证服务：确保系统存在可用的 API 密钥
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait ApiKeyService: Send + Sync {
    async fn initialize_api_key(&self) -> Result<ApiKey>;
}

/// 基于 `system_settings` 表的实现
#[derive(Clone)]
pub struct SeaOrmApiKeyService {
    db: Arc<DatabaseConnection>,
    configured: Option<ApiKey>,
}

impl SeaOrmApiKeyService {
    #[must_use]
    pub fn new(db: Arc<DatabaseConnection>, config: &ApiKeyConfig) -> Self {
        Self {
            db,
            configured: config.key.clone().map(ApiKey::new),
        }
    }

    async fn load_stored_key(&self) -> Result<Option<ApiKey>> {
        let stored = SystemSettings::find_by_id(system_settings::API_KEY_SETTING.to_string())
            .one(self.db.as_ref())
            .await?;
        Ok(stored.map(|setting| ApiKey::new(setting.value)))
    }

    async fn persist_key(&self, key: &ApiKey) -> Result<()> {
        system_settings::ActiveModel {
            key: Set(system_settings::API_KEY_SETTING.to_string()),
            value: Set(key.as_str().to_string()),
            updated_at: Set(Utc::now().naive_utc()),
        }
        .insert(self.db.as_ref())
        .await
        .map_err(|e| HubError::auth_with_source(format!("持久化 API 密钥失败: {e}"), e))?;
        Ok(())
    }
}

#[async_trait]
impl ApiKeyService for SeaOrmApiKeyService {
    async fn initialize_api_key(&self) -> Result<ApiKey> {
        if let Some(key) = &self.configured {
            linfo!(
                "system",
                LogStage::Authentication,
                LogComponent::ApiKey,
                "api_key_from_config",
                "使用配置中的 API 密钥"
            );
            return Ok(key.clone());
        }

        if let Some(key) = self.load_stored_key().await? {
            linfo!(
                "system",
                LogStage::Authentication,
                LogComponent::ApiKey,
                "api_key_loaded",
                "复用已保存的 API 密钥",
                key = key.masked()
            );
            return Ok(key);
        }

        let key = ApiKey::generate();
        self.persist_key(&key).await?;
        linfo!(
            "system",
            LogStage::Authentication,
            LogComponent::ApiKey,
            "api_key_generated",
            "已生成并保存新的 API 密钥",
            key = key.masked()
        );
        Ok(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::create_test_db;

    #[test]
    fn test_generated_key_shape() {
        let key = ApiKey::generate();
        assert!(key.as_str().starts_with(API_KEY_PREFIX));
        assert_eq!(key.as_str().len(), API_KEY_PREFIX.len() + API_KEY_RANDOM_LEN);
        assert!(key.as_str()[API_KEY_PREFIX.len()..]
            .chars()
            .all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(ApiKey::generate(), ApiKey::generate());
    }

    #[test]
    fn test_masked_and_debug() {
        let key = ApiKey::new("sk-abcdefghijklmnop");
        assert_eq!(key.masked(), "sk-a...mnop");
        assert_eq!(format!("{key:?}"), "ApiKey(\"sk-a...mnop\")");
        assert_eq!(key.to_string(), "sk-abcdefghijklmnop");
        assert_eq!(ApiKey::new("short").masked(), "*****");
    }

    #[tokio::test]
    async fn test_configured_key_wins() {
        let db = Arc::new(create_test_db().await.unwrap());
        let service = SeaOrmApiKeyService::new(
            db.clone(),
            &ApiKeyConfig {
                key: Some("sk-configured".to_string()),
            },
        );

        let key = service.initialize_api_key().await.unwrap();
        assert_eq!(key.as_str(), "sk-configured");
        // 配置的密钥不写入数据库
        assert!(SystemSettings::find().all(db.as_ref()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_generates_once_then_reuses() {
        let db = Arc::new(create_test_db().await.unwrap());
        let service = SeaOrmApiKeyService::new(db.clone(), &ApiKeyConfig::default());

        let first = service.initialize_api_key().await.unwrap();
        let second = service.initialize_api_key().await.unwrap();

        assert_eq!(first, second);
        let stored = SystemSettings::find().all(db.as_ref()).await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].value, first.as_str());
    }

    #[tokio::test]
    async fn test_missing_table_is_error() {
        let db = sea_orm::Database::connect("sqlite::memory:").await.unwrap();
        let service = SeaOrmApiKeyService::new(Arc::new(db), &ApiKeyConfig::default());

        assert!(service.initialize_api_key().await.is_err());
    }
}
