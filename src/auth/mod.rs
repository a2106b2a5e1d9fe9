//! # 凭证模块
//!
//! 启动时使用的 API 密钥服务

pub mod api_key;

pub use api_key::{ApiKey, ApiKeyService, SeaOrmApiKeyService};

#[cfg(any(test, feature = "testing"))]
pub use api_key::MockApiKeyService;
