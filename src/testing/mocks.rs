//! # 测试替身
//!
//! 启动流程各协作方的内存实现，支持故障注入和调用计数。
//! 需要精确校验调用次数时也可以使用 `mockall` 生成的 `Mock*` 类型。

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use crate::ai_config::{AiConfigStore, AiModelConfig, NewAiModelConfig};
use crate::auth::{ApiKey, ApiKeyService};
use crate::config::EnvironmentClassifier;
use crate::database::DatabaseStats;
use crate::error::{HubError, Result};

/// 固定结果的环境分类器
#[derive(Debug, Clone, Copy)]
pub struct FixedEnvironment {
    cloud: bool,
}

impl FixedEnvironment {
    #[must_use]
    pub const fn cloud() -> Self {
        Self { cloud: true }
    }

    #[must_use]
    pub const fn self_hosted() -> Self {
        Self { cloud: false }
    }
}

impl EnvironmentClassifier for FixedEnvironment {
    fn is_cloud_environment(&self) -> bool {
        self.cloud
    }
}

#[derive(Default)]
struct StoreState {
    records: Vec<AiModelConfig>,
    next_id: i32,
}

/// 内存中的 AI 模型配置存储
#[derive(Default)]
pub struct InMemoryAiConfigStore {
    state: Mutex<StoreState>,
    find_all_calls: AtomicUsize,
    create_calls: AtomicUsize,
    fail_on_create_call: Option<usize>,
    fail_find_all: bool,
}

impl InMemoryAiConfigStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// 预先放入已有记录
    #[must_use]
    pub fn with_records(self, records: Vec<NewAiModelConfig>) -> Self {
        {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            for record in records {
                state.next_id += 1;
                let id = state.next_id;
                state.records.push(AiModelConfig {
                    id,
                    modality: record.modality,
                    provider_id: record.provider_id,
                    model_id: record.model_id,
                    system_prompt: record.system_prompt,
                });
            }
        }
        self
    }

    /// 第 `n` 次（从 1 开始）调用 `create` 时返回错误
    #[must_use]
    pub const fn fail_on_create_call(mut self, n: usize) -> Self {
        self.fail_on_create_call = Some(n);
        self
    }

    /// `find_all` 总是返回错误
    #[must_use]
    pub const fn fail_on_find_all(mut self) -> Self {
        self.fail_find_all = true;
        self
    }

    #[must_use]
    pub fn snapshot(&self) -> Vec<AiModelConfig> {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .records
            .clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .records
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn find_all_calls(&self) -> usize {
        self.find_all_calls.load(Ordering::SeqCst)
    }

    /// 包括失败的调用
    #[must_use]
    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AiConfigStore for InMemoryAiConfigStore {
    async fn find_all(&self) -> Result<Vec<AiModelConfig>> {
        self.find_all_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_find_all {
            return Err(HubError::database("模拟的查询失败"));
        }
        Ok(self.snapshot())
    }

    async fn create(&self, config: NewAiModelConfig) -> Result<i32> {
        let call = self.create_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_on_create_call == Some(call) {
            return Err(HubError::database(format!(
                "模拟的写入失败: {}",
                config.model_id
            )));
        }

        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.next_id += 1;
        let id = state.next_id;
        state.records.push(AiModelConfig {
            id,
            modality: config.modality,
            provider_id: config.provider_id,
            model_id: config.model_id,
            system_prompt: config.system_prompt,
        });
        Ok(id)
    }
}

/// 返回固定密钥（或固定错误）的凭证服务
pub struct StaticApiKeyService {
    result: std::result::Result<ApiKey, String>,
    calls: AtomicUsize,
}

impl StaticApiKeyService {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            result: Ok(ApiKey::new(key)),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            result: Err(message.into()),
            calls: AtomicUsize::new(0),
        }
    }

    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ApiKeyService for StaticApiKeyService {
    async fn initialize_api_key(&self) -> Result<ApiKey> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone().map_err(HubError::auth)
    }
}

/// 返回固定数量（或固定错误）的数据库统计
pub struct StaticDatabaseStats {
    result: std::result::Result<u64, String>,
    calls: AtomicUsize,
}

impl StaticDatabaseStats {
    #[must_use]
    pub const fn new(count: u64) -> Self {
        Self {
            result: Ok(count),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            result: Err(message.into()),
            calls: AtomicUsize::new(0),
        }
    }

    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DatabaseStats for StaticDatabaseStats {
    async fn get_user_table_count(&self) -> Result<u64> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone().map_err(HubError::database)
    }
}
