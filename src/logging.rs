//! # 日志配置模块
//!
//! 提供日志初始化以及带阶段/组件上下文的结构化日志宏
//! (`linfo!`、`lwarn!`、`lerror!`、`ldebug!`)。
//!
//! 宏的参数顺序固定为 `(request_id, stage, component, operation, message)`，
//! 之后可以追加任意 `key = value` 字段:
//!
//! ```ignore
//! linfo!("system", LogStage::Startup, LogComponent::Main, "boot", "启动", port = 8080);
//! ```

use std::env;
use std::fmt;
use tracing_subscriber::{EnvFilter, fmt as fmt_layer, layer::SubscriberExt, util::SubscriberInitExt};

/// 日志所处的处理阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogStage {
    /// 进程启动
    Startup,
    /// 配置加载与校验
    Configuration,
    /// 数据库访问
    Db,
    /// 凭证与 API 密钥
    Authentication,
    /// 默认数据写入
    Seeding,
    /// 进程退出
    Shutdown,
}

impl LogStage {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Startup => "startup",
            Self::Configuration => "configuration",
            Self::Db => "db",
            Self::Authentication => "authentication",
            Self::Seeding => "seeding",
            Self::Shutdown => "shutdown",
        }
    }
}

impl fmt::Display for LogStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 产生日志的组件
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogComponent {
    Main,
    Config,
    Database,
    ApiKey,
    AdminCheck,
    AiConfig,
    Bootstrap,
}

impl LogComponent {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Config => "config",
            Self::Database => "database",
            Self::ApiKey => "api_key",
            Self::AdminCheck => "admin_check",
            Self::AiConfig => "ai_config",
            Self::Bootstrap => "bootstrap",
        }
    }
}

impl fmt::Display for LogComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 结构化 info 日志
#[macro_export]
macro_rules! linfo {
    ($request_id:expr, $stage:expr, $component:expr, $operation:expr, $message:expr $(, $key:ident = $value:expr)* $(,)?) => {
        ::tracing::info!(
            request_id = %$request_id,
            stage = %$stage,
            component = %$component,
            operation = %$operation,
            $($key = %$value,)*
            "{}",
            $message
        )
    };
}

/// 结构化 warn 日志
#[macro_export]
macro_rules! lwarn {
    ($request_id:expr, $stage:expr, $component:expr, $operation:expr, $message:expr $(, $key:ident = $value:expr)* $(,)?) => {
        ::tracing::warn!(
            request_id = %$request_id,
            stage = %$stage,
            component = %$component,
            operation = %$operation,
            $($key = %$value,)*
            "{}",
            $message
        )
    };
}

/// 结构化 error 日志
#[macro_export]
macro_rules! lerror {
    ($request_id:expr, $stage:expr, $component:expr, $operation:expr, $message:expr $(, $key:ident = $value:expr)* $(,)?) => {
        ::tracing::error!(
            request_id = %$request_id,
            stage = %$stage,
            component = %$component,
            operation = %$operation,
            $($key = %$value,)*
            "{}",
            $message
        )
    };
}

/// 结构化 debug 日志
#[macro_export]
macro_rules! ldebug {
    ($request_id:expr, $stage:expr, $component:expr, $operation:expr, $message:expr $(, $key:ident = $value:expr)* $(,)?) => {
        ::tracing::debug!(
            request_id = %$request_id,
            stage = %$stage,
            component = %$component,
            operation = %$operation,
            $($key = %$value,)*
            "{}",
            $message
        )
    };
}

/// 构建默认的日志过滤规则
///
/// 默认完全关闭 SQL 语句级别的日志，只保留 sea-orm/sqlx 的警告。
#[must_use]
pub fn default_filter(log_level: Option<&str>) -> String {
    let level = log_level.unwrap_or("info");
    format!("{level},ai_hub={level},sqlx::query=off,sea_orm::query=warn,sqlx=warn")
}

/// 初始化优化的日志系统
///
/// `RUST_LOG` 存在时优先使用。重复调用不会 panic。
pub fn init_optimized_logging(log_level: Option<&str>) {
    let log_filter = env::var("RUST_LOG").unwrap_or_else(|_| default_filter(log_level));

    let initialized = tracing_subscriber::registry()
        .with(EnvFilter::try_new(&log_filter).unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            fmt_layer::layer()
                .with_target(true)
                .with_level(true)
                .with_thread_ids(false)
                .with_thread_names(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .try_init()
        .is_ok();

    if initialized {
        tracing::debug!(filter = %log_filter, "📋 日志系统初始化完成");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::capture_logs;

    #[test]
    fn test_default_filter_silences_sql_queries() {
        let filter = default_filter(None);
        assert!(filter.starts_with("info,"));
        assert!(filter.contains("sqlx::query=off"));

        let filter = default_filter(Some("debug"));
        assert!(filter.starts_with("debug,"));
        assert!(filter.contains("ai_hub=debug"));
    }

    #[test]
    fn test_stage_and_component_display() {
        assert_eq!(LogStage::Seeding.to_string(), "seeding");
        assert_eq!(LogComponent::AiConfig.to_string(), "ai_config");
        assert_eq!(LogComponent::AdminCheck.as_str(), "admin_check");
    }

    #[test]
    fn test_structured_macro_fields() {
        let (logs, _guard) = capture_logs();

        linfo!(
            "system",
            LogStage::Startup,
            LogComponent::Main,
            "unit_probe",
            "hello",
            port = 5432
        );
        lwarn!("req-1", LogStage::Db, LogComponent::Database, "warn_probe", &format!("n={}", 3));

        let output = logs.contents();
        assert!(output.contains("operation=unit_probe"));
        assert!(output.contains("component=main"));
        assert!(output.contains("port=5432"));
        assert!(output.contains("request_id=req-1"));
        assert!(output.contains("n=3"));
        assert!(logs.has_level_for("warn_probe", "WARN"));
    }
}
