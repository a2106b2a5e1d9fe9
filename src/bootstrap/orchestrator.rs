//! # 启动流程编排
//!
//! 按固定顺序执行启动步骤。API 密钥、数据库统计和默认配置写入中任何一步失败，
//! 都只在这里捕获一次：记录错误日志、写入 [`StartupReport`]，然后跳过后续步骤。
//! 整个流程不会返回错误，也不会终止进程。

use std::sync::Arc;

use super::admin::validate_admin_presence;
use super::report::{StartupReport, StartupStep};
use super::services::StartupServices;
use crate::ai_config::seed_default_ai_configs_if_needed;
use crate::auth::ApiKey;
use crate::config::{
    AdminCredentials, AdminField, AppConfig, DEFAULT_ADMIN_EMAIL, DEFAULT_ADMIN_PASSWORD,
};
use crate::error::HubError;
use crate::{lerror, linfo, logging::{LogComponent, LogStage}, lwarn};

type StepResult<T> = std::result::Result<T, (StartupStep, HubError)>;

/// 启动流程编排器
pub struct StartupOrchestrator {
    config: Arc<AppConfig>,
    services: StartupServices,
}

impl StartupOrchestrator {
    #[must_use]
    pub fn new(config: Arc<AppConfig>, services: StartupServices) -> Self {
        Self { config, services }
    }

    /// 执行完整的启动流程
    pub async fn run_startup_sequence(&self) -> StartupReport {
        linfo!(
            "system",
            LogStage::Startup,
            LogComponent::Bootstrap,
            "startup_begin",
            "🚀 开始执行启动流程"
        );

        let credentials = self.config.admin.resolve();
        if credentials.uses_insecure_defaults() {
            warn_insecure_defaults(&credentials);
        }

        let admin = validate_admin_presence(&credentials.email, &credentials.password);
        let mut report = StartupReport::new(admin, credentials.defaulted);
        report.complete(StartupStep::AdminCheck);

        if let Err((step, error)) = self.run_service_steps(&mut report).await {
            lerror!(
                "system",
                LogStage::Startup,
                LogComponent::Bootstrap,
                "startup_step_failed",
                &format!("❌ 启动流程在 {step} 步骤失败: {error}"),
                step = step,
                code = error.code()
            );
            report.record_failure(step, &error);
        }

        report
    }

    async fn run_service_steps(&self, report: &mut StartupReport) -> StepResult<()> {
        let api_key = self
            .services
            .api_keys
            .initialize_api_key()
            .await
            .map_err(|e| (StartupStep::ApiKey, e))?;
        report.api_key = Some(api_key.clone());
        report.complete(StartupStep::ApiKey);

        let table_count = self
            .services
            .database
            .get_user_table_count()
            .await
            .map_err(|e| (StartupStep::DatabaseStats, e))?;
        report.user_table_count = Some(table_count);
        report.complete(StartupStep::DatabaseStats);

        self.log_connection_summary();
        report.complete(StartupStep::ConnectionSummary);

        if table_count > 0 {
            linfo!(
                "system",
                LogStage::Db,
                LogComponent::Database,
                "user_tables_found",
                &format!("📊 数据库中共有 {table_count} 张业务表"),
                count = table_count
            );
        }

        let seed = seed_default_ai_configs_if_needed(
            self.services.environment.as_ref(),
            self.services.ai_configs.as_ref(),
        )
        .await
        .map_err(|e| (StartupStep::AiConfigSeed, e))?;
        report.seed = Some(seed);
        report.complete(StartupStep::AiConfigSeed);

        self.log_setup_complete(&api_key);
        report.complete(StartupStep::Summary);

        Ok(())
    }

    fn log_connection_summary(&self) {
        let postgres = &self.config.postgres;
        linfo!(
            "system",
            LogStage::Db,
            LogComponent::Database,
            "connection_summary",
            &format!(
                "🔗 数据库连接: {}:{}/{}",
                postgres.host, postgres.port, postgres.database
            ),
            host = postgres.host,
            port = postgres.port,
            database = postgres.database
        );
    }

    fn log_setup_complete(&self, api_key: &ApiKey) {
        let endpoints = &self.config.endpoints;
        linfo!(
            "system",
            LogStage::Startup,
            LogComponent::ApiKey,
            "api_key_ready",
            &format!("🔑 API 密钥: {api_key}")
        );
        linfo!(
            "system",
            LogStage::Startup,
            LogComponent::Bootstrap,
            "setup_complete",
            &format!(
                "🎉 初始化完成! 控制台: {} | API: {}",
                endpoints.dashboard_url, endpoints.api_url
            ),
            dashboard_url = endpoints.dashboard_url,
            api_url = endpoints.api_url
        );
    }
}

/// 使用占位凭证时逐项给出警告
fn warn_insecure_defaults(credentials: &AdminCredentials) {
    for field in &credentials.defaulted {
        let placeholder = match field {
            AdminField::Email => DEFAULT_ADMIN_EMAIL,
            AdminField::Password => DEFAULT_ADMIN_PASSWORD,
        };
        lwarn!(
            "system",
            LogStage::Configuration,
            LogComponent::AdminCheck,
            "admin_insecure_default",
            &format!(
                "⚠️ 未设置 {}，正在使用公开的占位值 {placeholder}，请在生产环境中修改",
                field.env_var()
            ),
            field = field.env_var()
        );
    }
}
