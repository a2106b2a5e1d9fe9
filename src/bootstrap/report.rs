//! # 启动结果

use std::fmt;

use super::admin::AdminCredentialStatus;
use crate::ai_config::SeedOutcome;
use crate::auth::ApiKey;
use crate::config::AdminField;
use crate::error::HubError;

/// 启动流程中的步骤，按执行顺序排列
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StartupStep {
    AdminCheck,
    ApiKey,
    DatabaseStats,
    ConnectionSummary,
    AiConfigSeed,
    Summary,
}

impl StartupStep {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AdminCheck => "admin_check",
            Self::ApiKey => "api_key",
            Self::DatabaseStats => "database_stats",
            Self::ConnectionSummary => "connection_summary",
            Self::AiConfigSeed => "ai_config_seed",
            Self::Summary => "summary",
        }
    }
}

impl fmt::Display for StartupStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 某一步骤的失败记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepFailure {
    pub step: StartupStep,
    pub code: &'static str,
    pub message: String,
}

impl StepFailure {
    #[must_use]
    pub fn new(step: StartupStep, error: &HubError) -> Self {
        Self {
            step,
            code: error.code(),
            message: error.to_string(),
        }
    }
}

impl fmt::Display for StepFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.step, self.code, self.message)
    }
}

/// 一次启动流程的完整结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupReport {
    pub admin: AdminCredentialStatus,
    /// 使用了占位值的管理员字段
    pub insecure_defaults: Vec<AdminField>,
    pub completed_steps: Vec<StartupStep>,
    /// 失败后剩余步骤不再执行，所以最多只有一条
    pub errors: Vec<StepFailure>,
    pub api_key: Option<ApiKey>,
    pub user_table_count: Option<u64>,
    pub seed: Option<SeedOutcome>,
}

impl StartupReport {
    pub(crate) fn new(admin: AdminCredentialStatus, insecure_defaults: Vec<AdminField>) -> Self {
        Self {
            admin,
            insecure_defaults,
            completed_steps: Vec::new(),
            errors: Vec::new(),
            api_key: None,
            user_table_count: None,
            seed: None,
        }
    }

    /// 所有步骤都已完成且没有错误
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty() && self.completed_steps.contains(&StartupStep::Summary)
    }

    #[must_use]
    pub fn failed_step(&self) -> Option<StartupStep> {
        self.errors.first().map(|failure| failure.step)
    }

    #[must_use]
    pub fn has_completed(&self, step: StartupStep) -> bool {
        self.completed_steps.contains(&step)
    }

    pub(crate) fn complete(&mut self, step: StartupStep) {
        self.completed_steps.push(step);
    }

    pub(crate) fn record_failure(&mut self, step: StartupStep, error: &HubError) {
        self.errors.push(StepFailure::new(step, error));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_failure_records_code_and_message() {
        let mut report = StartupReport::new(AdminCredentialStatus::Configured, Vec::new());
        report.complete(StartupStep::AdminCheck);
        report.record_failure(StartupStep::ApiKey, &HubError::auth("凭证服务不可用"));

        assert!(!report.is_complete());
        assert_eq!(report.failed_step(), Some(StartupStep::ApiKey));
        assert_eq!(report.errors[0].code, "AUTH_ERROR");
        assert!(report.errors[0].message.contains("凭证服务不可用"));
        assert_eq!(
            report.errors[0].to_string(),
            format!("[api_key] AUTH_ERROR: {}", report.errors[0].message)
        );
    }

    #[test]
    fn test_complete_requires_summary_step() {
        let mut report = StartupReport::new(AdminCredentialStatus::Missing, Vec::new());
        report.complete(StartupStep::AdminCheck);
        assert!(!report.is_complete());

        report.complete(StartupStep::Summary);
        assert!(report.is_complete());
        assert!(report.has_completed(StartupStep::AdminCheck));
        assert!(!report.has_completed(StartupStep::ApiKey));
    }
}
