//! # 管理员凭证检查

use crate::{linfo, logging::{LogComponent, LogStage}, lwarn};

/// 凭证检查结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminCredentialStatus {
    Configured,
    Missing,
}

/// 检查管理员邮箱和密码是否都已配置
///
/// 只有空字符串视为未配置。缺失时只记录警告，不输出任何凭证内容。
pub fn validate_admin_presence(email: &str, password: &str) -> AdminCredentialStatus {
    if email.is_empty() || password.is_empty() {
        lwarn!(
            "system",
            LogStage::Startup,
            LogComponent::AdminCheck,
            "admin_credentials_missing",
            "⚠️ 未配置管理员凭证，请设置 ADMIN_EMAIL 和 ADMIN_PASSWORD"
        );
        return AdminCredentialStatus::Missing;
    }

    linfo!(
        "system",
        LogStage::Startup,
        LogComponent::AdminCheck,
        "admin_credentials_configured",
        &format!("✅ 管理员凭证已配置: {email}"),
        email = email
    );
    AdminCredentialStatus::Configured
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::capture_logs;
    use rstest::rstest;

    #[tokio::test]
    async fn test_present_credentials_log_info_with_email() {
        let (logs, _guard) = capture_logs();

        let status = validate_admin_presence("a@b.c", "x");

        assert_eq!(status, AdminCredentialStatus::Configured);
        assert!(logs.has_level_for("admin_credentials_configured", "INFO"));
        assert!(logs.contains("a@b.c"));
        assert_eq!(logs.count_level("WARN"), 0);
    }

    #[rstest]
    #[case("   ", "x")]
    #[case("a@b.c", "\t ")]
    #[case(" ", " ")]
    fn test_whitespace_values_are_present(#[case] email: &str, #[case] password: &str) {
        let (logs, _guard) = capture_logs();

        let status = validate_admin_presence(email, password);

        assert_eq!(status, AdminCredentialStatus::Configured);
        assert!(logs.has_level_for("admin_credentials_configured", "INFO"));
        assert_eq!(logs.count_level("WARN"), 0);
    }

    #[rstest]
    #[case("", "x")]
    #[case("a@b.c", "")]
    #[case("", "")]
    fn test_missing_credentials_warn(#[case] email: &str, #[case] password: &str) {
        let (logs, _guard) = capture_logs();

        let status = validate_admin_presence(email, password);

        assert_eq!(status, AdminCredentialStatus::Missing);
        assert!(logs.has_level_for("admin_credentials_missing", "WARN"));
        assert_eq!(logs.count_level("INFO"), 0);
    }

    #[test]
    fn test_missing_warning_does_not_leak_password() {
        let (logs, _guard) = capture_logs();

        validate_admin_presence("", "hunter2-secret");

        assert!(!logs.contains("hunter2-secret"));
    }
}
