//! # 管理员凭证配置
//!
//! 未配置管理员凭证时是否回落到公开的占位值，由 `allow_insecure_defaults`
//! 显式决定。

use serde::{Deserialize, Serialize};
use std::fmt;

/// 未设置 `ADMIN_EMAIL` 时使用的占位邮箱
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@example.com";
/// 未设置 `ADMIN_PASSWORD` 时使用的占位密码
pub const DEFAULT_ADMIN_PASSWORD: &str = "changeme123";

/// 管理员配置（原始输入）
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub email: Option<String>,
    pub password: Option<String>,
    /// 允许在未配置时使用占位凭证
    pub allow_insecure_defaults: bool,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            email: None,
            password: None,
            allow_insecure_defaults: true,
        }
    }
}

impl fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminConfig")
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("allow_insecure_defaults", &self.allow_insecure_defaults)
            .finish()
    }
}

/// 可能被占位值填充的字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdminField {
    Email,
    Password,
}

impl AdminField {
    #[must_use]
    pub const fn env_var(self) -> &'static str {
        match self {
            Self::Email => "ADMIN_EMAIL",
            Self::Password => "ADMIN_PASSWORD",
        }
    }
}

/// 解析后的管理员凭证
#[derive(Clone, PartialEq, Eq)]
pub struct AdminCredentials {
    pub email: String,
    pub password: String,
    /// 使用了占位值的字段
    pub defaulted: Vec<AdminField>,
}

impl fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("email", &self.email)
            .field("password", &"***")
            .field("defaulted", &self.defaulted)
            .finish()
    }
}

impl AdminCredentials {
    /// 是否使用了任意占位值
    #[must_use]
    pub fn uses_insecure_defaults(&self) -> bool {
        !self.defaulted.is_empty()
    }
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.is_empty())
}

impl AdminConfig {
    /// 按策略解析凭证
    ///
    /// 策略关闭时，未配置的字段保持为空字符串，交给凭证检查报告缺失。
    #[must_use]
    pub fn resolve(&self) -> AdminCredentials {
        let mut defaulted = Vec::new();

        let email = match non_empty(self.email.as_ref()) {
            Some(email) => email.to_string(),
            None if self.allow_insecure_defaults => {
                defaulted.push(AdminField::Email);
                DEFAULT_ADMIN_EMAIL.to_string()
            }
            None => String::new(),
        };

        let password = match non_empty(self.password.as_ref()) {
            Some(password) => password.to_string(),
            None if self.allow_insecure_defaults => {
                defaulted.push(AdminField::Password);
                DEFAULT_ADMIN_PASSWORD.to_string()
            }
            None => String::new(),
        };

        AdminCredentials {
            email,
            password,
            defaulted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_resolve_uses_configured_values() {
        let config = AdminConfig {
            email: Some("ops@corp.io".to_string()),
            password: Some("s3cret".to_string()),
            allow_insecure_defaults: true,
        };
        let creds = config.resolve();

        assert_eq!(creds.email, "ops@corp.io");
        assert_eq!(creds.password, "s3cret");
        assert!(!creds.uses_insecure_defaults());
    }

    #[test]
    fn test_resolve_falls_back_to_placeholders() {
        let creds = AdminConfig::default().resolve();

        assert_eq!(creds.email, DEFAULT_ADMIN_EMAIL);
        assert_eq!(creds.password, DEFAULT_ADMIN_PASSWORD);
        assert_eq!(creds.defaulted, vec![AdminField::Email, AdminField::Password]);
    }

    #[test]
    fn test_empty_values_count_as_unset() {
        let config = AdminConfig {
            email: Some(String::new()),
            password: Some("pw".to_string()),
            allow_insecure_defaults: true,
        };
        let creds = config.resolve();

        assert_eq!(creds.email, DEFAULT_ADMIN_EMAIL);
        assert_eq!(creds.defaulted, vec![AdminField::Email]);
    }

    #[test]
    fn test_whitespace_values_are_kept() {
        let config = AdminConfig {
            email: Some("   ".to_string()),
            password: Some(" ".to_string()),
            allow_insecure_defaults: true,
        };
        let creds = config.resolve();

        assert_eq!(creds.email, "   ");
        assert_eq!(creds.password, " ");
        assert!(!creds.uses_insecure_defaults());
    }

    #[test]
    fn test_strict_policy_leaves_fields_empty() {
        let config = AdminConfig {
            email: None,
            password: None,
            allow_insecure_defaults: false,
        };
        let creds = config.resolve();

        assert!(creds.email.is_empty());
        assert!(creds.password.is_empty());
        assert!(!creds.uses_insecure_defaults());
    }

    #[test]
    fn test_debug_redacts_password() {
        let creds = AdminConfig {
            email: Some("a@b.c".to_string()),
            password: Some("hunter2".to_string()),
            allow_insecure_defaults: false,
        }
        .resolve();

        let printed = format!("{creds:?}");
        assert!(!printed.contains("hunter2"));
        assert!(printed.contains("a@b.c"));
    }
}
