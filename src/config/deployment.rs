//! # 部署模式
//!
//! 云端部署会在首次启动时写入默认的 AI 服务商配置，自托管部署不会。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::HubError;

/// 部署模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeploymentMode {
    /// 托管云环境
    Cloud,
    /// 本地或自托管环境
    #[default]
    #[serde(alias = "self_hosted", alias = "local")]
    SelfHosted,
}

impl DeploymentMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cloud => "cloud",
            Self::SelfHosted => "self-hosted",
        }
    }
}

impl fmt::Display for DeploymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeploymentMode {
    type Err = HubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cloud" => Ok(Self::Cloud),
            "self-hosted" | "self_hosted" | "selfhosted" | "local" => Ok(Self::SelfHosted),
            other => Err(HubError::config(format!("未知的部署模式: {other}"))),
        }
    }
}

/// 部署配置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DeploymentConfig {
    pub mode: DeploymentMode,
}

/// 环境分类器
///
/// 纯函数：只依赖进程配置，不访问任何外部服务。
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait EnvironmentClassifier: Send + Sync {
    fn is_cloud_environment(&self) -> bool;
}

impl EnvironmentClassifier for DeploymentConfig {
    fn is_cloud_environment(&self) -> bool {
        self.mode == DeploymentMode::Cloud
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("cloud", DeploymentMode::Cloud)]
    #[case("CLOUD", DeploymentMode::Cloud)]
    #[case("self-hosted", DeploymentMode::SelfHosted)]
    #[case("self_hosted", DeploymentMode::SelfHosted)]
    #[case(" local ", DeploymentMode::SelfHosted)]
    fn test_parse_deployment_mode(#[case] raw: &str, #[case] expected: DeploymentMode) {
        assert_eq!(raw.parse::<DeploymentMode>().unwrap(), expected);
    }

    #[test]
    fn test_parse_unknown_mode_is_config_error() {
        let err = "edge".parse::<DeploymentMode>().unwrap_err();
        assert!(matches!(err, HubError::Config { .. }));
    }

    #[test]
    fn test_classifier() {
        let cloud = DeploymentConfig {
            mode: DeploymentMode::Cloud,
        };
        assert!(cloud.is_cloud_environment());
        assert!(!DeploymentConfig::default().is_cloud_environment());
    }

    #[test]
    fn test_toml_aliases() {
        let config: DeploymentConfig = toml::from_str("mode = \"local\"").unwrap();
        assert_eq!(config.mode, DeploymentMode::SelfHosted);
        let config: DeploymentConfig = toml::from_str("mode = \"cloud\"").unwrap();
        assert_eq!(config.mode, DeploymentMode::Cloud);
    }
}
