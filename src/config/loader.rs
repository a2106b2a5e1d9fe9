//! # 配置加载
//!
//! 加载顺序：内置默认值 → 可选的 TOML 配置文件 → 环境变量覆盖。
//! 只在进程入口处执行一次，之后以不可变的 [`AppConfig`] 传递。

use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};

use super::AppConfig;
use crate::error::{HubError, Result};
use crate::{ldebug, linfo, logging::{LogComponent, LogStage}};

/// 指定配置文件路径的环境变量
pub const CONFIG_PATH_ENV: &str = "AI_HUB_CONFIG_PATH";

/// 支持覆盖的环境变量
pub const SUPPORTED_ENV_VARS: &[&str] = &[
    "DATABASE_URL",
    "ADMIN_EMAIL",
    "ADMIN_PASSWORD",
    "ALLOW_INSECURE_DEFAULTS",
    "POSTGRES_HOST",
    "POSTGRES_PORT",
    "POSTGRES_DB",
    "DEPLOYMENT_MODE",
    "API_KEY",
    "DASHBOARD_URL",
    "API_BASE_URL",
];

/// 从进程环境加载配置
///
/// `explicit_path` 优先于 `AI_HUB_CONFIG_PATH`；都未指定时尝试
/// `config/config.{RUST_ENV}.toml`，文件不存在则只使用默认值。
pub fn load(explicit_path: Option<&Path>) -> Result<AppConfig> {
    let vars: HashMap<String, String> = env::vars()
        .filter(|(key, _)| {
            SUPPORTED_ENV_VARS.contains(&key.as_str()) || key == CONFIG_PATH_ENV || key == "RUST_ENV"
        })
        .collect();

    let config_file = resolve_config_path(explicit_path, &vars)?;
    from_sources(config_file.as_deref(), &vars)
}

/// 选择配置文件
fn resolve_config_path(
    explicit_path: Option<&Path>,
    vars: &HashMap<String, String>,
) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit_path {
        return Ok(Some(path.to_path_buf()));
    }

    if let Some(path) = vars.get(CONFIG_PATH_ENV) {
        return Ok(Some(PathBuf::from(path)));
    }

    let rust_env = vars.get("RUST_ENV").map_or("dev", String::as_str);
    let candidate = PathBuf::from(format!("config/config.{rust_env}.toml"));
    if candidate.exists() {
        Ok(Some(candidate))
    } else {
        ldebug!(
            "system",
            LogStage::Configuration,
            LogComponent::Config,
            "config_file_absent",
            &format!("未找到配置文件 {}，使用默认配置", candidate.display())
        );
        Ok(None)
    }
}

/// 由配置文件和给定的环境变量构建配置，并完成校验
pub fn from_sources(
    config_file: Option<&Path>,
    vars: &HashMap<String, String>,
) -> Result<AppConfig> {
    let mut config = match config_file {
        Some(path) => load_config_file(path)?,
        None => AppConfig::default(),
    };

    apply_env_overrides(&mut config, vars)?;
    config.validate()?;

    linfo!(
        "system",
        LogStage::Configuration,
        LogComponent::Config,
        "config_loaded",
        "配置加载完成",
        deployment_mode = config.deployment.mode,
        file = config_file.map_or_else(|| "<none>".to_string(), |p| p.display().to_string())
    );

    Ok(config)
}

/// 加载配置文件
fn load_config_file(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        return Err(HubError::config(format!("配置文件不存在: {}", path.display())));
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        HubError::config_with_source(format!("读取配置文件失败: {}", path.display()), e)
    })?;

    toml::from_str(&content).map_err(|e| {
        HubError::config_with_source(
            format!("TOML解析失败 - 配置文件: {}, 详细错误: {e}", path.display()),
            e,
        )
    })
}

fn is_sensitive(key: &str) -> bool {
    key.contains("PASSWORD") || key.contains("KEY") || key.contains("SECRET")
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(HubError::config(format!("无效的布尔值 {key}={value}"))),
    }
}

/// 应用环境变量覆盖
///
/// 空字符串视为未设置，保持文件或默认值。
fn apply_env_overrides(config: &mut AppConfig, vars: &HashMap<String, String>) -> Result<()> {
    for key in SUPPORTED_ENV_VARS {
        let Some(value) = vars.get(*key).filter(|v| !v.is_empty()) else {
            continue;
        };

        ldebug!(
            "system",
            LogStage::Configuration,
            LogComponent::Config,
            "env_override",
            &format!(
                "应用环境变量覆盖: {key} = {}",
                if is_sensitive(key) { "***" } else { value.as_str() }
            )
        );

        match *key {
            "DATABASE_URL" => config.database.url.clone_from(value),
            "ADMIN_EMAIL" => config.admin.email = Some(value.clone()),
            "ADMIN_PASSWORD" => config.admin.password = Some(value.clone()),
            "ALLOW_INSECURE_DEFAULTS" => {
                config.admin.allow_insecure_defaults = parse_bool(key, value)?;
            }
            "POSTGRES_HOST" => config.postgres.host.clone_from(value),
            "POSTGRES_PORT" => {
                config.postgres.port = value.trim().parse().map_err(|e| {
                    HubError::config_with_source(format!("无效的 POSTGRES_PORT: {value}"), e)
                })?;
            }
            "POSTGRES_DB" => config.postgres.database.clone_from(value),
            "DEPLOYMENT_MODE" => config.deployment.mode = value.parse()?,
            "API_KEY" => config.api_key.key = Some(value.trim().to_string()),
            "DASHBOARD_URL" => config.endpoints.dashboard_url.clone_from(value),
            "API_BASE_URL" => config.endpoints.api_url.clone_from(value),
            _ => {}
        }
    }

    Ok(())
}
