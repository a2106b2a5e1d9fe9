//! # 错误处理测试

use crate::error::{Context, HubError};
use std::error::Error;

#[test]
fn test_config_error_creation() {
    let err = HubError::config("测试配置错误");
    assert!(matches!(err, HubError::Config { .. }));
    assert_eq!(err.to_string(), "配置错误: 测试配置错误");
    assert_eq!(err.code(), "CONFIG_ERROR");
}

#[test]
fn test_config_error_with_source() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "文件不存在");
    let err = HubError::config_with_source("配置文件加载失败", io_err);

    assert!(matches!(err, HubError::Config { .. }));
    assert!(err.to_string().contains("配置错误: 配置文件加载失败"));
    assert!(err.source().is_some());
}

#[test]
fn test_db_err_conversion_keeps_message() {
    let db_err = sea_orm::DbErr::Custom("disk I/O error".to_string());
    let err: HubError = db_err.into();

    assert!(matches!(err, HubError::Database { .. }));
    assert!(err.to_string().contains("disk I/O error"));
}

#[test]
fn test_auto_conversion_from_io_error() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "文件不存在");
    let err: HubError = io_err.into();

    assert!(matches!(err, HubError::Io { .. }));
    assert_eq!(err.code(), "IO_ERROR");
}

#[test]
fn test_context_wraps_and_keeps_code() {
    let result: std::result::Result<(), HubError> = Err(HubError::auth("密钥写入失败"));
    let err = result.context("初始化 API 密钥").unwrap_err();

    assert!(matches!(err, HubError::Context { .. }));
    assert_eq!(err.to_string(), "初始化 API 密钥: 认证错误: 密钥写入失败");
    assert_eq!(err.code(), "AUTH_ERROR");
}

#[test]
fn test_context_on_db_err() {
    let result: std::result::Result<(), sea_orm::DbErr> =
        Err(sea_orm::DbErr::Custom("连接断开".to_string()));
    let err = result.with_context(|| "统计数据表").unwrap_err();

    assert!(err.to_string().starts_with("统计数据表: 数据库错误: "));
    assert_eq!(err.code(), "DATABASE_ERROR");
}

#[test]
fn test_macros() {
    fn check(port: u32) -> crate::error::Result<u32> {
        crate::ensure_config!(port > 0, "无效的端口: {}", port);
        Ok(port)
    }

    assert!(check(5432).is_ok());
    let err = check(0).unwrap_err();
    assert_eq!(err.to_string(), "配置错误: 无效的端口: 0");

    let err = crate::database_error!("表 {} 不存在", "ai_model_configs");
    assert!(matches!(err, HubError::Database { .. }));
}
