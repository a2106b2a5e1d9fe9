//! # 启动引导模块
//!
//! 进程启动时执行一次的初始化流程：管理员凭证检查、API 密钥初始化、
//! 数据库统计、连接摘要、云端默认 AI 配置写入和完成提示。

pub mod admin;
pub mod orchestrator;
pub mod report;
pub mod services;

pub use admin::{AdminCredentialStatus, validate_admin_presence};
pub use orchestrator::StartupOrchestrator;
pub use report::{StartupReport, StartupStep, StepFailure};
pub use services::StartupServices;
