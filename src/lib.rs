//! # AI Hub Library
//!
//! AI Hub 服务启动引导核心库

pub mod ai_config;
pub mod auth;
pub mod bootstrap;
pub mod config;
pub mod database;
pub mod error;
pub mod logging;
pub mod testing;

// Re-export commonly used types
pub use bootstrap::{StartupOrchestrator, StartupReport, StartupServices};
pub use config::AppConfig;
pub use error::{HubError, Result};
