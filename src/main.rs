//! # AI Hub 主程序
//!
//! 加载配置、连接数据库并执行启动引导流程

use std::path::PathBuf;
use std::sync::Arc;

use ai_hub::{
    HubError, Result, StartupOrchestrator, StartupServices,
    config::load_config,
    database, lerror, linfo,
    logging::{self, LogComponent, LogStage},
    lwarn,
};
use clap::Parser;

/// 命令行参数
#[derive(Debug, Parser)]
#[command(name = "ai-hub", version, about = "AI Hub 启动引导")]
struct Cli {
    /// 配置文件路径
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 日志级别（trace/debug/info/warn/error）
    #[arg(long)]
    log_level: Option<String>,

    /// 跳过数据库迁移
    #[arg(long)]
    skip_migrations: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 初始化日志系统
    logging::init_optimized_logging(cli.log_level.as_deref());

    let config = Arc::new(load_config(cli.config.as_deref())?);

    let db = prepare_database(&config, cli.skip_migrations)
        .await
        .map_err(|e| HubError::Database {
            message: format!("数据初始化失败: {e}"),
            source: Some(e),
        })?;

    let services = StartupServices::from_database(Arc::new(db), &config);
    let report = StartupOrchestrator::new(Arc::clone(&config), services)
        .run_startup_sequence()
        .await;

    if report.is_complete() {
        linfo!(
            "system",
            LogStage::Shutdown,
            LogComponent::Main,
            "startup_finished",
            "✅ 启动流程完成"
        );
    } else {
        for failure in &report.errors {
            lwarn!(
                "system",
                LogStage::Shutdown,
                LogComponent::Main,
                "startup_incomplete",
                &format!("启动流程未全部完成: {failure}")
            );
        }
    }

    Ok(())
}

/// 连接数据库并按需执行迁移
async fn prepare_database(
    config: &ai_hub::AppConfig,
    skip_migrations: bool,
) -> anyhow::Result<sea_orm::DatabaseConnection> {
    let db = database::init_database(&config.database)
        .await
        .map_err(|e| anyhow::anyhow!("数据库连接失败: {e}"))?;

    if skip_migrations {
        linfo!(
            "system",
            LogStage::Startup,
            LogComponent::Database,
            "skip_migrations",
            "⏭️ 已跳过数据库迁移"
        );
        // 只报告待应用的迁移数量，不阻止启动
        database::check_database_status(&db)
            .await
            .map_err(|e| anyhow::anyhow!("检查迁移状态失败: {e}"))?;
        return Ok(db);
    }

    if let Err(e) = database::run_migrations(&db).await {
        lerror!(
            "system",
            LogStage::Startup,
            LogComponent::Database,
            "migration_failed",
            &format!("数据库迁移失败: {e}")
        );
        return Err(anyhow::anyhow!("数据库迁移失败: {e}"));
    }

    Ok(db)
}
