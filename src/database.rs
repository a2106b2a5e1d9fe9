//! # 数据库模块
//!
//! 数据库连接、迁移以及启动诊断用的统计查询

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbBackend, DbErr, Statement};
use sea_orm_migration::MigratorTrait;

use crate::config::DatabaseConfig;
use crate::database_error;
use crate::error::{Context, HubError, Result};
use crate::{ldebug, lerror, linfo, lwarn, logging::{LogComponent, LogStage}};

/// 初始化数据库连接
pub async fn init_database(config: &DatabaseConfig) -> Result<DatabaseConnection> {
    linfo!(
        "system",
        LogStage::Startup,
        LogComponent::Database,
        "db_connecting",
        &format!("正在连接数据库: {}", redact_url(&config.url))
    );

    config.ensure_database_path()?;

    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(if config.is_memory_database() {
            1
        } else {
            config.max_connections
        })
        .connect_timeout(Duration::from_secs(config.connect_timeout))
        .sqlx_logging(false);
    if config.is_memory_database() {
        // 内存库随连接释放而丢失
        options.min_connections(1);
    }

    let db = Database::connect(options).await.map_err(|e| {
        HubError::database_with_source(format!("数据库连接失败: {e}"), e)
    })?;

    linfo!(
        "system",
        LogStage::Startup,
        LogComponent::Database,
        "db_connected",
        "数据库连接成功"
    );
    Ok(db)
}

/// 运行数据库迁移
pub async fn run_migrations(db: &DatabaseConnection) -> std::result::Result<(), DbErr> {
    linfo!(
        "system",
        LogStage::Startup,
        LogComponent::Database,
        "run_migrations",
        "📋 执行数据库迁移..."
    );

    match ::migration::Migrator::up(db, None).await {
        Ok(()) => {
            linfo!(
                "system",
                LogStage::Startup,
                LogComponent::Database,
                "migrations_done",
                "数据库迁移完成"
            );
            Ok(())
        }
        Err(e) => {
            lerror!(
                "system",
                LogStage::Startup,
                LogComponent::Database,
                "migrations_failed",
                &format!("数据库迁移失败: {e}")
            );
            Err(e)
        }
    }
}

/// 检查待应用的迁移
pub async fn check_database_status(db: &DatabaseConnection) -> std::result::Result<usize, DbErr> {
    let pending = ::migration::Migrator::get_pending_migrations(db).await?;

    if pending.is_empty() {
        ldebug!("system", LogStage::Db, LogComponent::Database, "migrations_applied", "所有迁移都已应用");
    } else {
        lwarn!(
            "system",
            LogStage::Db,
            LogComponent::Database,
            "migrations_pending",
            &format!("有 {} 个待应用的迁移", pending.len())
        );
    }

    Ok(pending.len())
}

/// 隐藏连接串中的密码
fn redact_url(raw: &str) -> String {
    match url::Url::parse(raw) {
        Ok(mut parsed) if parsed.password().is_some() => {
            if parsed.set_password(Some("***")).is_ok() {
                parsed.to_string()
            } else {
                raw.to_string()
            }
        }
        _ => raw.to_string(),
    }
}

/// 数据库统计服务
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait DatabaseStats: Send + Sync {
    /// 应用定义的数据表数量（不含系统表和迁移记录表）
    async fn get_user_table_count(&self) -> Result<u64>;
}

/// 基于 Sea-ORM 连接的统计实现
#[derive(Clone)]
pub struct SeaOrmDatabaseStats {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmDatabaseStats {
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn table_count_sql(backend: DbBackend) -> Result<&'static str> {
        match backend {
            DbBackend::Sqlite => Ok("SELECT COUNT(*) AS count FROM sqlite_master \
                 WHERE type = 'table' AND name NOT LIKE 'sqlite_%' AND name <> 'seaql_migrations'"),
            DbBackend::Postgres => Ok("SELECT COUNT(*) AS count FROM information_schema.tables \
                 WHERE table_schema = 'public' AND table_type = 'BASE TABLE' \
                 AND table_name <> 'seaql_migrations'"),
            other => Err(database_error!("不支持的数据库后端: {:?}", other)),
        }
    }
}

#[async_trait]
impl DatabaseStats for SeaOrmDatabaseStats {
    async fn get_user_table_count(&self) -> Result<u64> {
        let backend = self.db.get_database_backend();
        let statement = Statement::from_string(backend, Self::table_count_sql(backend)?);

        let row = self
            .db
            .query_one(statement)
            .await
            .context("统计数据表数量")?
            .ok_or_else(|| database_error!("统计数据表数量时没有返回结果"))?;
        let count: i64 = row.try_get("", "count")?;

        u64::try_from(count)
            .map_err(|e| HubError::database_with_source(format!("无效的数据表数量: {count}"), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::create_test_db;

    #[tokio::test]
    async fn test_table_count_excludes_system_tables() {
        let db = create_test_db().await.unwrap();
        let stats = SeaOrmDatabaseStats::new(Arc::new(db));

        // ai_model_configs + system_settings
        assert_eq!(stats.get_user_table_count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_table_count_on_empty_database() {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        let stats = SeaOrmDatabaseStats::new(Arc::new(db));

        assert_eq!(stats.get_user_table_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_init_database_in_memory_and_migrate() {
        let config = DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            ..Default::default()
        };
        let db = init_database(&config).await.unwrap();
        run_migrations(&db).await.unwrap();

        assert_eq!(check_database_status(&db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_init_database_creates_sqlite_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("hub.db");
        let config = DatabaseConfig {
            url: format!("sqlite://{}", path.display()),
            ..Default::default()
        };

        let db = init_database(&config).await.unwrap();
        run_migrations(&db).await.unwrap();

        assert!(path.exists());
    }

    #[test]
    fn test_table_count_sql_only_for_supported_backends() {
        assert!(SeaOrmDatabaseStats::table_count_sql(DbBackend::Sqlite).is_ok());
        assert!(SeaOrmDatabaseStats::table_count_sql(DbBackend::Postgres).is_ok());

        let err = SeaOrmDatabaseStats::table_count_sql(DbBackend::MySql).unwrap_err();
        assert!(matches!(err, HubError::Database { .. }));
    }

    #[tokio::test]
    async fn test_table_count_failure_carries_context() {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.close_by_ref().await.unwrap();
        let stats = SeaOrmDatabaseStats::new(Arc::new(db));

        let err = stats.get_user_table_count().await.unwrap_err();
        assert!(err.to_string().starts_with("统计数据表数量: "));
        assert_eq!(err.code(), "DATABASE_ERROR");
    }

    #[test]
    fn test_redact_url() {
        assert_eq!(
            redact_url("postgres://app:secret@db:5432/ai_hub"),
            "postgres://app:***@db:5432/ai_hub"
        );
        assert_eq!(redact_url("sqlite::memory:"), "sqlite::memory:");
    }
}
