//! Novelry - 网络小说发布平台后端
//!
//! 架构:
//! - Domain: user/, novel/ (Bounded Contexts)
//! - Application: commands, queries, ports
//! - Infrastructure: http, persistence, adapters

use std::sync::Arc;

use novelry::config::{load_config, print_config};
use novelry::infrastructure::adapters::{Argon2PasswordHasher, FileImageStorage};
use novelry::infrastructure::http::{AppState, HttpServer, ServerConfig};
use novelry::infrastructure::persistence::sqlite::{
    create_pool, run_migrations, DatabaseConfig, SqliteCommentRepository,
    SqliteFavoriteRepository, SqliteNovelRepository, SqliteSessionRepository,
    SqliteUserRepository,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!(
        "{},novelry={},tower_http=debug",
        config.log.level, config.log.level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        )
        .init();

    tracing::info!("Novelry - 网络小说发布平台后端");
    print_config(&config);

    // 确保数据目录存在
    tokio::fs::create_dir_all(&config.storage.uploads_dir).await?;
    if let Some(parent) = std::path::Path::new(&config.database.path).parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    // 初始化数据库
    let db_config = DatabaseConfig {
        database_url: config.database.database_url(),
        max_connections: config.database.max_connections,
    };
    let pool = create_pool(&db_config).await?;
    run_migrations(&pool).await?;

    // 创建 Repository 适配器
    let user_repo = Arc::new(SqliteUserRepository::new(pool.clone()));
    let session_repo = Arc::new(SqliteSessionRepository::new(pool.clone()));
    let novel_repo = Arc::new(SqliteNovelRepository::new(pool.clone()));
    let favorite_repo = Arc::new(SqliteFavoriteRepository::new(pool.clone()));
    let comment_repo = Arc::new(SqliteCommentRepository::new(pool.clone()));

    // 创建密码哈希与封面存储适配器
    let hasher = Arc::new(Argon2PasswordHasher::new());
    let image_storage = Arc::new(FileImageStorage::new(&config.storage.uploads_dir).await?);

    // 创建 HTTP 服务器
    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        uploads_dir: config.storage.uploads_dir.clone(),
        max_upload_size: config.storage.max_upload_size,
    };

    let state = AppState::new(
        user_repo,
        session_repo,
        novel_repo,
        favorite_repo,
        comment_repo,
        hasher,
        image_storage,
        config.auth.session_ttl_secs,
    );

    let server = HttpServer::new(server_config, state);

    tracing::info!("Starting HTTP server...");

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to listen for ctrl-c");
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
