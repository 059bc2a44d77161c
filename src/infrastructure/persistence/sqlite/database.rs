//! SQLite Database - 数据库连接和迁移

use sqlx::{sqlite::SqlitePoolOptions, Pool, Sqlite};
use std::path::Path;

/// 数据库配置
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// 数据库文件路径
    pub database_url: String,
    /// 最大连接数
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite:./data/novelry.db?mode=rwc".to_string(),
            max_connections: 5,
        }
    }
}

impl DatabaseConfig {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            database_url: format!("sqlite:{}?mode=rwc", path.as_ref().display()),
            max_connections: 5,
        }
    }

    pub fn in_memory() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            max_connections: 1,
        }
    }
}

/// 数据库连接池
pub type DbPool = Pool<Sqlite>;

/// 创建数据库连接池
pub async fn create_pool(config: &DatabaseConfig) -> Result<DbPool, sqlx::Error> {
    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;

    // 启用 WAL 模式，允许并发读写
    sqlx::query("PRAGMA journal_mode=WAL")
        .execute(&pool)
        .await?;

    // 设置 busy_timeout=5000ms，遇到锁时等待而不是立即失败
    sqlx::query("PRAGMA busy_timeout=5000")
        .execute(&pool)
        .await?;

    // 设置同步模式为 NORMAL（平衡性能和安全性）
    sqlx::query("PRAGMA synchronous=NORMAL")
        .execute(&pool)
        .await?;

    // 启用外键约束，章节/收藏/评论的引用完整性依赖它
    sqlx::query("PRAGMA foreign_keys=ON")
        .execute(&pool)
        .await?;

    tracing::info!("SQLite pool created with WAL mode and busy_timeout=5000ms");

    Ok(pool)
}

/// 运行数据库迁移
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::Error> {
    // 创建 userinfo 表
    // user_name / user_email 的唯一性由约束保证，注册为单条原子插入
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS userinfo (
            user_id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_name TEXT NOT NULL UNIQUE,
            user_pass TEXT NOT NULL,
            user_email TEXT NOT NULL UNIQUE
        )
        "#,
    )
    .execute(pool)
    .await?;

    // 创建 noveltype 表（只读参考数据）
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS noveltype (
            novel_type_id INTEGER PRIMARY KEY AUTOINCREMENT,
            novel_type_name TEXT NOT NULL UNIQUE
        )
        "#,
    )
    .execute(pool)
    .await?;

    // 创建 novel 表
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS novel (
            novel_id INTEGER PRIMARY KEY AUTOINCREMENT,
            novel_name TEXT NOT NULL,
            novel_type_id INTEGER NOT NULL REFERENCES noveltype(novel_type_id),
            novel_img TEXT NOT NULL,
            novel_penname TEXT NOT NULL,
            user_id INTEGER NOT NULL REFERENCES userinfo(user_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    // 创建 chapter 表
    // (novel_id, chap_num) 不设唯一约束，重复章节号按原样接受
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS chapter (
            chapter_id INTEGER PRIMARY KEY AUTOINCREMENT,
            novel_id INTEGER NOT NULL REFERENCES novel(novel_id),
            chap_num INTEGER NOT NULL,
            chap_write TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // 创建 lastet_novel 表（收藏关系，复合主键保证配对唯一）
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS lastet_novel (
            user_id INTEGER NOT NULL REFERENCES userinfo(user_id),
            novel_id INTEGER NOT NULL REFERENCES novel(novel_id),
            PRIMARY KEY (user_id, novel_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    // 创建 comment 表
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS comment (
            comment_id INTEGER PRIMARY KEY AUTOINCREMENT,
            novel_id INTEGER NOT NULL REFERENCES novel(novel_id),
            user_id INTEGER NOT NULL REFERENCES userinfo(user_id),
            com_text TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // 创建 session 表（每请求身份解析的令牌存储）
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS session (
            token TEXT PRIMARY KEY,
            user_id INTEGER NOT NULL REFERENCES userinfo(user_id),
            created_at TEXT NOT NULL,
            expires_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // 创建索引
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_novel_user_id
        ON novel(user_id)
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_chapter_novel_id
        ON chapter(novel_id)
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_comment_novel_id
        ON comment(novel_id)
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_session_expires_at
        ON session(expires_at)
        "#,
    )
    .execute(pool)
    .await?;

    // 填充小说类型参考数据
    seed_novel_types(pool).await?;

    tracing::info!("Database migrations completed");
    Ok(())
}

/// 小说类型参考数据
const NOVEL_TYPES: &[&str] = &["Fantasy", "Romance", "Action", "Mystery", "Sci-Fi", "Horror"];

async fn seed_novel_types(pool: &DbPool) -> Result<(), sqlx::Error> {
    for type_name in NOVEL_TYPES {
        sqlx::query("INSERT OR IGNORE INTO noveltype (novel_type_name) VALUES (?)")
            .bind(type_name)
            .execute(pool)
            .await?;
    }
    Ok(())
}
