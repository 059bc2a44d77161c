//! Repository Ports - 出站端口
//!
//! 定义数据持久化的抽象接口
//! 具体实现在 infrastructure 层（SQLite）

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Repository 错误
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Duplicate entity: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("IO error: {0}")]
    IoError(String),
}

// ============================================================================
// User Repository
// ============================================================================

/// 用户实体（用于持久化）
///
/// user_pass 为 argon2 PHC 哈希串，仅在认证路径上可见，
/// 绝不进入任何边界响应
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub user_id: i64,
    pub user_name: String,
    pub user_pass: String,
    pub user_email: String,
}

/// 新用户（密码已哈希）
#[derive(Debug, Clone)]
pub struct NewUser {
    pub user_name: String,
    pub user_pass: String,
    pub user_email: String,
}

/// User Repository Port
#[async_trait]
pub trait UserRepositoryPort: Send + Sync {
    /// 插入新用户
    ///
    /// 唯一性由 user_name / user_email 的 UNIQUE 约束保证，
    /// 约束冲突返回 `RepositoryError::Duplicate`（单条原子插入，无预查询）
    async fn insert(&self, user: &NewUser) -> Result<UserRecord, RepositoryError>;

    /// 根据 ID 查找用户
    async fn find_by_id(&self, user_id: i64) -> Result<Option<UserRecord>, RepositoryError>;

    /// 根据用户名查找用户
    async fn find_by_name(&self, user_name: &str) -> Result<Option<UserRecord>, RepositoryError>;

    /// 覆盖密码哈希，返回受影响行数
    async fn update_password(
        &self,
        user_id: i64,
        user_pass: &str,
    ) -> Result<u64, RepositoryError>;

    /// 级联删除用户
    ///
    /// 单事务内删除: 会话、收藏（本人的及他人对其作品的）、评论
    /// （本人的及他人对其作品的）、作品章节、作品、用户行。
    /// 返回被删除作品的封面文件名，供调用方清理磁盘文件
    async fn delete_cascading(&self, user_id: i64) -> Result<Vec<String>, RepositoryError>;
}

// ============================================================================
// Session Repository
// ============================================================================

/// 会话实体（用于持久化）
///
/// 每个请求独立携带 token 解析身份，进程内不保存任何"当前用户"状态
#[derive(Debug, Clone)]
pub struct SessionRecord {
    pub token: String,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Session Repository Port
#[async_trait]
pub trait SessionRepositoryPort: Send + Sync {
    /// 保存会话
    async fn create(&self, session: &SessionRecord) -> Result<(), RepositoryError>;

    /// 根据 token 查找未过期会话
    async fn find_valid(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<SessionRecord>, RepositoryError>;

    /// 删除会话（登出）
    async fn delete(&self, token: &str) -> Result<(), RepositoryError>;

    /// 清理过期会话，返回删除数
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, RepositoryError>;
}

// ============================================================================
// Novel Repository
// ============================================================================

/// 小说实体（用于持久化）
#[derive(Debug, Clone)]
pub struct NovelRecord {
    pub novel_id: i64,
    pub novel_name: String,
    pub novel_type_id: i64,
    pub novel_img: String,
    pub novel_penname: String,
    pub user_id: i64,
}

/// 新小说（封面已落盘，novel_img 为存储文件名）
#[derive(Debug, Clone)]
pub struct NewNovel {
    pub novel_name: String,
    pub novel_type_id: i64,
    pub novel_img: String,
    pub novel_penname: String,
    pub user_id: i64,
}

/// 小说联结类型名（列表查询结果）
#[derive(Debug, Clone)]
pub struct NovelWithTypeRecord {
    pub novel_id: i64,
    pub novel_name: String,
    pub novel_type_id: i64,
    pub novel_type_name: String,
    pub novel_img: String,
    pub novel_penname: String,
    pub user_id: i64,
}

/// 小说类型（只读参考数据）
#[derive(Debug, Clone)]
pub struct NovelTypeRecord {
    pub novel_type_id: i64,
    pub novel_type_name: String,
}

/// 章节实体（用于持久化）
#[derive(Debug, Clone)]
pub struct ChapterRecord {
    pub chapter_id: i64,
    pub novel_id: i64,
    pub chap_num: i64,
    pub chap_write: String,
}

/// 新章节
#[derive(Debug, Clone)]
pub struct NewChapter {
    pub novel_id: i64,
    pub chap_num: i64,
    pub chap_write: String,
}

/// Novel Repository Port
#[async_trait]
pub trait NovelRepositoryPort: Send + Sync {
    /// 插入小说
    async fn insert(&self, novel: &NewNovel) -> Result<NovelRecord, RepositoryError>;

    /// 小说是否存在
    async fn exists(&self, novel_id: i64) -> Result<bool, RepositoryError>;

    /// 根据 ID 查找小说
    async fn find_by_id(&self, novel_id: i64) -> Result<Option<NovelRecord>, RepositoryError>;

    /// 获取所有小说（联结类型，按 novel_id 升序）
    async fn find_all_with_type(&self) -> Result<Vec<NovelWithTypeRecord>, RepositoryError>;

    /// 获取指定作者的小说（联结类型）
    async fn find_by_owner(
        &self,
        user_id: i64,
    ) -> Result<Vec<NovelWithTypeRecord>, RepositoryError>;

    /// 获取全部小说类型
    async fn find_all_types(&self) -> Result<Vec<NovelTypeRecord>, RepositoryError>;

    /// 插入章节（不校验 (novel_id, chap_num) 唯一性）
    async fn insert_chapter(&self, chapter: &NewChapter) -> Result<ChapterRecord, RepositoryError>;

    /// 获取小说的所有章节，按 chap_num 升序
    async fn find_chapters(&self, novel_id: i64) -> Result<Vec<ChapterRecord>, RepositoryError>;
}

// ============================================================================
// Favorite Repository
// ============================================================================

/// Favorite Repository Port
///
/// (user_id, novel_id) 关系，除配对存在性外无独立生命周期
#[async_trait]
pub trait FavoriteRepositoryPort: Send + Sync {
    /// 收藏关系是否存在
    async fn exists(&self, user_id: i64, novel_id: i64) -> Result<bool, RepositoryError>;

    /// 添加收藏（幂等: 已存在的配对不报错）
    async fn add(&self, user_id: i64, novel_id: i64) -> Result<(), RepositoryError>;

    /// 移除收藏，返回受影响行数（0 表示配对不存在）
    async fn remove(&self, user_id: i64, novel_id: i64) -> Result<u64, RepositoryError>;

    /// 获取用户收藏的小说（联结类型）
    async fn find_novels_for_user(
        &self,
        user_id: i64,
    ) -> Result<Vec<NovelWithTypeRecord>, RepositoryError>;
}

// ============================================================================
// Comment Repository
// ============================================================================

/// 评论实体（用于持久化）
#[derive(Debug, Clone)]
pub struct CommentRecord {
    pub comment_id: i64,
    pub novel_id: i64,
    pub user_id: i64,
    pub com_text: String,
}

/// 新评论
#[derive(Debug, Clone)]
pub struct NewComment {
    pub novel_id: i64,
    pub user_id: i64,
    pub com_text: String,
}

/// 评论联结作者公开字段（列表查询结果）
#[derive(Debug, Clone)]
pub struct CommentWithAuthorRecord {
    pub comment_id: i64,
    pub novel_id: i64,
    pub user_id: i64,
    pub com_text: String,
    pub user_name: String,
}

/// Comment Repository Port
#[async_trait]
pub trait CommentRepositoryPort: Send + Sync {
    /// 插入评论
    async fn insert(&self, comment: &NewComment) -> Result<CommentRecord, RepositoryError>;

    /// 获取小说的评论（联结作者，按插入顺序）
    async fn find_by_novel_with_author(
        &self,
        novel_id: i64,
    ) -> Result<Vec<CommentWithAuthorRecord>, RepositoryError>;
}
