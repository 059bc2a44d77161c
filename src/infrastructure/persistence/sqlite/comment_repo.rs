//! SQLite Comment Repository

use async_trait::async_trait;
use sqlx::FromRow;

use super::DbPool;
use crate::application::ports::{
    CommentRecord, CommentRepositoryPort, CommentWithAuthorRecord, NewComment, RepositoryError,
};

/// SQLite Comment Repository
pub struct SqliteCommentRepository {
    pool: DbPool,
}

impl SqliteCommentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct CommentRow {
    comment_id: i64,
    novel_id: i64,
    user_id: i64,
    com_text: String,
}

impl From<CommentRow> for CommentRecord {
    fn from(row: CommentRow) -> Self {
        CommentRecord {
            comment_id: row.comment_id,
            novel_id: row.novel_id,
            user_id: row.user_id,
            com_text: row.com_text,
        }
    }
}

#[derive(FromRow)]
struct CommentWithAuthorRow {
    comment_id: i64,
    novel_id: i64,
    user_id: i64,
    com_text: String,
    user_name: String,
}

impl From<CommentWithAuthorRow> for CommentWithAuthorRecord {
    fn from(row: CommentWithAuthorRow) -> Self {
        CommentWithAuthorRecord {
            comment_id: row.comment_id,
            novel_id: row.novel_id,
            user_id: row.user_id,
            com_text: row.com_text,
            user_name: row.user_name,
        }
    }
}

#[async_trait]
impl CommentRepositoryPort for SqliteCommentRepository {
    async fn insert(&self, comment: &NewComment) -> Result<CommentRecord, RepositoryError> {
        let row: CommentRow = sqlx::query_as(
            r#"
            INSERT INTO comment (novel_id, user_id, com_text)
            VALUES (?, ?, ?)
            RETURNING comment_id, novel_id, user_id, com_text
            "#,
        )
        .bind(comment.novel_id)
        .bind(comment.user_id)
        .bind(&comment.com_text)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(CommentRecord::from(row))
    }

    async fn find_by_novel_with_author(
        &self,
        novel_id: i64,
    ) -> Result<Vec<CommentWithAuthorRecord>, RepositoryError> {
        // comment_id 升序即插入顺序
        let rows: Vec<CommentWithAuthorRow> = sqlx::query_as(
            r#"
            SELECT c.comment_id, c.novel_id, c.user_id, c.com_text, u.user_name
            FROM comment c
            JOIN userinfo u ON c.user_id = u.user_id
            WHERE c.novel_id = ?
            ORDER BY c.comment_id ASC
            "#,
        )
        .bind(novel_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(CommentWithAuthorRecord::from).collect())
    }
}
