//! SQLite User Repository

use async_trait::async_trait;
use sqlx::FromRow;

use super::DbPool;
use crate::application::ports::{NewUser, RepositoryError, UserRecord, UserRepositoryPort};

/// SQLite User Repository
pub struct SqliteUserRepository {
    pool: DbPool,
}

impl SqliteUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct UserRow {
    user_id: i64,
    user_name: String,
    user_pass: String,
    user_email: String,
}

impl From<UserRow> for UserRecord {
    fn from(row: UserRow) -> Self {
        UserRecord {
            user_id: row.user_id,
            user_name: row.user_name,
            user_pass: row.user_pass,
            user_email: row.user_email,
        }
    }
}

#[async_trait]
impl UserRepositoryPort for SqliteUserRepository {
    async fn insert(&self, user: &NewUser) -> Result<UserRecord, RepositoryError> {
        // 单条原子插入；user_name / user_email 冲突由 UNIQUE 约束拒绝
        let row: UserRow = sqlx::query_as(
            r#"
            INSERT INTO userinfo (user_name, user_pass, user_email)
            VALUES (?, ?, ?)
            RETURNING user_id, user_name, user_pass, user_email
            "#,
        )
        .bind(&user.user_name)
        .bind(&user.user_pass)
        .bind(&user.user_email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if e.as_database_error()
                .is_some_and(|db| db.is_unique_violation())
            {
                RepositoryError::Duplicate(format!(
                    "user_name or user_email already taken: {}",
                    user.user_name
                ))
            } else {
                RepositoryError::DatabaseError(e.to_string())
            }
        })?;

        Ok(UserRecord::from(row))
    }

    async fn find_by_id(&self, user_id: i64) -> Result<Option<UserRecord>, RepositoryError> {
        let row: Option<UserRow> = sqlx::query_as(
            "SELECT user_id, user_name, user_pass, user_email FROM userinfo WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(row.map(UserRecord::from))
    }

    async fn find_by_name(&self, user_name: &str) -> Result<Option<UserRecord>, RepositoryError> {
        let row: Option<UserRow> = sqlx::query_as(
            "SELECT user_id, user_name, user_pass, user_email FROM userinfo WHERE user_name = ?",
        )
        .bind(user_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(row.map(UserRecord::from))
    }

    async fn update_password(
        &self,
        user_id: i64,
        user_pass: &str,
    ) -> Result<u64, RepositoryError> {
        let result = sqlx::query("UPDATE userinfo SET user_pass = ? WHERE user_id = ?")
            .bind(user_pass)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected())
    }

    async fn delete_cascading(&self, user_id: i64) -> Result<Vec<String>, RepositoryError> {
        // 使用事务确保原子性
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        // 先取出作品封面文件名，提交后由调用方清理磁盘
        let images: Vec<String> =
            sqlx::query_scalar("SELECT novel_img FROM novel WHERE user_id = ?")
                .bind(user_id)
                .fetch_all(&mut *tx)
                .await
                .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        // 删除会话
        sqlx::query("DELETE FROM session WHERE user_id = ?")
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        // 删除本人的收藏及他人对其作品的收藏
        sqlx::query(
            "DELETE FROM lastet_novel WHERE user_id = ? OR novel_id IN (SELECT novel_id FROM novel WHERE user_id = ?)",
        )
        .bind(user_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        // 删除本人的评论及他人对其作品的评论
        sqlx::query(
            "DELETE FROM comment WHERE user_id = ? OR novel_id IN (SELECT novel_id FROM novel WHERE user_id = ?)",
        )
        .bind(user_id)
        .bind(user_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        // 删除作品章节
        sqlx::query(
            "DELETE FROM chapter WHERE novel_id IN (SELECT novel_id FROM novel WHERE user_id = ?)",
        )
        .bind(user_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        // 删除作品
        sqlx::query("DELETE FROM novel WHERE user_id = ?")
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        // 删除用户行
        sqlx::query("DELETE FROM userinfo WHERE user_id = ?")
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(images)
    }
}
