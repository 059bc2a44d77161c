//! SQLite Session Repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use super::DbPool;
use crate::application::ports::{RepositoryError, SessionRecord, SessionRepositoryPort};

/// SQLite Session Repository
pub struct SqliteSessionRepository {
    pool: DbPool,
}

impl SqliteSessionRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct SessionRow {
    token: String,
    user_id: i64,
    created_at: String,
    expires_at: String,
}

impl TryFrom<SessionRow> for SessionRecord {
    type Error = RepositoryError;

    fn try_from(row: SessionRow) -> Result<Self, Self::Error> {
        Ok(SessionRecord {
            token: row.token,
            user_id: row.user_id,
            created_at: DateTime::parse_from_rfc3339(&row.created_at)
                .map_err(|e| RepositoryError::SerializationError(e.to_string()))?
                .with_timezone(&Utc),
            expires_at: DateTime::parse_from_rfc3339(&row.expires_at)
                .map_err(|e| RepositoryError::SerializationError(e.to_string()))?
                .with_timezone(&Utc),
        })
    }
}

#[async_trait]
impl SessionRepositoryPort for SqliteSessionRepository {
    async fn create(&self, session: &SessionRecord) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO session (token, user_id, created_at, expires_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&session.token)
        .bind(session.user_id)
        .bind(session.created_at.to_rfc3339())
        .bind(session.expires_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_valid(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<SessionRecord>, RepositoryError> {
        // 所有时间戳均为 Utc RFC3339 文本，字典序比较与时间序一致
        let row: Option<SessionRow> = sqlx::query_as(
            "SELECT token, user_id, created_at, expires_at FROM session WHERE token = ? AND expires_at > ?",
        )
        .bind(token)
        .bind(now.to_rfc3339())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        row.map(SessionRecord::try_from).transpose()
    }

    async fn delete(&self, token: &str) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM session WHERE token = ?")
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM session WHERE expires_at <= ?")
            .bind(now.to_rfc3339())
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{NewUser, UserRepositoryPort};
    use crate::infrastructure::persistence::sqlite::{
        create_pool, run_migrations, DatabaseConfig, SqliteUserRepository,
    };
    use chrono::Duration;

    async fn setup() -> (SqliteSessionRepository, i64) {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();

        let user = SqliteUserRepository::new(pool.clone())
            .insert(&NewUser {
                user_name: "alice".to_string(),
                user_pass: "hash".to_string(),
                user_email: "a@x.com".to_string(),
            })
            .await
            .unwrap();

        (SqliteSessionRepository::new(pool), user.user_id)
    }

    fn session(user_id: i64, token: &str, ttl: Duration) -> SessionRecord {
        let now = Utc::now();
        SessionRecord {
            token: token.to_string(),
            user_id,
            created_at: now,
            expires_at: now + ttl,
        }
    }

    #[tokio::test]
    async fn test_create_and_find_valid() {
        let (repo, user_id) = setup().await;
        repo.create(&session(user_id, "tok-1", Duration::hours(1)))
            .await
            .unwrap();

        let found = repo.find_valid("tok-1", Utc::now()).await.unwrap().unwrap();
        assert_eq!(found.user_id, user_id);

        assert!(repo.find_valid("unknown", Utc::now()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_expired_session_is_invisible() {
        let (repo, user_id) = setup().await;
        repo.create(&session(user_id, "tok-old", Duration::hours(-1)))
            .await
            .unwrap();

        assert!(repo
            .find_valid("tok-old", Utc::now())
            .await
            .unwrap()
            .is_none());

        let removed = repo.delete_expired(Utc::now()).await.unwrap();
        assert_eq!(removed, 1);
    }

    #[tokio::test]
    async fn test_delete_removes_session() {
        let (repo, user_id) = setup().await;
        repo.create(&session(user_id, "tok-1", Duration::hours(1)))
            .await
            .unwrap();

        repo.delete("tok-1").await.unwrap();
        assert!(repo.find_valid("tok-1", Utc::now()).await.unwrap().is_none());
    }
}
