//! SQLite Favorite Repository
//!
//! lastet_novel 表：(user_id, novel_id) 复合主键，添加幂等

use async_trait::async_trait;
use sqlx::FromRow;

use super::DbPool;
use crate::application::ports::{FavoriteRepositoryPort, NovelWithTypeRecord, RepositoryError};

/// SQLite Favorite Repository
pub struct SqliteFavoriteRepository {
    pool: DbPool,
}

impl SqliteFavoriteRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct FavoriteNovelRow {
    novel_id: i64,
    novel_name: String,
    novel_type_id: i64,
    novel_type_name: String,
    novel_img: String,
    novel_penname: String,
    user_id: i64,
}

impl From<FavoriteNovelRow> for NovelWithTypeRecord {
    fn from(row: FavoriteNovelRow) -> Self {
        NovelWithTypeRecord {
            novel_id: row.novel_id,
            novel_name: row.novel_name,
            novel_type_id: row.novel_type_id,
            novel_type_name: row.novel_type_name,
            novel_img: row.novel_img,
            novel_penname: row.novel_penname,
            user_id: row.user_id,
        }
    }
}

#[async_trait]
impl FavoriteRepositoryPort for SqliteFavoriteRepository {
    async fn exists(&self, user_id: i64, novel_id: i64) -> Result<bool, RepositoryError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM lastet_novel WHERE user_id = ? AND novel_id = ?)",
        )
        .bind(user_id)
        .bind(novel_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(exists)
    }

    async fn add(&self, user_id: i64, novel_id: i64) -> Result<(), RepositoryError> {
        // 已存在的配对视为成功，不产生第二行
        sqlx::query(
            r#"
            INSERT INTO lastet_novel (user_id, novel_id)
            VALUES (?, ?)
            ON CONFLICT(user_id, novel_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(novel_id)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn remove(&self, user_id: i64, novel_id: i64) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM lastet_novel WHERE user_id = ? AND novel_id = ?")
            .bind(user_id)
            .bind(novel_id)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected())
    }

    async fn find_novels_for_user(
        &self,
        user_id: i64,
    ) -> Result<Vec<NovelWithTypeRecord>, RepositoryError> {
        let rows: Vec<FavoriteNovelRow> = sqlx::query_as(
            r#"
            SELECT n.novel_id, n.novel_name, n.novel_type_id, t.novel_type_name,
                   n.novel_img, n.novel_penname, n.user_id
            FROM lastet_novel f
            JOIN novel n ON f.novel_id = n.novel_id
            JOIN noveltype t ON n.novel_type_id = t.novel_type_id
            WHERE f.user_id = ?
            ORDER BY n.novel_id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(NovelWithTypeRecord::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{NewNovel, NewUser, NovelRepositoryPort, UserRepositoryPort};
    use crate::infrastructure::persistence::sqlite::{
        create_pool, run_migrations, DatabaseConfig, SqliteNovelRepository, SqliteUserRepository,
    };

    async fn setup() -> (SqliteFavoriteRepository, i64, i64, DbPool) {
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

        let novel = SqliteNovelRepository::new(pool.clone())
            .insert(&NewNovel {
                novel_name: "Moonrise".to_string(),
                novel_type_id: 1,
                novel_img: "cover.png".to_string(),
                novel_penname: "pen".to_string(),
                user_id: user.user_id,
            })
            .await
            .unwrap();

        (
            SqliteFavoriteRepository::new(pool.clone()),
            user.user_id,
            novel.novel_id,
            pool,
        )
    }

    #[tokio::test]
    async fn test_add_twice_leaves_single_row() {
        let (repo, user_id, novel_id, pool) = setup().await;

        repo.add(user_id, novel_id).await.unwrap();
        repo.add(user_id, novel_id).await.unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM lastet_novel")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
        assert!(repo.exists(user_id, novel_id).await.unwrap());
    }

    #[tokio::test]
    async fn test_remove_reports_affected_rows() {
        let (repo, user_id, novel_id, _) = setup().await;

        repo.add(user_id, novel_id).await.unwrap();
        assert_eq!(repo.remove(user_id, novel_id).await.unwrap(), 1);
        assert_eq!(repo.remove(user_id, novel_id).await.unwrap(), 0);
        assert!(!repo.exists(user_id, novel_id).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_joins_type() {
        let (repo, user_id, novel_id, _) = setup().await;

        assert!(repo.find_novels_for_user(user_id).await.unwrap().is_empty());

        repo.add(user_id, novel_id).await.unwrap();
        let novels = repo.find_novels_for_user(user_id).await.unwrap();
        assert_eq!(novels.len(), 1);
        assert_eq!(novels[0].novel_id, novel_id);
        assert!(!novels[0].novel_type_name.is_empty());
    }
}
