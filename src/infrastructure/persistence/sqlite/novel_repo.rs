//! SQLite Novel Repository

use async_trait::async_trait;
use sqlx::FromRow;

use super::DbPool;
use crate::application::ports::{
    ChapterRecord, NewChapter, NewNovel, NovelRecord, NovelRepositoryPort, NovelTypeRecord,
    NovelWithTypeRecord, RepositoryError,
};

/// SQLite Novel Repository
pub struct SqliteNovelRepository {
    pool: DbPool,
}

impl SqliteNovelRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct NovelRow {
    novel_id: i64,
    novel_name: String,
    novel_type_id: i64,
    novel_img: String,
    novel_penname: String,
    user_id: i64,
}

impl From<NovelRow> for NovelRecord {
    fn from(row: NovelRow) -> Self {
        NovelRecord {
            novel_id: row.novel_id,
            novel_name: row.novel_name,
            novel_type_id: row.novel_type_id,
            novel_img: row.novel_img,
            novel_penname: row.novel_penname,
            user_id: row.user_id,
        }
    }
}

#[derive(FromRow)]
struct NovelWithTypeRow {
    novel_id: i64,
    novel_name: String,
    novel_type_id: i64,
    novel_type_name: String,
    novel_img: String,
    novel_penname: String,
    user_id: i64,
}

impl From<NovelWithTypeRow> for NovelWithTypeRecord {
    fn from(row: NovelWithTypeRow) -> Self {
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

#[derive(FromRow)]
struct NovelTypeRow {
    novel_type_id: i64,
    novel_type_name: String,
}

impl From<NovelTypeRow> for NovelTypeRecord {
    fn from(row: NovelTypeRow) -> Self {
        NovelTypeRecord {
            novel_type_id: row.novel_type_id,
            novel_type_name: row.novel_type_name,
        }
    }
}

#[derive(FromRow)]
struct ChapterRow {
    chapter_id: i64,
    novel_id: i64,
    chap_num: i64,
    chap_write: String,
}

impl From<ChapterRow> for ChapterRecord {
    fn from(row: ChapterRow) -> Self {
        ChapterRecord {
            chapter_id: row.chapter_id,
            novel_id: row.novel_id,
            chap_num: row.chap_num,
            chap_write: row.chap_write,
        }
    }
}

const NOVEL_WITH_TYPE_COLUMNS: &str = "n.novel_id, n.novel_name, n.novel_type_id, t.novel_type_name, n.novel_img, n.novel_penname, n.user_id";

#[async_trait]
impl NovelRepositoryPort for SqliteNovelRepository {
    async fn insert(&self, novel: &NewNovel) -> Result<NovelRecord, RepositoryError> {
        let row: NovelRow = sqlx::query_as(
            r#"
            INSERT INTO novel (novel_name, novel_type_id, novel_img, novel_penname, user_id)
            VALUES (?, ?, ?, ?, ?)
            RETURNING novel_id, novel_name, novel_type_id, novel_img, novel_penname, user_id
            "#,
        )
        .bind(&novel.novel_name)
        .bind(novel.novel_type_id)
        .bind(&novel.novel_img)
        .bind(&novel.novel_penname)
        .bind(novel.user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(NovelRecord::from(row))
    }

    async fn exists(&self, novel_id: i64) -> Result<bool, RepositoryError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM novel WHERE novel_id = ?)")
            .bind(novel_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(exists)
    }

    async fn find_by_id(&self, novel_id: i64) -> Result<Option<NovelRecord>, RepositoryError> {
        let row: Option<NovelRow> = sqlx::query_as(
            "SELECT novel_id, novel_name, novel_type_id, novel_img, novel_penname, user_id FROM novel WHERE novel_id = ?",
        )
        .bind(novel_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(row.map(NovelRecord::from))
    }

    async fn find_all_with_type(&self) -> Result<Vec<NovelWithTypeRecord>, RepositoryError> {
        let rows: Vec<NovelWithTypeRow> = sqlx::query_as(&format!(
            "SELECT {} FROM novel n JOIN noveltype t ON n.novel_type_id = t.novel_type_id ORDER BY n.novel_id ASC",
            NOVEL_WITH_TYPE_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(NovelWithTypeRecord::from).collect())
    }

    async fn find_by_owner(
        &self,
        user_id: i64,
    ) -> Result<Vec<NovelWithTypeRecord>, RepositoryError> {
        let rows: Vec<NovelWithTypeRow> = sqlx::query_as(&format!(
            "SELECT {} FROM novel n JOIN noveltype t ON n.novel_type_id = t.novel_type_id WHERE n.user_id = ? ORDER BY n.novel_id ASC",
            NOVEL_WITH_TYPE_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(NovelWithTypeRecord::from).collect())
    }

    async fn find_all_types(&self) -> Result<Vec<NovelTypeRecord>, RepositoryError> {
        let rows: Vec<NovelTypeRow> = sqlx::query_as(
            "SELECT novel_type_id, novel_type_name FROM noveltype ORDER BY novel_type_id ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(NovelTypeRecord::from).collect())
    }

    async fn insert_chapter(&self, chapter: &NewChapter) -> Result<ChapterRecord, RepositoryError> {
        let row: ChapterRow = sqlx::query_as(
            r#"
            INSERT INTO chapter (novel_id, chap_num, chap_write)
            VALUES (?, ?, ?)
            RETURNING chapter_id, novel_id, chap_num, chap_write
            "#,
        )
        .bind(chapter.novel_id)
        .bind(chapter.chap_num)
        .bind(&chapter.chap_write)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(ChapterRecord::from(row))
    }

    async fn find_chapters(&self, novel_id: i64) -> Result<Vec<ChapterRecord>, RepositoryError> {
        let rows: Vec<ChapterRow> = sqlx::query_as(
            "SELECT chapter_id, novel_id, chap_num, chap_write FROM chapter WHERE novel_id = ? ORDER BY chap_num ASC",
        )
        .bind(novel_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(ChapterRecord::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{NewUser, UserRepositoryPort};
    use crate::infrastructure::persistence::sqlite::{
        create_pool, run_migrations, DatabaseConfig, SqliteUserRepository,
    };

    async fn setup() -> (SqliteNovelRepository, i64) {
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

        (SqliteNovelRepository::new(pool), user.user_id)
    }

    fn new_novel(name: &str, user_id: i64) -> NewNovel {
        NewNovel {
            novel_name: name.to_string(),
            novel_type_id: 1,
            novel_img: "cover.png".to_string(),
            novel_penname: "pen".to_string(),
            user_id,
        }
    }

    #[tokio::test]
    async fn test_insert_and_list_ordered_by_id() {
        let (repo, user_id) = setup().await;
        repo.insert(&new_novel("First", user_id)).await.unwrap();
        repo.insert(&new_novel("Second", user_id)).await.unwrap();

        let all = repo.find_all_with_type().await.unwrap();
        assert_eq!(all.len(), 2);
        assert!(all[0].novel_id < all[1].novel_id);
        assert_eq!(all[0].novel_name, "First");
        // 联结出的类型名来自参考数据
        assert!(!all[0].novel_type_name.is_empty());
    }

    #[tokio::test]
    async fn test_find_by_owner_filters() {
        let (repo, user_id) = setup().await;
        repo.insert(&new_novel("Mine", user_id)).await.unwrap();

        let own = repo.find_by_owner(user_id).await.unwrap();
        assert_eq!(own.len(), 1);

        let none = repo.find_by_owner(user_id + 100).await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_chapters_ordered_by_number_regardless_of_insertion() {
        let (repo, user_id) = setup().await;
        let novel = repo.insert(&new_novel("Moonrise", user_id)).await.unwrap();

        for num in [3i64, 1, 2] {
            repo.insert_chapter(&NewChapter {
                novel_id: novel.novel_id,
                chap_num: num,
                chap_write: format!("chapter {}", num),
            })
            .await
            .unwrap();
        }

        let chapters = repo.find_chapters(novel.novel_id).await.unwrap();
        let nums: Vec<i64> = chapters.iter().map(|c| c.chap_num).collect();
        assert_eq!(nums, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_exists() {
        let (repo, user_id) = setup().await;
        let novel = repo.insert(&new_novel("Moonrise", user_id)).await.unwrap();

        assert!(repo.exists(novel.novel_id).await.unwrap());
        assert!(!repo.exists(novel.novel_id + 1).await.unwrap());
    }

    #[tokio::test]
    async fn test_find_all_types_returns_seeded_reference_data() {
        let (repo, _) = setup().await;
        let types = repo.find_all_types().await.unwrap();
        assert!(!types.is_empty());
        assert!(types.windows(2).all(|w| w[0].novel_type_id < w[1].novel_type_id));
    }
}
