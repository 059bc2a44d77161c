//! Novel Command Handlers

use std::sync::Arc;

use crate::application::commands::{SubmitChapter, SubmitNovel};
use crate::application::error::ApplicationError;
use crate::application::ports::{
    ChapterRecord, ImageStoragePort, NewChapter, NewNovel, NovelRecord, NovelRepositoryPort,
};
use crate::domain::novel::{ChapterDraft, NovelSubmission};

// ============================================================================
// SubmitNovel
// ============================================================================

/// 投稿响应
#[derive(Debug, Clone)]
pub struct SubmitNovelResponse {
    pub novel: NovelRecord,
    /// 封面的存储文件名
    pub novel_img: String,
}

/// SubmitNovel Handler
///
/// 封面先落盘再插入行；插入失败时回收已落盘文件
pub struct SubmitNovelHandler {
    novel_repo: Arc<dyn NovelRepositoryPort>,
    image_storage: Arc<dyn ImageStoragePort>,
}

impl SubmitNovelHandler {
    pub fn new(
        novel_repo: Arc<dyn NovelRepositoryPort>,
        image_storage: Arc<dyn ImageStoragePort>,
    ) -> Self {
        Self {
            novel_repo,
            image_storage,
        }
    }

    pub async fn handle(
        &self,
        command: SubmitNovel,
    ) -> Result<SubmitNovelResponse, ApplicationError> {
        let novel_type_id = command
            .novel_type_id
            .ok_or(ApplicationError::MissingField("novel_type_id"))?;

        let submission =
            NovelSubmission::new(command.novel_name, novel_type_id, command.novel_penname)?;

        let novel_img = self
            .image_storage
            .save(&command.image_name, &command.image_data)
            .await?;

        let inserted = self
            .novel_repo
            .insert(&NewNovel {
                novel_name: submission.novel_name().to_string(),
                novel_type_id: submission.novel_type_id(),
                novel_img: novel_img.clone(),
                novel_penname: submission.novel_penname().to_string(),
                user_id: command.user_id,
            })
            .await;

        let novel = match inserted {
            Ok(novel) => novel,
            Err(e) => {
                // 行未写入，不保留孤儿封面文件
                if let Err(cleanup) = self.image_storage.delete(&novel_img).await {
                    tracing::warn!(image = %novel_img, error = %cleanup, "Failed to clean up cover image");
                }
                return Err(e.into());
            }
        };

        tracing::info!(
            novel_id = novel.novel_id,
            novel_name = %novel.novel_name,
            user_id = novel.user_id,
            "Novel submitted"
        );

        Ok(SubmitNovelResponse { novel, novel_img })
    }
}

// ============================================================================
// SubmitChapter
// ============================================================================

/// 章节提交响应
#[derive(Debug, Clone)]
pub struct SubmitChapterResponse {
    pub chapter: ChapterRecord,
}

/// SubmitChapter Handler
///
/// 目标小说必须存在；(novel_id, chap_num) 不查重，重复编号按原样入库
pub struct SubmitChapterHandler {
    novel_repo: Arc<dyn NovelRepositoryPort>,
}

impl SubmitChapterHandler {
    pub fn new(novel_repo: Arc<dyn NovelRepositoryPort>) -> Self {
        Self { novel_repo }
    }

    pub async fn handle(
        &self,
        command: SubmitChapter,
    ) -> Result<SubmitChapterResponse, ApplicationError> {
        let draft = ChapterDraft::new(command.novel_id, command.chap_num, command.chap_write)?;

        if !self.novel_repo.exists(draft.novel_id()).await? {
            return Err(ApplicationError::not_found("Novel", draft.novel_id()));
        }

        let chapter = self
            .novel_repo
            .insert_chapter(&NewChapter {
                novel_id: draft.novel_id(),
                chap_num: draft.chap_num(),
                chap_write: draft.chap_write().to_string(),
            })
            .await?;

        tracing::info!(
            chapter_id = chapter.chapter_id,
            novel_id = chapter.novel_id,
            chap_num = chapter.chap_num,
            "Chapter submitted"
        );

        Ok(SubmitChapterResponse { chapter })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::adapters::FileImageStorage;
    use crate::application::ports::{NewUser, UserRepositoryPort};
    use crate::infrastructure::persistence::sqlite::{
        create_pool, run_migrations, DatabaseConfig, SqliteNovelRepository, SqliteUserRepository,
    };

    async fn setup() -> (Arc<SqliteNovelRepository>, i64) {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();

        let users = SqliteUserRepository::new(pool.clone());
        let owner = users
            .insert(&NewUser {
                user_name: "alice".to_string(),
                user_pass: "hash".to_string(),
                user_email: "a@x.com".to_string(),
            })
            .await
            .unwrap();

        (Arc::new(SqliteNovelRepository::new(pool)), owner.user_id)
    }

    #[tokio::test]
    async fn test_submit_novel_stores_image_and_row() {
        let (novel_repo, owner_id) = setup().await;
        let temp_dir = tempfile::tempdir().unwrap();
        let storage = Arc::new(FileImageStorage::new(temp_dir.path()).await.unwrap());
        let handler = SubmitNovelHandler::new(novel_repo, storage.clone());

        let response = handler
            .handle(SubmitNovel {
                novel_name: "Moonrise".to_string(),
                novel_type_id: Some(1),
                novel_penname: "pen".to_string(),
                image_name: "cover.png".to_string(),
                image_data: b"png bytes".to_vec(),
                user_id: owner_id,
            })
            .await
            .unwrap();

        assert!(response.novel_img.ends_with(".png"));
        assert!(storage.exists(&response.novel_img).await);
        assert_eq!(response.novel.novel_name, "Moonrise");
        assert_eq!(response.novel.user_id, owner_id);
    }

    #[tokio::test]
    async fn test_submit_novel_rejects_missing_type() {
        let (novel_repo, owner_id) = setup().await;
        let temp_dir = tempfile::tempdir().unwrap();
        let storage = Arc::new(FileImageStorage::new(temp_dir.path()).await.unwrap());
        let handler = SubmitNovelHandler::new(novel_repo, storage);

        let err = handler
            .handle(SubmitNovel {
                novel_name: "Moonrise".to_string(),
                novel_type_id: None,
                novel_penname: "pen".to_string(),
                image_name: "cover.png".to_string(),
                image_data: b"png bytes".to_vec(),
                user_id: owner_id,
            })
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::MissingField("novel_type_id")
        ));
    }

    #[tokio::test]
    async fn test_submit_chapter_requires_existing_novel() {
        let (novel_repo, _) = setup().await;
        let handler = SubmitChapterHandler::new(novel_repo);

        let err = handler
            .handle(SubmitChapter {
                novel_id: Some(999),
                chap_num: Some(1),
                chap_write: "text".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_submit_chapter_rejects_missing_fields() {
        let (novel_repo, _) = setup().await;
        let handler = SubmitChapterHandler::new(novel_repo);

        let err = handler
            .handle(SubmitChapter {
                novel_id: None,
                chap_num: Some(1),
                chap_write: String::new(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::MissingField("novel_id")));
    }

    #[tokio::test]
    async fn test_submit_chapter_accepts_duplicate_numbers() {
        let (novel_repo, owner_id) = setup().await;

        let novel = novel_repo
            .insert(&NewNovel {
                novel_name: "Moonrise".to_string(),
                novel_type_id: 1,
                novel_img: "1.png".to_string(),
                novel_penname: "pen".to_string(),
                user_id: owner_id,
            })
            .await
            .unwrap();

        let handler = SubmitChapterHandler::new(novel_repo.clone());
        for _ in 0..2 {
            handler
                .handle(SubmitChapter {
                    novel_id: Some(novel.novel_id),
                    chap_num: Some(1),
                    chap_write: "same number".to_string(),
                })
                .await
                .unwrap();
        }

        let chapters = novel_repo.find_chapters(novel.novel_id).await.unwrap();
        assert_eq!(chapters.len(), 2);
    }
}
