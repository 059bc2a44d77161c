//! Comment Command Handlers

use std::sync::Arc;

use crate::application::commands::PostComment;
use crate::application::error::ApplicationError;
use crate::application::ports::{
    CommentRecord, CommentRepositoryPort, NewComment, NovelRepositoryPort,
};
use crate::domain::novel::CommentDraft;

/// 评论响应
#[derive(Debug, Clone)]
pub struct CommentResponse {
    pub comment: CommentRecord,
}

/// PostComment Handler
///
/// 作者身份来自已解析的请求身份，目标小说必须存在
pub struct PostCommentHandler {
    novel_repo: Arc<dyn NovelRepositoryPort>,
    comment_repo: Arc<dyn CommentRepositoryPort>,
}

impl PostCommentHandler {
    pub fn new(
        novel_repo: Arc<dyn NovelRepositoryPort>,
        comment_repo: Arc<dyn CommentRepositoryPort>,
    ) -> Self {
        Self {
            novel_repo,
            comment_repo,
        }
    }

    pub async fn handle(&self, command: PostComment) -> Result<CommentResponse, ApplicationError> {
        let draft = CommentDraft::new(command.novel_id, command.com_text)?;

        if !self.novel_repo.exists(draft.novel_id()).await? {
            return Err(ApplicationError::not_found("Novel", draft.novel_id()));
        }

        let comment = self
            .comment_repo
            .insert(&NewComment {
                novel_id: draft.novel_id(),
                user_id: command.user_id,
                com_text: draft.com_text().to_string(),
            })
            .await?;

        tracing::info!(
            comment_id = comment.comment_id,
            novel_id = comment.novel_id,
            user_id = comment.user_id,
            "Comment posted"
        );

        Ok(CommentResponse { comment })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{NewNovel, NewUser, UserRepositoryPort};
    use crate::infrastructure::persistence::sqlite::{
        create_pool, run_migrations, DatabaseConfig, SqliteCommentRepository,
        SqliteNovelRepository, SqliteUserRepository,
    };

    #[tokio::test]
    async fn test_post_comment_records_author() {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();

        let users = SqliteUserRepository::new(pool.clone());
        let user = users
            .insert(&NewUser {
                user_name: "alice".to_string(),
                user_pass: "hash".to_string(),
                user_email: "a@x.com".to_string(),
            })
            .await
            .unwrap();

        let novels = SqliteNovelRepository::new(pool.clone());
        let novel = novels
            .insert(&NewNovel {
                novel_name: "Moonrise".to_string(),
                novel_type_id: 1,
                novel_img: "1.png".to_string(),
                novel_penname: "pen".to_string(),
                user_id: user.user_id,
            })
            .await
            .unwrap();

        let comment_repo = Arc::new(SqliteCommentRepository::new(pool));
        let handler = PostCommentHandler::new(Arc::new(novels), comment_repo.clone());

        let response = handler
            .handle(PostComment {
                novel_id: novel.novel_id,
                user_id: user.user_id,
                com_text: "great".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(response.comment.user_id, user.user_id);

        let listed = comment_repo
            .find_by_novel_with_author(novel.novel_id)
            .await
            .unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].user_name, "alice");
    }

    #[tokio::test]
    async fn test_post_comment_rejects_empty_text() {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();
        let handler = PostCommentHandler::new(
            Arc::new(SqliteNovelRepository::new(pool.clone())),
            Arc::new(SqliteCommentRepository::new(pool)),
        );

        let err = handler
            .handle(PostComment {
                novel_id: 1,
                user_id: 1,
                com_text: String::new(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::MissingField("com_text")));
    }
}
