//! Comment Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{CommentRepositoryPort, CommentWithAuthorRecord};
use crate::application::queries::ListComments;

/// 评论联结作者响应
#[derive(Debug, Clone)]
pub struct CommentWithAuthorResponse {
    pub comment_id: i64,
    pub novel_id: i64,
    pub user_id: i64,
    pub com_text: String,
    pub user_name: String,
}

impl From<CommentWithAuthorRecord> for CommentWithAuthorResponse {
    fn from(record: CommentWithAuthorRecord) -> Self {
        Self {
            comment_id: record.comment_id,
            novel_id: record.novel_id,
            user_id: record.user_id,
            com_text: record.com_text,
            user_name: record.user_name,
        }
    }
}

/// ListComments Handler
pub struct ListCommentsHandler {
    comment_repo: Arc<dyn CommentRepositoryPort>,
}

impl ListCommentsHandler {
    pub fn new(comment_repo: Arc<dyn CommentRepositoryPort>) -> Self {
        Self { comment_repo }
    }

    pub async fn handle(
        &self,
        query: ListComments,
    ) -> Result<Vec<CommentWithAuthorResponse>, ApplicationError> {
        let comments = self
            .comment_repo
            .find_by_novel_with_author(query.novel_id)
            .await?;
        Ok(comments
            .into_iter()
            .map(CommentWithAuthorResponse::from)
            .collect())
    }
}
