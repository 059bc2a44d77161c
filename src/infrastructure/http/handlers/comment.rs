//! Comment HTTP Handlers - 评论

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::application::{ListComments, PostComment};
use crate::infrastructure::http::auth::CurrentUser;
use crate::infrastructure::http::dto::ApiResponse;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

// ============================================================================
// DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct CommentDto {
    pub comment_id: i64,
    pub novel_id: i64,
    pub user_id: i64,
    pub com_text: String,
}

/// 评论联结作者公开字段
#[derive(Debug, Serialize)]
pub struct CommentWithAuthorDto {
    pub comment_id: i64,
    pub novel_id: i64,
    pub user_id: i64,
    pub com_text: String,
    pub user_name: String,
}

#[derive(Debug, Deserialize)]
pub struct PostCommentRequest {
    pub novel_id: Option<i64>,
    #[serde(default)]
    pub com_text: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// 获取小说评论（联结作者，插入顺序）
pub async fn list_comments(
    State(state): State<Arc<AppState>>,
    Path(novel_id): Path<i64>,
) -> Result<Json<ApiResponse<Vec<CommentWithAuthorDto>>>, ApiError> {
    let result = state
        .list_comments_handler
        .handle(ListComments { novel_id })
        .await?;

    Ok(Json(ApiResponse::success(
        result
            .into_iter()
            .map(|c| CommentWithAuthorDto {
                comment_id: c.comment_id,
                novel_id: c.novel_id,
                user_id: c.user_id,
                com_text: c.com_text,
                user_name: c.user_name,
            })
            .collect(),
    )))
}

/// 发表评论；作者身份来自请求身份
pub async fn post_comment(
    State(state): State<Arc<AppState>>,
    current_user: CurrentUser,
    Json(req): Json<PostCommentRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CommentDto>>), ApiError> {
    let novel_id = req
        .novel_id
        .ok_or_else(|| ApiError::BadRequest("Missing required field: novel_id".to_string()))?;

    let result = state
        .post_comment_handler
        .handle(PostComment {
            novel_id,
            user_id: current_user.user_id(),
            com_text: req.com_text,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(CommentDto {
            comment_id: result.comment.comment_id,
            novel_id: result.comment.novel_id,
            user_id: result.comment.user_id,
            com_text: result.comment.com_text,
        })),
    ))
}
