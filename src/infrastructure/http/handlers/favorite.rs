//! Favorite HTTP Handlers - 收藏关系

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::application::{AddFavorite, IsFavorite, ListFavorites, RemoveFavorite};
use crate::infrastructure::http::auth::CurrentUser;
use crate::infrastructure::http::dto::{ApiResponse, Empty};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::handlers::novel::NovelDto;
use crate::infrastructure::http::state::AppState;

// ============================================================================
// DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct IsFavoriteDto {
    pub is_favorite: bool,
}

#[derive(Debug, Deserialize)]
pub struct AddFavoriteRequest {
    pub novel_id: Option<i64>,
}

// ============================================================================
// Handlers
// ============================================================================

/// 收藏关系存在性探测
pub async fn is_favorite(
    State(state): State<Arc<AppState>>,
    current_user: CurrentUser,
    Path(novel_id): Path<i64>,
) -> Result<Json<ApiResponse<IsFavoriteDto>>, ApiError> {
    let result = state
        .is_favorite_handler
        .handle(IsFavorite {
            user_id: current_user.user_id(),
            novel_id,
        })
        .await?;

    Ok(Json(ApiResponse::success(IsFavoriteDto {
        is_favorite: result,
    })))
}

/// 添加收藏（幂等）
pub async fn add_favorite(
    State(state): State<Arc<AppState>>,
    current_user: CurrentUser,
    Json(req): Json<AddFavoriteRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Empty>>), ApiError> {
    let novel_id = req
        .novel_id
        .ok_or_else(|| ApiError::BadRequest("Missing required field: novel_id".to_string()))?;

    state
        .add_favorite_handler
        .handle(AddFavorite {
            user_id: current_user.user_id(),
            novel_id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok())))
}

/// 移除收藏；配对不存在返回 404
pub async fn remove_favorite(
    State(state): State<Arc<AppState>>,
    current_user: CurrentUser,
    Path(novel_id): Path<i64>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    state
        .remove_favorite_handler
        .handle(RemoveFavorite {
            user_id: current_user.user_id(),
            novel_id,
        })
        .await?;

    Ok(Json(ApiResponse::ok()))
}

/// 当前用户的收藏列表
pub async fn list_favorites(
    State(state): State<Arc<AppState>>,
    current_user: CurrentUser,
) -> Result<Json<ApiResponse<Vec<NovelDto>>>, ApiError> {
    let result = state
        .list_favorites_handler
        .handle(ListFavorites {
            user_id: current_user.user_id(),
        })
        .await?;

    Ok(Json(ApiResponse::success(
        result.into_iter().map(NovelDto::from).collect(),
    )))
}
