//! Novel HTTP Handlers - 小说列表/投稿/章节

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::application::{
    ListChapters, ListNovelTypes, ListNovels, ListOwnNovels, NovelWithTypeResponse, SubmitChapter,
    SubmitNovel,
};
use crate::infrastructure::http::auth::CurrentUser;
use crate::infrastructure::http::dto::ApiResponse;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

// ============================================================================
// DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct NovelDto {
    pub novel_id: i64,
    pub novel_name: String,
    pub novel_type_id: i64,
    pub novel_type_name: String,
    pub novel_img: String,
    pub novel_penname: String,
    pub user_id: i64,
}

impl From<NovelWithTypeResponse> for NovelDto {
    fn from(response: NovelWithTypeResponse) -> Self {
        Self {
            novel_id: response.novel_id,
            novel_name: response.novel_name,
            novel_type_id: response.novel_type_id,
            novel_type_name: response.novel_type_name,
            novel_img: response.novel_img,
            novel_penname: response.novel_penname,
            user_id: response.user_id,
        }
    }
}

/// 投稿响应：存储文件名 + 新行
#[derive(Debug, Serialize)]
pub struct SubmitNovelDto {
    pub novel_id: i64,
    pub novel_name: String,
    pub novel_img: String,
}

#[derive(Debug, Serialize)]
pub struct ChapterDto {
    pub chapter_id: i64,
    pub novel_id: i64,
    pub chap_num: i64,
    pub chap_write: String,
}

#[derive(Debug, Deserialize)]
pub struct SubmitChapterRequest {
    pub novel_id: Option<i64>,
    /// 章节编号，请求字段名沿用 novel_num
    pub novel_num: Option<i64>,
    #[serde(default)]
    pub chap_write: String,
}

#[derive(Debug, Serialize)]
pub struct NovelTypeDto {
    pub novel_type_id: i64,
    pub novel_type_name: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// 获取全部小说（联结类型，按 novel_id 升序）
pub async fn list_novels(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<NovelDto>>>, ApiError> {
    let result = state.list_novels_handler.handle(ListNovels).await?;

    Ok(Json(ApiResponse::success(
        result.into_iter().map(NovelDto::from).collect(),
    )))
}

/// 获取当前用户的小说
pub async fn list_own_novels(
    State(state): State<Arc<AppState>>,
    current_user: CurrentUser,
) -> Result<Json<ApiResponse<Vec<NovelDto>>>, ApiError> {
    let result = state
        .list_own_novels_handler
        .handle(ListOwnNovels {
            user_id: current_user.user_id(),
        })
        .await?;

    Ok(Json(ApiResponse::success(
        result.into_iter().map(NovelDto::from).collect(),
    )))
}

/// 投稿小说（multipart：novel_name, novel_type_id, novel_penname, novel_img 文件）
///
/// 身份在任何副作用之前解析；无文件返回 400，不落盘不入库
pub async fn submit_novel(
    State(state): State<Arc<AppState>>,
    current_user: CurrentUser,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<SubmitNovelDto>>, ApiError> {
    let mut novel_name = String::new();
    let mut novel_type_id: Option<i64> = None;
    let mut novel_penname = String::new();
    let mut image: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read multipart field: {}", e)))?
    {
        let field_name = field.name().unwrap_or_default().to_string();

        match field_name.as_str() {
            "novel_name" => {
                novel_name = field
                    .text()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read novel_name: {}", e)))?;
            }
            "novel_type_id" => {
                let text = field.text().await.map_err(|e| {
                    ApiError::BadRequest(format!("Failed to read novel_type_id: {}", e))
                })?;
                novel_type_id = Some(text.trim().parse::<i64>().map_err(|_| {
                    ApiError::BadRequest(format!("Invalid novel_type_id: {}", text))
                })?);
            }
            "novel_penname" => {
                novel_penname = field.text().await.map_err(|e| {
                    ApiError::BadRequest(format!("Failed to read novel_penname: {}", e))
                })?;
            }
            "novel_img" => {
                let file_name = field.file_name().unwrap_or("cover").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read file: {}", e)))?;
                image = Some((file_name, bytes.to_vec()));
            }
            _ => {}
        }
    }

    let (image_name, image_data) =
        image.ok_or_else(|| ApiError::BadRequest("No file uploaded".to_string()))?;

    let command = SubmitNovel {
        novel_name,
        novel_type_id,
        novel_penname,
        image_name,
        image_data,
        user_id: current_user.user_id(),
    };

    let result = state.submit_novel_handler.handle(command).await?;

    Ok(Json(ApiResponse::success(SubmitNovelDto {
        novel_id: result.novel.novel_id,
        novel_name: result.novel.novel_name,
        novel_img: result.novel_img,
    })))
}

/// 提交章节
pub async fn submit_chapter(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SubmitChapterRequest>,
) -> Result<Json<ApiResponse<ChapterDto>>, ApiError> {
    let command = SubmitChapter {
        novel_id: req.novel_id,
        chap_num: req.novel_num,
        chap_write: req.chap_write,
    };

    let result = state.submit_chapter_handler.handle(command).await?;

    Ok(Json(ApiResponse::success(ChapterDto {
        chapter_id: result.chapter.chapter_id,
        novel_id: result.chapter.novel_id,
        chap_num: result.chapter.chap_num,
        chap_write: result.chapter.chap_write,
    })))
}

/// 获取小说章节（按 chap_num 升序）
pub async fn list_chapters(
    State(state): State<Arc<AppState>>,
    Path(novel_id): Path<i64>,
) -> Result<Json<ApiResponse<Vec<ChapterDto>>>, ApiError> {
    let result = state
        .list_chapters_handler
        .handle(ListChapters { novel_id })
        .await?;

    Ok(Json(ApiResponse::success(
        result
            .into_iter()
            .map(|c| ChapterDto {
                chapter_id: c.chapter_id,
                novel_id: c.novel_id,
                chap_num: c.chap_num,
                chap_write: c.chap_write,
            })
            .collect(),
    )))
}

/// 获取小说类型参考数据
pub async fn list_novel_types(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<NovelTypeDto>>>, ApiError> {
    let result = state
        .list_novel_types_handler
        .handle(ListNovelTypes)
        .await?;

    Ok(Json(ApiResponse::success(
        result
            .into_iter()
            .map(|t| NovelTypeDto {
                novel_type_id: t.novel_type_id,
                novel_type_name: t.novel_type_name,
            })
            .collect(),
    )))
}
