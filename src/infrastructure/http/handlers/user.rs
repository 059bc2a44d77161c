//! User HTTP Handlers - 注册/登录/登出/改密/注销

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::application::{
    ChangePassword, DeleteAccount, GetUserProfile, Login, Logout, RegisterUser,
};
use crate::infrastructure::http::auth::CurrentUser;
use crate::infrastructure::http::dto::{ApiResponse, Empty};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

// ============================================================================
// DTOs
// ============================================================================

/// 用户公开字段；密码哈希不在其中
#[derive(Debug, Serialize)]
pub struct UserDto {
    pub user_id: i64,
    pub user_name: String,
    pub user_email: String,
}

// 字段缺省为空串，由领域校验统一映射为 MissingField
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub user_pass: String,
    #[serde(default)]
    pub user_email: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub user_pass: String,
}

#[derive(Debug, Serialize)]
pub struct LoginDto {
    pub token: String,
    pub user: UserDto,
}

#[derive(Debug, Serialize)]
pub struct UserProfileDto {
    pub user_name: String,
    pub user_email: String,
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    #[serde(default)]
    pub user_pass: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteAccountRequest {
    /// 显式确认参数；false 返回 400 而非静默跳过
    #[serde(default)]
    pub confirm: bool,
}

// ============================================================================
// Handlers
// ============================================================================

/// 注册用户
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserDto>>), ApiError> {
    let command = RegisterUser {
        user_name: req.user_name,
        user_pass: req.user_pass,
        user_email: req.user_email,
    };

    let result = state.register_user_handler.handle(command).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(UserDto {
            user_id: result.user_id,
            user_name: result.user_name,
            user_email: result.user_email,
        })),
    ))
}

/// 登录，返回会话令牌
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginDto>>, ApiError> {
    let command = Login {
        user_name: req.user_name,
        user_pass: req.user_pass,
    };

    let result = state.login_handler.handle(command).await?;

    Ok(Json(ApiResponse::success(LoginDto {
        token: result.token,
        user: UserDto {
            user_id: result.user.user_id,
            user_name: result.user.user_name,
            user_email: result.user.user_email,
        },
    })))
}

/// 登出，删除会话行
pub async fn logout(
    State(state): State<Arc<AppState>>,
    current_user: CurrentUser,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    state
        .logout_handler
        .handle(Logout {
            token: current_user.token().to_string(),
        })
        .await?;

    Ok(Json(ApiResponse::ok()))
}

/// 当前用户公开信息
pub async fn current_user(
    State(state): State<Arc<AppState>>,
    current_user: CurrentUser,
) -> Result<Json<ApiResponse<UserProfileDto>>, ApiError> {
    let result = state
        .get_user_profile_handler
        .handle(GetUserProfile {
            user_id: current_user.user_id(),
        })
        .await?;

    Ok(Json(ApiResponse::success(UserProfileDto {
        user_name: result.user_name,
        user_email: result.user_email,
    })))
}

/// 修改密码
pub async fn change_password(
    State(state): State<Arc<AppState>>,
    current_user: CurrentUser,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    state
        .change_password_handler
        .handle(ChangePassword {
            user_id: current_user.user_id(),
            user_pass: req.user_pass,
        })
        .await?;

    Ok(Json(ApiResponse::ok()))
}

/// 注销账号（级联删除）
pub async fn delete_account(
    State(state): State<Arc<AppState>>,
    current_user: CurrentUser,
    Json(req): Json<DeleteAccountRequest>,
) -> Result<Json<ApiResponse<Empty>>, ApiError> {
    state
        .delete_account_handler
        .handle(DeleteAccount {
            user_id: current_user.user_id(),
            confirm: req.confirm,
        })
        .await?;

    Ok(Json(ApiResponse::ok()))
}
