//! HTTP Authentication - Bearer Token 身份解析
//!
//! 每个请求从 Authorization 头独立解析身份，
//! 进程内不存在任何跨请求共享的"当前用户"状态

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use chrono::Utc;
use std::sync::Arc;

use crate::application::ports::SessionRecord;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 已解析的请求身份
///
/// 包装会话行，供需要身份的 handler 以提取器形式声明
pub struct CurrentUser(SessionRecord);

impl CurrentUser {
    /// 会话绑定的用户 ID
    pub fn user_id(&self) -> i64 {
        self.0.user_id
    }

    /// 会话令牌
    pub fn token(&self) -> &str {
        &self.0.token
    }
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|x| x.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Missing authorization".to_string()))?;

        let parts: Vec<_> = header_value.split_ascii_whitespace().collect();

        if parts.first() != Some(&"Bearer") {
            return Err(ApiError::BadRequest(
                "Authorization must be Bearer".to_string(),
            ));
        }

        let token = parts.last().cloned().unwrap_or_default();

        let session = state
            .session_repo
            .find_valid(token, Utc::now())
            .await
            .map_err(ApiError::from)?
            .ok_or_else(|| ApiError::Unauthorized("Session does not exist".to_string()))?;

        Ok(Self(session))
    }
}
