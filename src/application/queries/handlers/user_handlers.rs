//! User Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{UserRecord, UserRepositoryPort};
use crate::application::queries::GetUserProfile;

/// 当前用户公开信息响应
///
/// 仅暴露 {name, email}，哈希等敏感字段不出边界
#[derive(Debug, Clone)]
pub struct UserProfileResponse {
    pub user_name: String,
    pub user_email: String,
}

impl From<UserRecord> for UserProfileResponse {
    fn from(record: UserRecord) -> Self {
        Self {
            user_name: record.user_name,
            user_email: record.user_email,
        }
    }
}

/// GetUserProfile Handler
pub struct GetUserProfileHandler {
    user_repo: Arc<dyn UserRepositoryPort>,
}

impl GetUserProfileHandler {
    pub fn new(user_repo: Arc<dyn UserRepositoryPort>) -> Self {
        Self { user_repo }
    }

    pub async fn handle(
        &self,
        query: GetUserProfile,
    ) -> Result<UserProfileResponse, ApplicationError> {
        let user = self
            .user_repo
            .find_by_id(query.user_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("User", query.user_id))?;

        Ok(UserProfileResponse::from(user))
    }
}
