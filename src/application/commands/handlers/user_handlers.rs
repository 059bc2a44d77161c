//! User Command Handlers
//!
//! 注册/登录/登出/改密/注销。会话为数据库中的随机令牌行，
//! 身份逐请求解析，进程内不保存"当前用户"

use chrono::{Duration, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::commands::{ChangePassword, DeleteAccount, Login, Logout, RegisterUser};
use crate::application::error::ApplicationError;
use crate::application::ports::{
    ImageStoragePort, NewUser, PasswordHasherPort, SessionRecord, SessionRepositoryPort,
    UserRecord, UserRepositoryPort,
};
use crate::domain::user::{Credentials, NewPassword, Registration};

// ============================================================================
// Response DTOs
// ============================================================================

/// 用户公开字段响应
///
/// 密码哈希永不进入该结构
#[derive(Debug, Clone)]
pub struct UserResponse {
    pub user_id: i64,
    pub user_name: String,
    pub user_email: String,
}

impl From<UserRecord> for UserResponse {
    fn from(record: UserRecord) -> Self {
        Self {
            user_id: record.user_id,
            user_name: record.user_name,
            user_email: record.user_email,
        }
    }
}

/// 登录响应
#[derive(Debug, Clone)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserResponse,
}

// ============================================================================
// RegisterUser
// ============================================================================

/// RegisterUser Handler
///
/// 单条原子插入，依赖 UNIQUE 约束拒绝重名/重邮箱
pub struct RegisterUserHandler {
    user_repo: Arc<dyn UserRepositoryPort>,
    hasher: Arc<dyn PasswordHasherPort>,
}

impl RegisterUserHandler {
    pub fn new(user_repo: Arc<dyn UserRepositoryPort>, hasher: Arc<dyn PasswordHasherPort>) -> Self {
        Self { user_repo, hasher }
    }

    pub async fn handle(&self, command: RegisterUser) -> Result<UserResponse, ApplicationError> {
        let registration =
            Registration::new(command.user_name, command.user_pass, command.user_email)?;

        let user_pass = self.hasher.hash(registration.user_pass())?;

        let user = self
            .user_repo
            .insert(&NewUser {
                user_name: registration.user_name().to_string(),
                user_pass,
                user_email: registration.user_email().to_string(),
            })
            .await?;

        tracing::info!(
            user_id = user.user_id,
            user_name = %user.user_name,
            "User registered"
        );

        Ok(UserResponse::from(user))
    }
}

// ============================================================================
// Login
// ============================================================================

/// Login Handler
///
/// 认证通过后写入一条会话行并返回令牌；
/// 顺带清理已过期会话
pub struct LoginHandler {
    user_repo: Arc<dyn UserRepositoryPort>,
    session_repo: Arc<dyn SessionRepositoryPort>,
    hasher: Arc<dyn PasswordHasherPort>,
    session_ttl_secs: u64,
}

impl LoginHandler {
    pub fn new(
        user_repo: Arc<dyn UserRepositoryPort>,
        session_repo: Arc<dyn SessionRepositoryPort>,
        hasher: Arc<dyn PasswordHasherPort>,
        session_ttl_secs: u64,
    ) -> Self {
        Self {
            user_repo,
            session_repo,
            hasher,
            session_ttl_secs,
        }
    }

    pub async fn handle(&self, command: Login) -> Result<LoginResponse, ApplicationError> {
        let credentials = Credentials::new(command.user_name, command.user_pass)?;

        let now = Utc::now();

        // 顺带清理过期会话，失败不阻断登录
        if let Err(e) = self.session_repo.delete_expired(now).await {
            tracing::warn!(error = %e, "Failed to clear expired sessions");
        }

        let user = self
            .user_repo
            .find_by_name(credentials.user_name())
            .await?
            .ok_or_else(|| {
                ApplicationError::not_found("User", credentials.user_name().to_string())
            })?;

        let verified = self.hasher.verify(credentials.user_pass(), &user.user_pass)?;
        if !verified {
            return Err(ApplicationError::BadPassword);
        }

        let session = SessionRecord {
            token: Uuid::new_v4().to_string(),
            user_id: user.user_id,
            created_at: now,
            expires_at: now + Duration::seconds(self.session_ttl_secs as i64),
        };

        self.session_repo.create(&session).await?;

        tracing::info!(
            user_id = user.user_id,
            user_name = %user.user_name,
            "User logged in"
        );

        Ok(LoginResponse {
            token: session.token,
            user: UserResponse::from(user),
        })
    }
}

// ============================================================================
// Logout
// ============================================================================

/// Logout Handler
pub struct LogoutHandler {
    session_repo: Arc<dyn SessionRepositoryPort>,
}

impl LogoutHandler {
    pub fn new(session_repo: Arc<dyn SessionRepositoryPort>) -> Self {
        Self { session_repo }
    }

    pub async fn handle(&self, command: Logout) -> Result<(), ApplicationError> {
        self.session_repo.delete(&command.token).await?;
        Ok(())
    }
}

// ============================================================================
// ChangePassword
// ============================================================================

/// ChangePassword Handler
pub struct ChangePasswordHandler {
    user_repo: Arc<dyn UserRepositoryPort>,
    hasher: Arc<dyn PasswordHasherPort>,
}

impl ChangePasswordHandler {
    pub fn new(user_repo: Arc<dyn UserRepositoryPort>, hasher: Arc<dyn PasswordHasherPort>) -> Self {
        Self { user_repo, hasher }
    }

    pub async fn handle(&self, command: ChangePassword) -> Result<(), ApplicationError> {
        let new_password = NewPassword::new(command.user_pass)?;

        let user_pass = self.hasher.hash(new_password.as_str())?;

        let updated = self
            .user_repo
            .update_password(command.user_id, &user_pass)
            .await?;

        if updated == 0 {
            return Err(ApplicationError::not_found("User", command.user_id));
        }

        tracing::info!(user_id = command.user_id, "Password changed");

        Ok(())
    }
}

// ============================================================================
// DeleteAccount
// ============================================================================

/// DeleteAccount Handler
///
/// confirm == false 返回显式错误。删除在单事务内级联
/// （会话/收藏/评论/章节/作品/用户行），提交后尽力清理封面文件
pub struct DeleteAccountHandler {
    user_repo: Arc<dyn UserRepositoryPort>,
    image_storage: Arc<dyn ImageStoragePort>,
}

impl DeleteAccountHandler {
    pub fn new(
        user_repo: Arc<dyn UserRepositoryPort>,
        image_storage: Arc<dyn ImageStoragePort>,
    ) -> Self {
        Self {
            user_repo,
            image_storage,
        }
    }

    pub async fn handle(&self, command: DeleteAccount) -> Result<(), ApplicationError> {
        if !command.confirm {
            return Err(ApplicationError::validation(
                "Account deletion not confirmed",
            ));
        }

        let orphaned_images = self.user_repo.delete_cascading(command.user_id).await?;

        for image in &orphaned_images {
            if let Err(e) = self.image_storage.delete(image).await {
                tracing::warn!(image = %image, error = %e, "Failed to delete cover image");
            }
        }

        tracing::info!(
            user_id = command.user_id,
            novels = orphaned_images.len(),
            "Account deleted"
        );

        Ok(())
    }
}
