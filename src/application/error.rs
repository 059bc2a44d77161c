//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;

use crate::application::ports::{HasherError, ImageStorageError, RepositoryError};
use crate::domain::novel::NovelError;
use crate::domain::user::UserError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 必填输入缺失
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// 用户名或邮箱已被占用
    #[error("Duplicate user: {0}")]
    DuplicateUser(String),

    /// 请求未携带有效身份
    #[error("Authentication required")]
    Unauthenticated,

    /// 密码校验失败
    #[error("Incorrect password")]
    BadPassword,

    /// 资源未找到
    #[error("{resource_type} not found: {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// 验证错误
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 仓储错误
    #[error("Repository error: {0}")]
    RepositoryError(String),

    /// 存储错误
    #[error("Storage error: {0}")]
    StorageError(String),

    /// 内部错误
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApplicationError {
    /// 创建 NotFound 错误
    pub fn not_found(resource_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// 创建内部错误
    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError(message.into())
    }
}

impl From<RepositoryError> for ApplicationError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Duplicate(msg) => Self::DuplicateUser(msg),
            err => Self::RepositoryError(err.to_string()),
        }
    }
}

impl From<UserError> for ApplicationError {
    fn from(err: UserError) -> Self {
        Self::MissingField(err.field())
    }
}

impl From<NovelError> for ApplicationError {
    fn from(err: NovelError) -> Self {
        Self::MissingField(err.field())
    }
}

impl From<HasherError> for ApplicationError {
    fn from(err: HasherError) -> Self {
        Self::InternalError(err.to_string())
    }
}

impl From<ImageStorageError> for ApplicationError {
    fn from(err: ImageStorageError) -> Self {
        Self::StorageError(err.to_string())
    }
}
