//! User Context - Entities

use super::UserError;

/// 注册载荷
///
/// 不变量:
/// - user_name / user_pass / user_email 均不可为空
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    user_name: String,
    user_pass: String,
    user_email: String,
}

impl Registration {
    pub fn new(
        user_name: impl Into<String>,
        user_pass: impl Into<String>,
        user_email: impl Into<String>,
    ) -> Result<Self, UserError> {
        let user_name = user_name.into();
        let user_pass = user_pass.into();
        let user_email = user_email.into();

        if user_name.is_empty() {
            return Err(UserError::MissingField("user_name"));
        }
        if user_pass.is_empty() {
            return Err(UserError::MissingField("user_pass"));
        }
        if user_email.is_empty() {
            return Err(UserError::MissingField("user_email"));
        }

        Ok(Self {
            user_name,
            user_pass,
            user_email,
        })
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    pub fn user_pass(&self) -> &str {
        &self.user_pass
    }

    pub fn user_email(&self) -> &str {
        &self.user_email
    }
}

/// 登录凭证
///
/// 不变量:
/// - user_name / user_pass 均不可为空
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    user_name: String,
    user_pass: String,
}

impl Credentials {
    pub fn new(
        user_name: impl Into<String>,
        user_pass: impl Into<String>,
    ) -> Result<Self, UserError> {
        let user_name = user_name.into();
        let user_pass = user_pass.into();

        if user_name.is_empty() {
            return Err(UserError::MissingField("user_name"));
        }
        if user_pass.is_empty() {
            return Err(UserError::MissingField("user_pass"));
        }

        Ok(Self {
            user_name,
            user_pass,
        })
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    pub fn user_pass(&self) -> &str {
        &self.user_pass
    }
}

/// 新密码
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPassword(String);

impl NewPassword {
    pub fn new(raw: impl Into<String>) -> Result<Self, UserError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(UserError::MissingField("user_pass"));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
