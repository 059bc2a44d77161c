//! Password Hasher Port - 出站端口
//!
//! 密码单向哈希与校验的抽象接口，具体实现为 argon2 适配器

use thiserror::Error;

/// 哈希错误
#[derive(Debug, Error)]
pub enum HasherError {
    #[error("Hash error: {0}")]
    HashError(String),
}

/// Password Hasher Port
pub trait PasswordHasherPort: Send + Sync {
    /// 对明文密码加盐哈希，返回可存储的哈希串
    fn hash(&self, raw_password: &str) -> Result<String, HasherError>;

    /// 校验明文密码与存储哈希是否匹配
    ///
    /// 哈希串损坏等异常返回 Err，密码不匹配返回 Ok(false)
    fn verify(&self, raw_password: &str, stored_hash: &str) -> Result<bool, HasherError>;
}
