//! Novel Context - Errors

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NovelError {
    /// 必填字段缺失，携带字段名
    #[error("缺少必填字段: {0}")]
    MissingField(&'static str),
}

impl NovelError {
    /// 缺失的字段名
    pub fn field(&self) -> &'static str {
        match self {
            NovelError::MissingField(field) => field,
        }
    }
}
