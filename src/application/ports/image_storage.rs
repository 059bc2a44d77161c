//! Image Storage Port - 出站端口
//!
//! 封面图片 Blob 存储的抽象接口
//! 文件以生成名（毫秒时间戳 + 原扩展名）落盘，每次写入文件名唯一

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

/// 图片存储错误
#[derive(Debug, Error)]
pub enum ImageStorageError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("File not found: {0}")]
    FileNotFound(String),
}

/// Image Storage Port
#[async_trait]
pub trait ImageStoragePort: Send + Sync {
    /// 保存图片，返回生成的存储文件名（保留原扩展名）
    async fn save(&self, original_name: &str, data: &[u8]) -> Result<String, ImageStorageError>;

    /// 删除已存储的图片
    async fn delete(&self, stored_name: &str) -> Result<(), ImageStorageError>;

    /// 图片是否存在
    async fn exists(&self, stored_name: &str) -> bool;

    /// 存储文件的磁盘路径
    fn path_for(&self, stored_name: &str) -> PathBuf;
}
