//! File Image Storage - 文件系统封面图片存储实现
//!
//! 实现 ImageStoragePort trait
//!
//! 文件名 = 毫秒时间戳 + 原扩展名，每次写入生成唯一名字，
//! 写入之间无需加锁

use async_trait::async_trait;
use chrono::Utc;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::application::ports::{ImageStorageError, ImageStoragePort};

/// 文件系统封面图片存储
pub struct FileImageStorage {
    /// 存储根目录
    base_dir: PathBuf,
}

impl FileImageStorage {
    /// 创建新的文件存储
    pub async fn new(base_dir: impl AsRef<Path>) -> Result<Self, ImageStorageError> {
        let base_dir = base_dir.as_ref().to_path_buf();

        // 确保目录存在
        fs::create_dir_all(&base_dir)
            .await
            .map_err(|e| ImageStorageError::IoError(e.to_string()))?;

        Ok(Self { base_dir })
    }

    /// 获取存储根目录
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// 生成存储文件名：毫秒时间戳 + 原扩展名
    fn generate_name(&self, original_name: &str) -> String {
        let extension = Path::new(original_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| format!(".{}", ext))
            .unwrap_or_default();

        let mut millis = Utc::now().timestamp_millis();
        let mut name = format!("{}{}", millis, extension);

        // 同一毫秒内的并发写入退让到下一毫秒
        while self.base_dir.join(&name).exists() {
            millis += 1;
            name = format!("{}{}", millis, extension);
        }

        name
    }
}

#[async_trait]
impl ImageStoragePort for FileImageStorage {
    async fn save(&self, original_name: &str, data: &[u8]) -> Result<String, ImageStorageError> {
        let stored_name = self.generate_name(original_name);
        let path = self.base_dir.join(&stored_name);

        fs::write(&path, data)
            .await
            .map_err(|e| ImageStorageError::IoError(e.to_string()))?;

        tracing::debug!(
            "Saved image: name={}, size={} bytes",
            stored_name,
            data.len()
        );

        Ok(stored_name)
    }

    async fn delete(&self, stored_name: &str) -> Result<(), ImageStorageError> {
        let path = self.base_dir.join(stored_name);

        if !path.exists() {
            return Err(ImageStorageError::FileNotFound(
                path.to_string_lossy().to_string(),
            ));
        }

        fs::remove_file(&path)
            .await
            .map_err(|e| ImageStorageError::IoError(e.to_string()))?;

        tracing::debug!("Deleted image: name={}", stored_name);

        Ok(())
    }

    async fn exists(&self, stored_name: &str) -> bool {
        self.base_dir.join(stored_name).exists()
    }

    fn path_for(&self, stored_name: &str) -> PathBuf {
        self.base_dir.join(stored_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_save_preserves_extension() {
        let temp_dir = tempdir().unwrap();
        let storage = FileImageStorage::new(temp_dir.path()).await.unwrap();

        let name = storage.save("cover.png", b"png bytes").await.unwrap();
        assert!(name.ends_with(".png"));
        assert!(storage.exists(&name).await);

        let data = fs::read(storage.path_for(&name)).await.unwrap();
        assert_eq!(data, b"png bytes");
    }

    #[tokio::test]
    async fn test_save_without_extension() {
        let temp_dir = tempdir().unwrap();
        let storage = FileImageStorage::new(temp_dir.path()).await.unwrap();

        let name = storage.save("cover", b"bytes").await.unwrap();
        assert!(!name.contains('.'));
        assert!(storage.exists(&name).await);
    }

    #[tokio::test]
    async fn test_rapid_saves_get_distinct_names() {
        let temp_dir = tempdir().unwrap();
        let storage = FileImageStorage::new(temp_dir.path()).await.unwrap();

        let first = storage.save("a.jpg", b"1").await.unwrap();
        let second = storage.save("b.jpg", b"2").await.unwrap();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_delete() {
        let temp_dir = tempdir().unwrap();
        let storage = FileImageStorage::new(temp_dir.path()).await.unwrap();

        let name = storage.save("cover.png", b"bytes").await.unwrap();
        storage.delete(&name).await.unwrap();
        assert!(!storage.exists(&name).await);

        assert!(matches!(
            storage.delete(&name).await.unwrap_err(),
            ImageStorageError::FileNotFound(_)
        ));
    }
}
