//! File Cache Store - 目录型缓存存储实现
//!
//! 实现 CacheStorePort trait
//!
//! 写入先落到同目录下 `.tmp-*` 临时文件再 rename，读者不会看到半写入的文件；
//! 枚举时忽略 `.` 开头的文件和子目录

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

use crate::application::ports::{CacheStorePort, StoreError};
use crate::domain::CacheKey;

/// 目录型缓存存储
pub struct FileCacheStore {
    /// 缓存目录
    base_dir: PathBuf,
}

impl FileCacheStore {
    /// 创建存储并确保目录存在
    pub async fn new(base_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let store = Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        };
        store.ensure_dir().await?;

        tracing::debug!(base_dir = %store.base_dir.display(), "FileCacheStore initialized");
        Ok(store)
    }

    async fn ensure_dir(&self) -> Result<(), StoreError> {
        fs::create_dir_all(&self.base_dir)
            .await
            .map_err(|e| StoreError::IoFailure(e.to_string()))
    }

    fn temp_path(&self) -> PathBuf {
        self.base_dir
            .join(format!(".tmp-{}", Uuid::new_v4().simple()))
    }

    /// 枚举缓存文件 (路径, 大小)，读不到元数据的条目跳过
    async fn scan(&self) -> Result<Vec<(PathBuf, u64)>, StoreError> {
        let mut entries = match fs::read_dir(&self.base_dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::IoFailure(e.to_string())),
        };

        let mut files = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StoreError::IoFailure(e.to_string()))?
        {
            if entry.file_name().to_string_lossy().starts_with('.') {
                continue;
            }
            match entry.metadata().await {
                Ok(metadata) if metadata.is_file() => files.push((entry.path(), metadata.len())),
                Ok(_) => {}
                Err(e) => {
                    tracing::debug!(path = %entry.path().display(), error = %e, "Skipping unreadable cache entry");
                }
            }
        }

        Ok(files)
    }
}

#[async_trait]
impl CacheStorePort for FileCacheStore {
    fn path_for(&self, key: &CacheKey) -> PathBuf {
        self.base_dir.join(key.as_str())
    }

    fn exists(&self, key: &CacheKey) -> bool {
        self.path_for(key).is_file()
    }

    async fn read(&self, key: &CacheKey) -> Result<Vec<u8>, StoreError> {
        fs::read(self.path_for(key))
            .await
            .map_err(|e| StoreError::from_io(key, e))
    }

    async fn write(&self, key: &CacheKey, data: &[u8]) -> Result<PathBuf, StoreError> {
        // 目录可能被系统清理，每次写入前确认
        self.ensure_dir().await?;

        let path = self.path_for(key);
        let temp = self.temp_path();

        if let Err(e) = fs::write(&temp, data).await {
            let _ = fs::remove_file(&temp).await;
            return Err(StoreError::IoFailure(e.to_string()));
        }
        if let Err(e) = fs::rename(&temp, &path).await {
            let _ = fs::remove_file(&temp).await;
            return Err(StoreError::IoFailure(e.to_string()));
        }

        tracing::debug!(key = %key, size_bytes = data.len(), "Cache file written");
        Ok(path)
    }

    async fn delete(&self, key: &CacheKey) -> Result<bool, StoreError> {
        match fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StoreError::IoFailure(e.to_string())),
        }
    }

    async fn clear_all(&self) -> Result<u64, StoreError> {
        let mut deleted_count = 0u64;

        for (path, _) in self.scan().await? {
            match fs::remove_file(&path).await {
                Ok(()) => deleted_count += 1,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(StoreError::IoFailure(e.to_string())),
            }
        }

        tracing::info!(
            base_dir = %self.base_dir.display(),
            files = deleted_count,
            "Cache directory cleared"
        );
        Ok(deleted_count)
    }

    async fn total_size_bytes(&self) -> Result<u64, StoreError> {
        Ok(self.scan().await?.iter().map(|(_, size)| size).sum())
    }

    async fn entry_count(&self) -> Result<u64, StoreError> {
        Ok(self.scan().await?.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn key(name: &str) -> CacheKey {
        CacheKey::parse(name).unwrap()
    }

    #[tokio::test]
    async fn test_write_read_delete() {
        let temp_dir = tempdir().unwrap();
        let store = FileCacheStore::new(temp_dir.path().join("AudioCache"))
            .await
            .unwrap();
        let k = key("es_42.mp3");

        assert!(!store.exists(&k));

        // Write
        let path = store.write(&k, b"fake mp3 data").await.unwrap();
        assert_eq!(path, temp_dir.path().join("AudioCache").join("es_42.mp3"));
        assert!(store.exists(&k));

        // Read
        assert_eq!(store.read(&k).await.unwrap(), b"fake mp3 data");

        // Delete
        assert!(store.delete(&k).await.unwrap());
        assert!(!store.exists(&k));
        assert!(!store.delete(&k).await.unwrap());
    }

    #[tokio::test]
    async fn test_read_missing_is_not_found() {
        let temp_dir = tempdir().unwrap();
        let store = FileCacheStore::new(temp_dir.path()).await.unwrap();

        let err = store.read(&key("missing.jpg")).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_overwrite_replaces_content() {
        let temp_dir = tempdir().unwrap();
        let store = FileCacheStore::new(temp_dir.path()).await.unwrap();
        let k = key("1_a.jpg");

        store.write(&k, b"first version").await.unwrap();
        store.write(&k, b"second").await.unwrap();

        assert_eq!(store.read(&k).await.unwrap(), b"second");
        assert_eq!(store.entry_count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_write_recreates_evicted_directory() {
        let temp_dir = tempdir().unwrap();
        let dir = temp_dir.path().join("ImageCache");
        let store = FileCacheStore::new(&dir).await.unwrap();

        fs::remove_dir_all(&dir).await.unwrap();
        assert_eq!(store.total_size_bytes().await.unwrap(), 0);

        store.write(&key("1_b.jpg"), b"data").await.unwrap();
        assert!(store.exists(&key("1_b.jpg")));
    }

    #[tokio::test]
    async fn test_size_and_clear_ignore_temp_files_and_dirs() {
        let temp_dir = tempdir().unwrap();
        let store = FileCacheStore::new(temp_dir.path()).await.unwrap();

        store.write(&key("a"), &[0u8; 5]).await.unwrap();
        store.write(&key("b"), &[0u8; 7]).await.unwrap();
        fs::write(temp_dir.path().join(".tmp-inflight"), [0u8; 100])
            .await
            .unwrap();
        fs::create_dir(temp_dir.path().join("nested")).await.unwrap();

        assert_eq!(store.total_size_bytes().await.unwrap(), 12);
        assert_eq!(store.entry_count().await.unwrap(), 2);

        store.delete(&key("a")).await.unwrap();
        assert_eq!(store.total_size_bytes().await.unwrap(), 7);

        assert_eq!(store.clear_all().await.unwrap(), 1);
        assert_eq!(store.entry_count().await.unwrap(), 0);
        assert!(temp_dir.path().join(".tmp-inflight").exists());
    }

    #[tokio::test]
    async fn test_blocked_target_is_io_failure() {
        let temp_dir = tempdir().unwrap();
        let store = FileCacheStore::new(temp_dir.path()).await.unwrap();
        let k = key("7_blocked.jpg");

        // 目标路径被目录占用：rename 失败，不是条目缺失
        fs::create_dir(temp_dir.path().join("7_blocked.jpg")).await.unwrap();

        let err = store.write(&k, b"payload").await.unwrap_err();
        assert!(matches!(err, StoreError::IoFailure(_)));

        let err = store.read(&k).await.unwrap_err();
        assert!(matches!(err, StoreError::IoFailure(_)));

        let mut entries = fs::read_dir(temp_dir.path()).await.unwrap();
        while let Some(entry) = entries.next_entry().await.unwrap() {
            assert!(!entry.file_name().to_string_lossy().starts_with(".tmp-"));
        }
    }

    #[tokio::test]
    async fn test_directory_replaced_by_file_is_io_failure() {
        let temp_dir = tempdir().unwrap();
        let dir = temp_dir.path().join("AudioCache");
        let store = FileCacheStore::new(&dir).await.unwrap();

        fs::remove_dir_all(&dir).await.unwrap();
        fs::write(&dir, b"not a directory").await.unwrap();

        let err = store.write(&key("es_1.mp3"), b"payload").await.unwrap_err();
        assert!(matches!(err, StoreError::IoFailure(_)));
    }

    #[tokio::test]
    async fn test_no_temp_file_left_after_write() {
        let temp_dir = tempdir().unwrap();
        let store = FileCacheStore::new(temp_dir.path()).await.unwrap();
        store.write(&key("c"), b"payload").await.unwrap();

        let mut names = Vec::new();
        let mut entries = fs::read_dir(temp_dir.path()).await.unwrap();
        while let Some(entry) = entries.next_entry().await.unwrap() {
            names.push(entry.file_name().to_string_lossy().to_string());
        }
        assert_eq!(names, vec!["c".to_string()]);
    }
}
