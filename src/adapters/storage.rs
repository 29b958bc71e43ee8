use crate::domain::ports::Storage;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::PathBuf;

/// Reads files relative to a base directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// 以目前工作目錄為根目錄
    pub fn current_dir() -> Self {
        Self::new(".")
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        // 絕對路徑會直接取代 base_path
        let full_path = self.base_path.join(path);
        tracing::debug!("Reading file: {}", full_path.display());
        let data = tokio::fs::read(full_path).await?;
        Ok(data)
    }
}
