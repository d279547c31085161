use crate::core::Storage;
use crate::utils::error::Result;
use std::path::PathBuf;

/// 把工作包寫到本機輸出目錄
#[derive(Debug, Clone)]
pub struct LocalStorage {
    output_dir: PathBuf,
}

impl LocalStorage {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }
}

impl Storage for LocalStorage {
    async fn write_file(&self, name: &str, data: &[u8]) -> Result<()> {
        let target = self.output_dir.join(name);

        // 輸出目錄（含 bundle 名稱裡的子目錄）在第一次寫入時才建立
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(&target, data).await?;
        tracing::debug!("Wrote {} bytes to {}", data.len(), target.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_creates_missing_output_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().join("output"));

        storage.write_file("batch/1/sheet_bundle.zip", b"PK").await.unwrap();

        let written = temp_dir.path().join("output/batch/1/sheet_bundle.zip");
        assert_eq!(tokio::fs::read(&written).await.unwrap(), b"PK");
    }

    #[tokio::test]
    async fn test_write_replaces_previous_bundle() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());

        storage.write_file("sheet_bundle.zip", b"first run").await.unwrap();
        storage.write_file("sheet_bundle.zip", b"second").await.unwrap();

        let data = std::fs::read(temp_dir.path().join("sheet_bundle.zip")).unwrap();
        assert_eq!(data, b"second");
    }

    #[tokio::test]
    async fn test_write_into_file_path_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("output");
        std::fs::write(&blocker, b"not a directory").unwrap();

        let storage = LocalStorage::new(&blocker);
        let err = storage.write_file("sheet_bundle.zip", b"PK").await.unwrap_err();
        assert!(matches!(err, crate::utils::error::SheetError::IoError(_)));
    }
}
