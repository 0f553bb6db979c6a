//! Filesystem adapter for the `Storage` port.
//!
//! Workbooks are written under a single base directory (created on first
//! write); the mailer reads them back from the same place when it builds the
//! attachment list.

use crate::core::Storage;
use crate::utils::error::Result;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self {
            base: PathBuf::from(base_path),
        }
    }

    fn resolve(&self, name: &str) -> PathBuf {
        self.base.join(name)
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        Ok(std::fs::read(self.resolve(path))?)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let target = self.resolve(path);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(target, data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_then_read_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());

        storage
            .write_file("ip_ranges_2025-01-01.xlsx", b"PK\x03\x04")
            .await
            .unwrap();

        let bytes = storage.read_file("ip_ranges_2025-01-01.xlsx").await.unwrap();
        assert_eq!(bytes, b"PK\x03\x04");
        assert!(temp_dir.path().join("ip_ranges_2025-01-01.xlsx").exists());
    }

    #[tokio::test]
    async fn test_write_creates_missing_directories() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("exports").join("weekly");
        let storage = LocalStorage::new(nested.to_str().unwrap().to_string());

        storage.write_file("report.xlsx", b"PK").await.unwrap();
        assert!(nested.join("report.xlsx").exists());
    }

    #[tokio::test]
    async fn test_read_missing_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());

        assert!(storage.read_file("absent.xlsx").await.is_err());
    }
}
