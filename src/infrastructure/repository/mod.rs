// ============================================================
// FILE REPOSITORY
// ============================================================
// Metadata records for uploaded files

use crate::domain::error::{AppError, Result};
use crate::domain::file_record::FileRecord;
use async_trait::async_trait;
use tokio::sync::RwLock;

/// Persistence for upload metadata
#[async_trait]
pub trait FileRepository {
    async fn insert(&self, record: FileRecord) -> Result<()>;
    async fn get(&self, id: &str) -> Result<Option<FileRecord>>;
    async fn list(&self) -> Result<Vec<FileRecord>>;
}

/// In-memory repository, keeps records in upload order
#[derive(Default)]
pub struct InMemoryFileRepository {
    records: RwLock<Vec<FileRecord>>,
}

impl InMemoryFileRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FileRepository for InMemoryFileRepository {
    async fn insert(&self, record: FileRecord) -> Result<()> {
        let mut records = self.records.write().await;
        if records.iter().any(|existing| existing.id == record.id) {
            return Err(AppError::ValidationError(format!(
                "Duplicate file id: {}",
                record.id
            )));
        }
        records.push(record);
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<FileRecord>> {
        let records = self.records.read().await;
        Ok(records.iter().find(|record| record.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<FileRecord>> {
        Ok(self.records.read().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::file_record::TabularFormat;
    use chrono::Utc;
    use std::collections::HashMap;

    fn record(id: &str, file_name: &str) -> FileRecord {
        FileRecord {
            id: id.to_string(),
            file_name: file_name.to_string(),
            file_key: format!("uploads/local/1-{}", file_name),
            file_size: 10,
            file_type: TabularFormat::Csv,
            row_count: 1,
            column_count: 2,
            column_names: vec!["a".to_string(), "b".to_string()],
            column_types: HashMap::new(),
            uploaded_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let repository = InMemoryFileRepository::new();
        repository.insert(record("f1", "one.csv")).await.unwrap();

        let found = repository.get("f1").await.unwrap();
        assert_eq!(found.map(|r| r.file_name), Some("one.csv".to_string()));
        assert!(repository.get("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_keeps_upload_order() {
        let repository = InMemoryFileRepository::new();
        repository.insert(record("f1", "one.csv")).await.unwrap();
        repository.insert(record("f2", "two.csv")).await.unwrap();

        let names: Vec<String> = repository
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.file_name)
            .collect();
        assert_eq!(names, vec!["one.csv", "two.csv"]);
    }

    #[tokio::test]
    async fn test_duplicate_id_rejected() {
        let repository = InMemoryFileRepository::new();
        repository.insert(record("f1", "one.csv")).await.unwrap();

        let err = repository.insert(record("f1", "other.csv")).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }
}
