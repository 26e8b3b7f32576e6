// ============================================================
// FILE SERVICE
// ============================================================
// Upload, browse, analysis and export operations over stored
// tabular files

use std::sync::Arc;

use base64::Engine;
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::application::use_cases::exporter::{ExportFormat, ExportPayload, TableExporter};
use crate::application::use_cases::table_analyzer::TableAnalyzer;
use crate::application::use_cases::table_query::{BrowsePayload, QueryOptions, TableQueryEngine};
use crate::domain::analysis_config::AnalysisConfig;
use crate::domain::error::{AppError, Result};
use crate::domain::file_record::{FileRecord, TabularFormat};
use crate::domain::statistics::AnalysisPayload;
use crate::domain::table::{ColumnInfo, Table};
use crate::infrastructure::repository::FileRepository;
use crate::infrastructure::storage::BlobStore;
use crate::infrastructure::tabular::parse_table;

const UPLOAD_CONTENT_TYPE: &str = "application/octet-stream";

/// Summary returned to the caller after a successful upload
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadPayload {
    pub file_id: String,
    pub file_name: String,
    pub row_count: usize,
    pub column_count: usize,
    pub columns: Vec<ColumnInfo>,
}

/// Operations over uploaded tabular files
pub struct FileService {
    blob_store: Arc<dyn BlobStore + Send + Sync>,
    repository: Arc<dyn FileRepository + Send + Sync>,
    config: AnalysisConfig,
    owner: String,
}

impl FileService {
    pub fn new(
        blob_store: Arc<dyn BlobStore + Send + Sync>,
        repository: Arc<dyn FileRepository + Send + Sync>,
    ) -> Self {
        Self {
            blob_store,
            repository,
            config: AnalysisConfig::default(),
            owner: "local".to_string(),
        }
    }

    pub fn with_config(mut self, config: AnalysisConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = owner.into();
        self
    }

    /// Parse an upload, store the raw bytes and persist its metadata
    pub async fn upload(
        &self,
        file_name: &str,
        format: TabularFormat,
        bytes: &[u8],
    ) -> Result<UploadPayload> {
        tracing::info!(
            "Uploading {} file: {} ({} bytes)",
            format,
            file_name,
            bytes.len()
        );

        if bytes.len() > self.config.max_file_size {
            tracing::warn!("Rejecting oversized upload {}: {} bytes", file_name, bytes.len());
            return Err(AppError::SizeLimitExceeded(format!(
                "File size exceeds {}MB limit",
                self.config.max_file_size / (1024 * 1024)
            )));
        }

        let table = parse_table(bytes, format, &self.config).map_err(|e| match e {
            AppError::FormatError(message) => {
                AppError::FormatError(format!("Failed to process file: {}", message))
            }
            other => other,
        })?;

        if table.row_count() == 0 {
            return Err(AppError::EmptyData("File contains no data".to_string()));
        }

        let file_key = format!(
            "uploads/{}/{}-{}",
            self.owner,
            Utc::now().timestamp_millis(),
            file_name
        );
        let stored = self
            .blob_store
            .put(&file_key, bytes, UPLOAD_CONTENT_TYPE)
            .await?;
        tracing::info!("Stored raw upload at {}", stored.url);

        let record = FileRecord {
            id: Uuid::new_v4().to_string(),
            file_name: file_name.to_string(),
            file_key,
            file_size: bytes.len(),
            file_type: format,
            row_count: table.row_count(),
            column_count: table.column_count(),
            column_names: table.column_names(),
            column_types: table.column_types(),
            uploaded_at: Utc::now(),
        };
        self.repository.insert(record.clone()).await?;

        tracing::info!(
            "Uploaded file {}: {} rows, {} columns",
            record.id,
            record.row_count,
            record.column_count
        );

        Ok(UploadPayload {
            file_id: record.id,
            file_name: record.file_name,
            row_count: record.row_count,
            column_count: record.column_count,
            columns: table.columns,
        })
    }

    /// Decode a base64 payload and ingest it
    pub async fn upload_base64(
        &self,
        file_name: &str,
        format: TabularFormat,
        content: &str,
    ) -> Result<UploadPayload> {
        let bytes = base64::prelude::BASE64_STANDARD
            .decode(content)
            .map_err(|e| AppError::ValidationError(format!("Invalid base64 payload: {}", e)))?;
        self.upload(file_name, format, &bytes).await
    }

    pub async fn list_files(&self) -> Result<Vec<FileRecord>> {
        self.repository.list().await
    }

    pub async fn get_file(&self, file_id: &str) -> Result<FileRecord> {
        self.repository
            .get(file_id)
            .await?
            .ok_or_else(|| AppError::NotFound("File not found".to_string()))
    }

    /// Paginated, sorted and filtered view of a stored table
    pub async fn browse(&self, file_id: &str, options: QueryOptions) -> Result<BrowsePayload> {
        let record = self.get_file(file_id).await?;
        let table = self.load_table(&record).await?;

        let mut options = options;
        if options.page_size == 0 {
            options.page_size = self.config.default_page_size;
        }
        Ok(TableQueryEngine::query(&table, &options))
    }

    /// Descriptive statistics and anomaly report for every column
    pub async fn analyze(&self, file_id: &str) -> Result<AnalysisPayload> {
        let record = self.get_file(file_id).await?;
        let table = self.load_table(&record).await?;
        tracing::info!("Analyzing file {}: {} rows", record.id, table.row_count());

        let analyzer = TableAnalyzer::new(self.config.clone());
        Ok(analyzer.analyze(&table))
    }

    /// Render a stored table as a downloadable CSV or JSON payload
    pub async fn export(&self, file_id: &str, format: ExportFormat) -> Result<ExportPayload> {
        let record = self.get_file(file_id).await?;
        let table = self.load_table(&record).await?;
        Ok(TableExporter::export(&table, &record.file_name, format))
    }

    async fn load_table(&self, record: &FileRecord) -> Result<Table> {
        let bytes = self.blob_store.get(&record.file_key).await?;
        parse_table(&bytes, record.file_type, &self.config)
    }
}
