pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::use_cases::anomaly_detection::AnomalyDetector;
pub use application::use_cases::column_statistics::StatisticsEngine;
pub use application::use_cases::exporter::{ExportData, ExportFormat, ExportPayload, TableExporter};
pub use application::use_cases::file_service::{FileService, UploadPayload};
pub use application::use_cases::insights::{InsightsPayload, InsightsService};
pub use application::use_cases::table_analyzer::TableAnalyzer;
pub use application::use_cases::table_query::{
    BrowsePayload, QueryOptions, SortOrder, TableQueryEngine,
};
pub use application::use_cases::type_inference::TypeInferencer;
pub use domain::analysis_config::AnalysisConfig;
pub use domain::anomaly::{AnomalyReport, AnomalyThreshold, ColumnAnomalies};
pub use domain::error::{AppError, Result};
pub use domain::file_record::{FileRecord, TabularFormat};
pub use domain::narration_config::NarrationConfig;
pub use domain::statistics::{
    AnalysisPayload, ColumnStatistics, NumericStatistics, StringStatistics,
};
pub use domain::table::{ColumnInfo, ColumnType, RowObject, Table, TableSchema};
pub use domain::value::CellValue;
pub use infrastructure::config::ServiceConfig;
pub use infrastructure::llm_clients::{LLMClient, OpenAiCompatClient};
pub use infrastructure::notify::{Notifier, RecordingNotifier, TracingNotifier};
pub use infrastructure::repository::{FileRepository, InMemoryFileRepository};
pub use infrastructure::storage::{BlobStore, FsBlobStore, InMemoryBlobStore, StoredObject};
pub use infrastructure::tabular::{parse_table, CsvTableParser, XlsxTableParser};

/// Install the default log subscriber. Safe to call more than once.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_env_filter("info").try_init();
}
