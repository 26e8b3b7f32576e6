pub mod use_cases;

pub use use_cases::anomaly_detection::AnomalyDetector;
pub use use_cases::column_statistics::StatisticsEngine;
pub use use_cases::exporter::{ExportFormat, TableExporter};
pub use use_cases::file_service::FileService;
pub use use_cases::insights::InsightsService;
pub use use_cases::table_analyzer::TableAnalyzer;
pub use use_cases::table_query::{QueryOptions, TableQueryEngine};
pub use use_cases::type_inference::TypeInferencer;
