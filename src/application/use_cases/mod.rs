pub mod anomaly_detection;
pub mod column_statistics;
pub mod exporter;
pub mod file_service;
pub mod insights;
pub mod table_analyzer;
pub mod table_query;
pub mod type_inference;
