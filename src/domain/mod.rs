pub mod analysis_config;
pub mod anomaly;
pub mod error;
pub mod file_record;
pub mod narration_config;
pub mod statistics;
pub mod table;
pub mod value;
