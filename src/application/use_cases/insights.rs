// ============================================================
// INSIGHTS SERVICE
// ============================================================
// Narrates a stored table's statistics through a language model

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::application::use_cases::table_analyzer::TableAnalyzer;
use crate::domain::analysis_config::AnalysisConfig;
use crate::domain::error::{AppError, Result};
use crate::domain::file_record::FileRecord;
use crate::domain::narration_config::NarrationConfig;
use crate::infrastructure::llm_clients::LLMClient;
use crate::infrastructure::notify::Notifier;
use crate::infrastructure::repository::FileRepository;
use crate::infrastructure::storage::BlobStore;
use crate::infrastructure::tabular::parse_table;

const SYSTEM_PROMPT: &str = "You are a specialized data analyst. Provide professional, \
    clear and actionable insights about statistical data.";

/// Narrated analysis returned to the caller
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightsPayload {
    pub insights: String,
    pub file_name: String,
    pub row_count: usize,
    pub column_count: usize,
    pub generated_at: DateTime<Utc>,
}

/// Column statistics keyed by name, serialized in column order
struct NarrationStatistics(Vec<(String, serde_json::Value)>);

impl Serialize for NarrationStatistics {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Produces a prose reading of a stored file's statistics
pub struct InsightsService {
    blob_store: Arc<dyn BlobStore + Send + Sync>,
    repository: Arc<dyn FileRepository + Send + Sync>,
    llm_client: Arc<dyn LLMClient + Send + Sync>,
    notifier: Arc<dyn Notifier + Send + Sync>,
    config: AnalysisConfig,
    narration: NarrationConfig,
}

impl InsightsService {
    pub fn new(
        blob_store: Arc<dyn BlobStore + Send + Sync>,
        repository: Arc<dyn FileRepository + Send + Sync>,
        llm_client: Arc<dyn LLMClient + Send + Sync>,
        notifier: Arc<dyn Notifier + Send + Sync>,
    ) -> Self {
        Self {
            blob_store,
            repository,
            llm_client,
            notifier,
            config: AnalysisConfig::default(),
            narration: NarrationConfig::default(),
        }
    }

    pub fn with_config(mut self, config: AnalysisConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_narration(mut self, narration: NarrationConfig) -> Self {
        self.narration = narration;
        self
    }

    /// Analyze a stored file, ask the model for insights and notify the owner
    pub async fn generate(&self, file_id: &str) -> Result<InsightsPayload> {
        let record = self.get_file(file_id).await?;
        let bytes = self.blob_store.get(&record.file_key).await?;
        let table = parse_table(&bytes, record.file_type, &self.config)?;

        let analyzer = TableAnalyzer::new(self.config.clone());
        let statistics = NarrationStatistics(analyzer.narration_statistics(&table));
        let stats_json = serde_json::to_string_pretty(&statistics)
            .map_err(|e| AppError::Internal(format!("Failed to serialize statistics: {}", e)))?;

        let prompt = build_prompt(&stats_json, table.row_count(), &table.column_names());
        tracing::info!(
            "Generating insights for file {}: {} rows, {} columns",
            record.id,
            table.row_count(),
            table.column_count()
        );

        let insights = self
            .llm_client
            .generate(&self.narration, SYSTEM_PROMPT, &prompt)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, file_id = %record.id, "Narration request failed");
                e
            })?;

        self.notifier
            .notify(
                "Data Analysis Complete",
                &format!(
                    "Analysis of file \"{}\" completed successfully. {} rows processed.",
                    record.file_name,
                    table.row_count()
                ),
            )
            .await?;

        Ok(InsightsPayload {
            insights,
            file_name: record.file_name,
            row_count: table.row_count(),
            column_count: table.column_count(),
            generated_at: Utc::now(),
        })
    }

    async fn get_file(&self, file_id: &str) -> Result<FileRecord> {
        self.repository
            .get(file_id)
            .await?
            .ok_or_else(|| AppError::NotFound("File not found".to_string()))
    }
}

fn build_prompt(stats_json: &str, row_count: usize, column_names: &[String]) -> String {
    format!(
        "Analyze the following statistics computed from a data file and provide \
        professional insights, recommendations and visualization suggestions.\n\n\
        Data Statistics:\n{}\n\n\
        Number of rows: {}\n\
        Columns: {}\n\n\
        Provide a structured analysis with:\n\
        1. Executive summary of the data\n\
        2. Identified patterns and trends\n\
        3. Anomalies or outlier values\n\
        4. Recommended visualizations for this data\n\
        5. Suggestions for further analyses\n\
        6. Possible correlations between variables",
        stats_json,
        row_count,
        column_names.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::file_service::FileService;
    use crate::domain::file_record::TabularFormat;
    use crate::infrastructure::notify::RecordingNotifier;
    use crate::infrastructure::repository::InMemoryFileRepository;
    use crate::infrastructure::storage::InMemoryBlobStore;
    use async_trait::async_trait;
    use tokio::sync::RwLock;

    const PRICED_CSV: &str = "item,price\n\
        a,1\nb,2\nc,3\nd,4\ne,5\nf,6\ng,7\nh,8\ni,9\nj,100";

    struct ScriptedNarrator {
        reply: String,
        prompts: RwLock<Vec<(String, String)>>,
    }

    impl ScriptedNarrator {
        fn new(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                prompts: RwLock::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl LLMClient for ScriptedNarrator {
        async fn generate(
            &self,
            _config: &NarrationConfig,
            system: &str,
            user: &str,
        ) -> Result<String> {
            self.prompts
                .write()
                .await
                .push((system.to_string(), user.to_string()));
            Ok(self.reply.clone())
        }
    }

    async fn uploaded_service() -> (
        InsightsService,
        String,
        Arc<ScriptedNarrator>,
        Arc<RecordingNotifier>,
    ) {
        let blob_store = Arc::new(InMemoryBlobStore::new());
        let repository = Arc::new(InMemoryFileRepository::new());
        let files = FileService::new(blob_store.clone(), repository.clone());
        let payload = files
            .upload("priced.csv", TabularFormat::Csv, PRICED_CSV.as_bytes())
            .await
            .unwrap();

        let narrator = Arc::new(ScriptedNarrator::new("The price column skews high."));
        let notifier = Arc::new(RecordingNotifier::new());
        let service =
            InsightsService::new(blob_store, repository, narrator.clone(), notifier.clone());
        (service, payload.file_id, narrator, notifier)
    }

    #[tokio::test]
    async fn test_generate_returns_narrated_payload() {
        let (service, file_id, _, _) = uploaded_service().await;

        let payload = service.generate(&file_id).await.unwrap();
        assert_eq!(payload.insights, "The price column skews high.");
        assert_eq!(payload.file_name, "priced.csv");
        assert_eq!(payload.row_count, 10);
        assert_eq!(payload.column_count, 2);
    }

    #[tokio::test]
    async fn test_prompt_embeds_statistics_and_shape() {
        let (service, file_id, narrator, _) = uploaded_service().await;
        service.generate(&file_id).await.unwrap();

        let prompts = narrator.prompts.read().await;
        assert_eq!(prompts.len(), 1);
        let (system, user) = &prompts[0];
        assert!(system.contains("data analyst"));
        assert!(user.contains("Data Statistics:"));
        assert!(user.contains("\"mean\": 14.5"));
        assert!(user.contains("Number of rows: 10"));
        assert!(user.contains("Columns: item, price"));
        assert!(user.contains("6. Possible correlations between variables"));
    }

    #[tokio::test]
    async fn test_generate_notifies_owner() {
        let (service, file_id, _, notifier) = uploaded_service().await;
        service.generate(&file_id).await.unwrap();

        let notices = notifier.notices().await;
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].0, "Data Analysis Complete");
        assert!(notices[0].1.contains("\"priced.csv\""));
        assert!(notices[0].1.contains("10 rows processed"));
    }

    #[tokio::test]
    async fn test_generate_missing_file_is_not_found() {
        let narrator = Arc::new(ScriptedNarrator::new("unused"));
        let notifier = Arc::new(RecordingNotifier::new());
        let service = InsightsService::new(
            Arc::new(InMemoryBlobStore::new()),
            Arc::new(InMemoryFileRepository::new()),
            narrator.clone(),
            notifier.clone(),
        );

        let err = service.generate("no-such-id").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert!(narrator.prompts.read().await.is_empty());
        assert!(notifier.notices().await.is_empty());
    }
}
