use crate::domain::error::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

/// Delivery channel for completion notices sent to the workspace owner.
#[async_trait]
pub trait Notifier {
    async fn notify(&self, title: &str, content: &str) -> Result<()>;
}

/// Notifier that writes notices to the log stream.
pub struct TracingNotifier;

#[async_trait]
impl Notifier for TracingNotifier {
    async fn notify(&self, title: &str, content: &str) -> Result<()> {
        tracing::info!("Notification [{}]: {}", title, content);
        Ok(())
    }
}

/// Notifier that records every notice, for inspection in tests.
#[derive(Default)]
pub struct RecordingNotifier {
    notices: RwLock<Vec<(String, String)>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn notices(&self) -> Vec<(String, String)> {
        self.notices.read().await.clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, title: &str, content: &str) -> Result<()> {
        self.notices
            .write()
            .await
            .push((title.to_string(), content.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_recording_notifier_keeps_every_notice() {
        let notifier = RecordingNotifier::new();
        notifier.notify("First", "one").await.unwrap();
        notifier.notify("Second", "two").await.unwrap();

        let notices = notifier.notices().await;
        assert_eq!(notices.len(), 2);
        assert_eq!(notices[0], ("First".to_string(), "one".to_string()));
        assert_eq!(notices[1].1, "two");
    }

    #[tokio::test]
    async fn test_tracing_notifier_accepts_notices() {
        let notifier = TracingNotifier;
        assert!(notifier.notify("Done", "all good").await.is_ok());
    }
}
