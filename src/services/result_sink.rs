use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::configuration::Settings;
use crate::domain::PlaceRecord;
use crate::services::{notifier, workbook};

// Hand-off for a finished orchestration: persist the result set, then notify
// the requester. The pipeline invokes it exactly once per job.
#[async_trait]
pub trait ResultSink: Send + Sync {
    async fn write(&self, results: &[PlaceRecord], label: &str) -> anyhow::Result<PathBuf>;

    // One delivery attempt; failures are logged and swallowed
    async fn send(&self, to: &str, subject: &str, body: &str, attachment: &Path);
}

pub struct CsvMailSink {
    settings: Settings,
}

impl CsvMailSink {
    pub fn new(settings: Settings) -> Self {
        CsvMailSink { settings }
    }
}

#[async_trait]
impl ResultSink for CsvMailSink {
    async fn write(&self, results: &[PlaceRecord], label: &str) -> anyhow::Result<PathBuf> {
        workbook::save_workbook(results, label)
    }

    async fn send(&self, to: &str, subject: &str, body: &str, attachment: &Path) {
        match notifier::send_results_email(&self.settings, to, subject, body, attachment).await {
            Ok(()) => log::info!("Emailed {} to {}", attachment.display(), to),
            Err(e) => log::error!("Failed to send results email to {}: {:?}", to, e),
        }
    }
}
