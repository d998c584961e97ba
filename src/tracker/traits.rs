use crate::model::{RecordRef, TrackerError};

/// Read/write contract of the external tracking store. Search must
/// cover every lifecycle state, closed records included: a posting that
/// was reviewed and rejected must not come back on the next run.
#[async_trait::async_trait]
pub trait TrackingStore: Send + Sync {
    /// Titles of records whose display name contains `text`,
    /// case-insensitively.
    async fn search_record_titles(&self, text: &str) -> Result<Vec<String>, TrackerError>;

    async fn create_record(
        &self,
        title: &str,
        body: &str,
        labels: &[String],
    ) -> Result<RecordRef, TrackerError>;

    /// Adds a record to a board column. Best-effort from the caller's
    /// side; an error here never invalidates the record itself.
    async fn add_to_board(&self, column_id: u64, record: &RecordRef) -> Result<(), TrackerError>;
}
