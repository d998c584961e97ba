// Turns accepted postings into labeled tracking records.
use tracing::warn;

use crate::model::{NormalizedPosting, RecordRef, RunContext, TrackerError};

use super::traits::TrackingStore;

/// Outcome of one record creation. A failed board link does not undo
/// the creation; it is only reported.
pub struct WriteResult {
    pub record: RecordRef,
    pub board_link_failed: bool,
}

pub struct RecordWriter {
    status_label: String,
    board_column_id: Option<u64>,
}

impl RecordWriter {
    pub fn new(status_label: String, board_column_id: Option<u64>) -> Self {
        Self {
            status_label,
            board_column_id,
        }
    }

    /// Creates the tracking record for a posting: display-name title,
    /// markdown body, the initial status label plus the source tag as a
    /// label. The source label is used verbatim; if it does not exist in
    /// the store yet that is a store-side warning, not a failure here.
    pub async fn create(
        &self,
        store: &dyn TrackingStore,
        posting: &NormalizedPosting,
        ctx: &RunContext,
    ) -> Result<WriteResult, TrackerError> {
        let title = posting.display_name();
        let body = build_body(posting, ctx);
        let labels = vec![self.status_label.clone(), posting.source.clone()];

        let record = store.create_record(&title, &body, &labels).await?;

        let mut board_link_failed = false;
        if let Some(column_id) = self.board_column_id {
            if let Err(e) = store.add_to_board(column_id, &record).await {
                warn!("Board link failed for record #{}: {}", record.number, e);
                board_link_failed = true;
            }
        }

        Ok(WriteResult {
            record,
            board_link_failed,
        })
    }
}

fn build_body(posting: &NormalizedPosting, ctx: &RunContext) -> String {
    let mut body = String::new();
    body.push_str(&format!("**Location:** {}\n", posting.location));
    if !posting.salary.is_empty() {
        body.push_str(&format!("**Salary:** {}\n", posting.salary));
    }
    if let Some(posted_at) = posting.posted_at {
        body.push_str(&format!("**Posted:** {}\n", posted_at.format("%Y-%m-%d")));
    }
    body.push('\n');
    if !posting.url.is_empty() {
        body.push_str(&format!("[View posting]({})\n", posting.url));
    }
    if let Some(company_url) = &posting.company_url {
        body.push_str(&format!("[Company page]({})\n", company_url));
    }
    if !posting.description.is_empty() {
        body.push_str(&format!("\n---\n\n{}\n", posting.description));
    }
    body.push_str(&format!(
        "\n---\n_Found via \"{}\" search (remote only: {})_\n",
        ctx.keyword, ctx.remote_only
    ));
    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RawPosting;
    use crate::normalizer::normalize;
    use crate::tracker::testing::MockStore;

    fn posting() -> NormalizedPosting {
        normalize(&RawPosting {
            title: Some("Platform Engineer".into()),
            company: Some("Acme".into()),
            location: Some("Minneapolis, MN".into()),
            job_url: Some("https://boards.test/jobs/42".into()),
            site: Some("indeed".into()),
            description: Some("Build things.".into()),
            min_amount: Some(120000.0),
            max_amount: Some(150000.0),
            company_url: Some("https://acme.test".into()),
            date_posted: None,
        })
    }

    fn ctx() -> RunContext {
        RunContext {
            keyword: "platform engineer".into(),
            remote_only: true,
        }
    }

    #[tokio::test]
    async fn applies_status_and_source_labels() {
        let store = MockStore::default();
        let writer = RecordWriter::new("status: to review".into(), None);

        writer.create(&store, &posting(), &ctx()).await.unwrap();

        let created = store.created.lock().unwrap();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].title, "Platform Engineer @ Acme");
        assert_eq!(
            created[0].labels,
            vec!["status: to review".to_string(), "indeed".to_string()]
        );
    }

    #[tokio::test]
    async fn body_carries_links_description_and_provenance() {
        let store = MockStore::default();
        let writer = RecordWriter::new("status: to review".into(), None);

        writer.create(&store, &posting(), &ctx()).await.unwrap();

        let created = store.created.lock().unwrap();
        let body = &created[0].body;
        assert!(body.contains("**Location:** Minneapolis, MN"));
        assert!(body.contains("**Salary:** $120,000 - $150,000"));
        assert!(body.contains("[View posting](https://boards.test/jobs/42)"));
        assert!(body.contains("[Company page](https://acme.test)"));
        assert!(body.contains("Build things."));
        assert!(body.contains("_Found via \"platform engineer\" search (remote only: true)_"));
    }

    #[tokio::test]
    async fn links_record_to_configured_board() {
        let store = MockStore::default();
        let writer = RecordWriter::new("status: to review".into(), Some(77));

        let result = writer.create(&store, &posting(), &ctx()).await.unwrap();

        assert!(!result.board_link_failed);
        assert_eq!(*store.board_calls.lock().unwrap(), vec![77]);
    }

    #[tokio::test]
    async fn skips_board_when_not_configured() {
        let store = MockStore::default();
        let writer = RecordWriter::new("status: to review".into(), None);

        let result = writer.create(&store, &posting(), &ctx()).await.unwrap();

        assert!(!result.board_link_failed);
        assert!(store.board_calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn board_failure_does_not_undo_creation() {
        let store = MockStore {
            fail_board: true,
            ..Default::default()
        };
        let writer = RecordWriter::new("status: to review".into(), Some(77));

        let result = writer.create(&store, &posting(), &ctx()).await.unwrap();

        assert!(result.board_link_failed);
        assert_eq!(store.created.lock().unwrap().len(), 1);
    }
}
