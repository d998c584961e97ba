use crate::model::{RawPosting, SearchRequest, SourceError};

/// Feed of raw postings for one search. The engine behind it handles
/// its own retries and anti-blocking; an error here is final for the
/// batch.
#[async_trait::async_trait]
pub trait JobSource: Send + Sync {
    async fn fetch(&self, req: &SearchRequest) -> Result<Vec<RawPosting>, SourceError>;
}
