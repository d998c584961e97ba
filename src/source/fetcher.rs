use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::model::{RawPosting, SearchRequest, SourceError};

use super::traits::JobSource;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    error: bool,
    #[serde(default)]
    jobs: Vec<RawPosting>,
}

/// Client for the JobSpy scraping backend. One POST per batch; the
/// backend fans out to the individual job boards itself.
pub struct JobSpyClient {
    client: Client,
    base_url: String,
}

impl JobSpyClient {
    pub fn new(base_url: String) -> Self {
        // Scraping several boards server-side takes a while.
        let client = Client::builder()
            .timeout(Duration::from_secs(180))
            .build()
            .expect("Failed to create HTTP client");
        Self { client, base_url }
    }

    fn endpoint(&self) -> String {
        format!("{}/get-jobs", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait::async_trait]
impl JobSource for JobSpyClient {
    async fn fetch(&self, req: &SearchRequest) -> Result<Vec<RawPosting>, SourceError> {
        let response = self
            .client
            .post(self.endpoint())
            .json(req)
            .send()
            .await?
            .error_for_status()?;

        let parsed: SearchResponse = response.json().await?;
        if parsed.error {
            return Err(SourceError::Backend);
        }
        Ok(parsed.jobs)
    }
}
