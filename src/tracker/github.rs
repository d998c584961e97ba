use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::model::{RecordRef, TrackerError};

use super::traits::TrackingStore;

const API_URL: &str = "https://api.github.com";

#[derive(Debug, Deserialize)]
struct IssueSearchResponse {
    items: Vec<IssueSearchItem>,
}

#[derive(Debug, Deserialize)]
struct IssueSearchItem {
    title: String,
}

#[derive(Debug, Deserialize)]
struct IssueResponse {
    id: u64,
    number: u64,
    html_url: String,
}

/// Tracking store backed by GitHub issues. One issue per posting,
/// labels carry status and source, a classic project column serves as
/// the board.
pub struct GithubTracker {
    client: Client,
    token: String,
    repo: String,
}

impl GithubTracker {
    pub fn new(token: String, repo: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent("job-scout/0.1")
            .build()
            .expect("Failed to create HTTP client");
        Self {
            client,
            token,
            repo,
        }
    }

    /// Issue search query for display names containing `text`. No state
    /// qualifier: closed issues must match too.
    fn search_query(&self, text: &str) -> String {
        format!("repo:{} in:title \"{}\"", self.repo, text)
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, TrackerError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(TrackerError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait::async_trait]
impl TrackingStore for GithubTracker {
    async fn search_record_titles(&self, text: &str) -> Result<Vec<String>, TrackerError> {
        let url = format!("{}/search/issues", API_URL);
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
            .query(&[("q", self.search_query(text))])
            .send()
            .await?;
        let response = Self::check_status(response).await?;
        let parsed: IssueSearchResponse = response.json().await?;
        Ok(parsed.items.into_iter().map(|item| item.title).collect())
    }

    async fn create_record(
        &self,
        title: &str,
        body: &str,
        labels: &[String],
    ) -> Result<RecordRef, TrackerError> {
        let url = format!("{}/repos/{}/issues", API_URL, self.repo);
        let payload = serde_json::json!({
            "title": title,
            "body": body,
            "labels": labels,
        });
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
            .json(&payload)
            .send()
            .await?;
        let response = Self::check_status(response).await?;
        let issue: IssueResponse = response.json().await?;
        Ok(RecordRef {
            id: issue.id,
            number: issue.number,
            url: issue.html_url,
        })
    }

    async fn add_to_board(&self, column_id: u64, record: &RecordRef) -> Result<(), TrackerError> {
        let url = format!("{}/projects/columns/{}/cards", API_URL, column_id);
        let payload = serde_json::json!({
            "content_id": record.id,
            "content_type": "Issue",
        });
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
            .json(&payload)
            .send()
            .await?;
        Self::check_status(response).await?;
        Ok(())
    }
}
