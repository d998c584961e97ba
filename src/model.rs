// Core structs: RawPosting, NormalizedPosting, BatchReport
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info, warn};

/// One job posting exactly as the scraping backend returned it. The feed
/// is schema-less: every field may be missing, casing is inconsistent,
/// and descriptions are unbounded. Defaults live in the normalizer, not
/// here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPosting {
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub job_url: Option<String>,
    pub site: Option<String>,
    pub description: Option<String>,
    pub min_amount: Option<f64>,
    pub max_amount: Option<f64>,
    pub company_url: Option<String>,
    pub date_posted: Option<String>,
}

/// Canonical form of a posting, derived once and never mutated.
#[derive(Debug, Clone)]
pub struct NormalizedPosting {
    pub title: String,
    pub company: String,
    pub location: String,
    pub url: String,
    pub source: String,
    pub description: String,
    pub salary: String,
    pub company_url: Option<String>,
    pub posted_at: Option<DateTime<Utc>>,
}

impl NormalizedPosting {
    /// Display name used for tracking records and duplicate lookups.
    pub fn display_name(&self) -> String {
        format!("{} @ {}", self.title, self.company)
    }
}

/// Parameters for one backend search. Serialized field names follow the
/// backend's JSON contract (`sinceWhen`, `excludeKeywords`, ...).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub since_when: String,
    pub keywords: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exclude_keywords: Vec<String>,
    pub is_remote: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub distance: u32,
    pub require_all_keywords: bool,
    pub limit: u32,
}

/// Identifies the originating search, for provenance lines and logging.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub keyword: String,
    pub remote_only: bool,
}

/// Reference to a record created in the tracking store.
#[derive(Debug, Clone)]
pub struct RecordRef {
    pub id: u64,
    pub number: u64,
    pub url: String,
}

/// How the dedup engine judged a posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    New,
    DuplicateInBatch,
    DuplicateInStore,
}

/// Terminal state of one posting after the batch has processed it.
#[derive(Debug)]
pub enum Outcome {
    Created(RecordRef),
    SkippedDuplicateBatch,
    SkippedDuplicateStore,
    Failed {
        title: String,
        company: String,
        reason: String,
    },
}

impl Outcome {
    pub fn failed(posting: &NormalizedPosting, reason: String) -> Self {
        Outcome::Failed {
            title: posting.title.clone(),
            company: posting.company.clone(),
            reason,
        }
    }
}

/// A posting the run could not handle, kept with enough detail for
/// manual follow-up. There is no retry queue.
#[derive(Debug)]
pub struct FailedPosting {
    pub title: String,
    pub company: String,
    pub reason: String,
}

/// Aggregated result of one batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub created: Vec<RecordRef>,
    pub skipped_in_batch: usize,
    pub skipped_in_store: usize,
    pub failed: Vec<FailedPosting>,
    pub board_failures: usize,
    pub source_error: Option<String>,
}

impl BatchReport {
    /// Report for a batch that never started: the source fetch failed,
    /// so zero postings were processed.
    pub fn source_failure(err: &SourceError) -> Self {
        Self {
            source_error: Some(err.to_string()),
            ..Default::default()
        }
    }

    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Created(record) => self.created.push(record),
            Outcome::SkippedDuplicateBatch => self.skipped_in_batch += 1,
            Outcome::SkippedDuplicateStore => self.skipped_in_store += 1,
            Outcome::Failed {
                title,
                company,
                reason,
            } => self.failed.push(FailedPosting {
                title,
                company,
                reason,
            }),
        }
    }

    pub fn log_summary(&self, search_name: &str) {
        if let Some(reason) = &self.source_error {
            error!(
                "[{}] Batch aborted, nothing processed: {}",
                search_name, reason
            );
            return;
        }
        info!(
            "[{}] Done: {} created, {} duplicates in batch, {} already tracked, {} failed",
            search_name,
            self.created.len(),
            self.skipped_in_batch,
            self.skipped_in_store,
            self.failed.len()
        );
        for record in &self.created {
            info!("[{}] Created: {}", search_name, record.url);
        }
        for failed in &self.failed {
            warn!(
                "[{}] Needs follow-up: {} @ {} ({})",
                search_name, failed.title, failed.company, failed.reason
            );
        }
        if self.board_failures > 0 {
            warn!(
                "[{}] {} record(s) created but not added to the board",
                search_name, self.board_failures
            );
        }
    }
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("backend request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("backend reported a failed search")]
    Backend,
}

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("tracking store request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("tracking store returned HTTP {status}: {message}")]
    Api { status: u16, message: String },
}
