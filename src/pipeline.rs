// Batch orchestration: normalize, classify, write, count.
use std::sync::Arc;

use tracing::{info, warn};

use crate::dedup::{self, RunState};
use crate::model::{BatchReport, Classification, Outcome, RawPosting, RunContext, SearchRequest};
use crate::normalizer::normalize;
use crate::source::JobSource;
use crate::tracker::{RecordWriter, TrackingStore};

/// Drives one batch of postings through normalize → classify → create,
/// one posting at a time, in input order. External calls are awaited
/// sequentially; the store rate-limits, and nothing here needs the
/// parallelism.
pub struct Pipeline {
    source: Arc<dyn JobSource>,
    store: Arc<dyn TrackingStore>,
    writer: RecordWriter,
}

impl Pipeline {
    pub fn new(
        source: Arc<dyn JobSource>,
        store: Arc<dyn TrackingStore>,
        writer: RecordWriter,
    ) -> Self {
        Self {
            source,
            store,
            writer,
        }
    }

    /// Fetches one search's postings and runs them as a batch. A failed
    /// fetch aborts before any posting is processed; there is nothing to
    /// reconcile in that case.
    pub async fn run(&self, request: &SearchRequest, ctx: &RunContext) -> BatchReport {
        let postings = match self.source.fetch(request).await {
            Ok(postings) => postings,
            Err(e) => {
                warn!("Source fetch failed for \"{}\": {}", ctx.keyword, e);
                return BatchReport::source_failure(&e);
            }
        };
        info!("Fetched {} postings for \"{}\"", postings.len(), ctx.keyword);
        self.run_batch(&postings, ctx).await
    }

    /// Processes postings strictly in input order; of two identical
    /// postings in one batch, the first is the one written. One
    /// posting's failure never aborts the rest, and nothing is retried
    /// within the run: a failed posting is reported and left for the
    /// next run, where anything already created turns up as a store
    /// duplicate.
    pub async fn run_batch(&self, postings: &[RawPosting], ctx: &RunContext) -> BatchReport {
        let mut state = RunState::new();
        let mut report = BatchReport::default();

        for raw in postings {
            let posting = normalize(raw);
            let name = posting.display_name();

            match dedup::classify(&posting, &state, self.store.as_ref()).await {
                Ok(Classification::DuplicateInBatch) => {
                    info!("Duplicate within batch, skipping: {}", name);
                    report.record(Outcome::SkippedDuplicateBatch);
                }
                Ok(Classification::DuplicateInStore) => {
                    info!("Already tracked, skipping: {}", name);
                    report.record(Outcome::SkippedDuplicateStore);
                }
                Ok(Classification::New) => {
                    match self.writer.create(self.store.as_ref(), &posting, ctx).await {
                        Ok(result) => {
                            state.insert(dedup::dedup_key(&posting.title, &posting.company));
                            if result.board_link_failed {
                                report.board_failures += 1;
                            }
                            info!("Created record #{}: {}", result.record.number, name);
                            report.record(Outcome::Created(result.record));
                        }
                        Err(e) => {
                            warn!("Create failed for {}: {}", name, e);
                            report.record(Outcome::failed(
                                &posting,
                                format!("create failed: {}", e),
                            ));
                        }
                    }
                }
                Err(e) => {
                    warn!("Store lookup failed for {}: {}", name, e);
                    report.record(Outcome::failed(&posting, format!("lookup failed: {}", e)));
                }
            }
        }

        info!(
            "Batch finished: {} accepted out of {} postings",
            report.created.len(),
            postings.len()
        );
        report
    }
}
