// Run-scoped duplicate detection against the batch and the store.
use std::collections::HashSet;

use crate::model::{Classification, NormalizedPosting, TrackerError};
use crate::tracker::TrackingStore;

const KEY_SEPARATOR: &str = "::";

/// Identity key for a posting. Case- and whitespace-insensitive, built
/// from title and company only. Location, URL and description never
/// participate: the same opening re-posted with a different URL is
/// still the same opening.
pub fn dedup_key(title: &str, company: &str) -> String {
    format!(
        "{}{}{}",
        title.trim().to_lowercase(),
        KEY_SEPARATOR,
        company.trim().to_lowercase()
    )
}

/// Keys accepted so far in the current run. The store's search index
/// lags behind writes made seconds earlier, so this set is the only
/// authority on what the run itself has already committed. Never
/// persisted; a new run starts empty and reconciles through the store.
#[derive(Debug, Default)]
pub struct RunState {
    accepted: HashSet<String>,
}

impl RunState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.accepted.contains(key)
    }

    pub fn insert(&mut self, key: String) {
        self.accepted.insert(key);
    }
}

/// Classifies a posting, cheapest check first: the in-memory run set,
/// then a store lookup over every record state (closed included, so a
/// rejected posting stays gone). The store check is substring
/// containment on display names rather than exact equality, since names
/// are free text the user may have edited after creation. That leniency
/// can over-match ("Senior Engineer @ Acme" in the store suppresses a
/// new "Engineer @ Acme"); under-creating beats duplicate records.
///
/// A failed lookup is an error, never `New`, for the same reason.
pub async fn classify(
    posting: &NormalizedPosting,
    state: &RunState,
    store: &dyn TrackingStore,
) -> Result<Classification, TrackerError> {
    let key = dedup_key(&posting.title, &posting.company);
    if state.contains(&key) {
        return Ok(Classification::DuplicateInBatch);
    }

    let needle = posting.display_name().to_lowercase();
    let titles = store.search_record_titles(&posting.company).await?;
    if titles
        .iter()
        .any(|title| title.to_lowercase().contains(&needle))
    {
        return Ok(Classification::DuplicateInStore);
    }

    Ok(Classification::New)
}
