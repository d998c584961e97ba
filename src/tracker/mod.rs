// Tracking store integration: trait seam, GitHub client, record writer.

pub mod github;
pub mod traits;
pub mod writer;

pub use github::GithubTracker;
pub use traits::TrackingStore;
pub use writer::RecordWriter;

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::model::{RecordRef, TrackerError};

    use super::traits::TrackingStore;

    pub(crate) struct CreatedRecord {
        pub title: String,
        pub body: String,
        pub labels: Vec<String>,
    }

    /// In-memory store fake. Searches are case-insensitive substring
    /// containment over stored display names, like the real search
    /// endpoint. With `persist_created` set, created records become
    /// visible to later searches, which is what a second run against a
    /// persistent store sees.
    #[derive(Default)]
    pub(crate) struct MockStore {
        pub titles: Mutex<Vec<String>>,
        pub created: Mutex<Vec<CreatedRecord>>,
        pub board_calls: Mutex<Vec<u64>>,
        pub search_calls: AtomicUsize,
        pub persist_created: bool,
        pub fail_search: bool,
        pub fail_create: bool,
        pub fail_board: bool,
    }

    impl MockStore {
        pub fn with_titles(titles: &[&str]) -> Self {
            Self {
                titles: Mutex::new(titles.iter().map(|t| t.to_string()).collect()),
                ..Default::default()
            }
        }

        pub fn created_titles(&self) -> Vec<String> {
            self.created
                .lock()
                .unwrap()
                .iter()
                .map(|r| r.title.clone())
                .collect()
        }

        pub fn searches(&self) -> usize {
            self.search_calls.load(Ordering::SeqCst)
        }

        fn down(what: &str) -> TrackerError {
            TrackerError::Api {
                status: 500,
                message: format!("{} unavailable", what),
            }
        }
    }

    #[async_trait::async_trait]
    impl TrackingStore for MockStore {
        async fn search_record_titles(&self, text: &str) -> Result<Vec<String>, TrackerError> {
            self.search_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_search {
                return Err(Self::down("search"));
            }
            let needle = text.to_lowercase();
            Ok(self
                .titles
                .lock()
                .unwrap()
                .iter()
                .filter(|title| title.to_lowercase().contains(&needle))
                .cloned()
                .collect())
        }

        async fn create_record(
            &self,
            title: &str,
            body: &str,
            labels: &[String],
        ) -> Result<RecordRef, TrackerError> {
            if self.fail_create {
                return Err(Self::down("create"));
            }
            let mut created = self.created.lock().unwrap();
            created.push(CreatedRecord {
                title: title.to_string(),
                body: body.to_string(),
                labels: labels.to_vec(),
            });
            if self.persist_created {
                self.titles.lock().unwrap().push(title.to_string());
            }
            let number = created.len() as u64;
            Ok(RecordRef {
                id: 1000 + number,
                number,
                url: format!("https://store.test/records/{}", number),
            })
        }

        async fn add_to_board(
            &self,
            column_id: u64,
            _record: &RecordRef,
        ) -> Result<(), TrackerError> {
            if self.fail_board {
                return Err(Self::down("board"));
            }
            self.board_calls.lock().unwrap().push(column_id);
            Ok(())
        }
    }
}
