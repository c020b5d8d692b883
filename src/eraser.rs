use tracing::{debug, info};

use crate::errors::EraseError;
use crate::store::{DeletionResult, MAX_DELETE_BATCH, ObjectStore};

/// Call counters for one `empty_bucket` run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct EraseStats {
    pub pages_listed: usize,
    pub delete_calls: usize,
    pub identifiers_submitted: usize,
}

/// Removes every object version and delete marker from a bucket.
///
/// The loop is: list the first page of what is left, delete exactly that page,
/// repeat. An empty page is the only way to finish successfully.
#[derive(Debug, Clone)]
pub struct BucketEraser<S> {
    store: S,
}

impl<S: ObjectStore> BucketEraser<S> {
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn empty_bucket(
        &self,
        bucket: &str,
    ) -> Result<Vec<DeletionResult>, EraseError> {
        self.empty_bucket_with_stats(bucket)
            .await
            .map(|(deleted, _)| deleted)
    }

    #[tracing::instrument(skip(self))]
    pub async fn empty_bucket_with_stats(
        &self,
        bucket: &str,
    ) -> Result<(Vec<DeletionResult>, EraseStats), EraseError> {
        let mut deleted: Vec<DeletionResult> = Vec::new();
        let mut stats = EraseStats::default();

        loop {
            stats.pages_listed += 1;
            let page_number = stats.pages_listed;

            let listing = self
                .store
                .list_versions_and_markers(bucket)
                .await
                .map_err(|source| EraseError::List {
                    bucket: bucket.to_owned(),
                    page: page_number,
                    source,
                })?;

            let versions = listing.versions.len();
            let delete_markers = listing.delete_markers.len();
            let page = listing.into_page();

            if page.is_empty() {
                info!(
                    pages = page_number,
                    deleted = deleted.len(),
                    "bucket is empty"
                );
                return Ok((deleted, stats));
            }

            info!(page = page_number, versions, delete_markers, "deleting page");

            // a well-behaved store never lists more than one batch worth
            for batch in page.chunks(MAX_DELETE_BATCH) {
                stats.delete_calls += 1;

                let confirmed = self
                    .store
                    .delete_batch(bucket, batch)
                    .await
                    .map_err(|source| EraseError::Delete {
                        bucket: bucket.to_owned(),
                        page: page_number,
                        count: batch.len(),
                        source,
                    })?;

                debug!(
                    requested = batch.len(),
                    confirmed = confirmed.len(),
                    "batch deleted"
                );

                stats.identifiers_submitted += batch.len();
                deleted.extend(confirmed);
            }
        }
    }
}
