use serde::{Deserialize, Serialize};

/// Both `ListObjectVersions` pages and `DeleteObjects` batches are capped at 1000 entries.
pub const MAX_DELETE_BATCH: usize = 1000;

/// Version id S3 reports for objects written while versioning was off.
pub const NULL_VERSION_ID: &str = "null";

/// One object revision or delete-marker revision, as accepted by a batch delete.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectIdentifier {
    pub key: String,
    pub version_id: String,
}

impl ObjectIdentifier {
    pub fn new<K: Into<String>, V: Into<String>>(
        key: K,
        version_id: V,
    ) -> Self {
        Self {
            key: key.into(),
            version_id: version_id.into(),
        }
    }
}

/// A stored object revision, as returned by a version listing.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ObjectVersion {
    pub key: String,
    pub version_id: String,
    pub is_latest: bool,
    pub size: i64,
}

/// A delete marker, as returned by a version listing.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct DeleteMarker {
    pub key: String,
    pub version_id: String,
    pub is_latest: bool,
}

impl From<ObjectVersion> for ObjectIdentifier {
    fn from(value: ObjectVersion) -> Self {
        Self::new(value.key, value.version_id)
    }
}

impl From<DeleteMarker> for ObjectIdentifier {
    fn from(value: DeleteMarker) -> Self {
        Self::new(value.key, value.version_id)
    }
}

/// Confirmation of a single deletion, passed through from the provider.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DeletionResult {
    pub key: String,
    pub version_id: String,
    pub is_delete_marker: bool,
    pub delete_marker_version_id: Option<String>,
}

/// The raw result of one list call.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct VersionListing {
    pub versions: Vec<ObjectVersion>,
    pub delete_markers: Vec<DeleteMarker>,
}

impl VersionListing {
    pub fn len(&self) -> usize {
        self.versions.len() + self.delete_markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flatten into one delete request: versions first, then delete markers,
    /// each in provider order.
    pub fn into_page(self) -> Vec<ObjectIdentifier> {
        let mut page = Vec::with_capacity(self.len());

        page.extend(self.versions.into_iter().map(ObjectIdentifier::from));
        page.extend(self.delete_markers.into_iter().map(ObjectIdentifier::from));

        page
    }
}

/// A storage backend that can list and batch-delete object versions.
///
/// `list_versions_and_markers` returns the *first* page of whatever is left in
/// the bucket; callers re-list after deleting instead of following a cursor.
pub trait ObjectStore {
    async fn list_versions_and_markers(
        &self,
        bucket: &str,
    ) -> anyhow::Result<VersionListing>;

    /// `identifiers` must not exceed [`MAX_DELETE_BATCH`].
    async fn delete_batch(
        &self,
        bucket: &str,
        identifiers: &[ObjectIdentifier],
    ) -> anyhow::Result<Vec<DeletionResult>>;
}

impl<S: ObjectStore> ObjectStore for &S {
    async fn list_versions_and_markers(
        &self,
        bucket: &str,
    ) -> anyhow::Result<VersionListing> {
        (**self).list_versions_and_markers(bucket).await
    }

    async fn delete_batch(
        &self,
        bucket: &str,
        identifiers: &[ObjectIdentifier],
    ) -> anyhow::Result<Vec<DeletionResult>> {
        (**self).delete_batch(bucket, identifiers).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_lists_versions_before_markers() {
        let listing = VersionListing {
            versions: vec![ObjectVersion {
                key: "obj1".into(),
                version_id: "v1".into(),
                is_latest: false,
                size: 12,
            }],
            delete_markers: vec![DeleteMarker {
                key: "obj1".into(),
                version_id: "v2".into(),
                is_latest: true,
            }],
        };

        assert_eq!(listing.len(), 2);
        assert_eq!(
            listing.into_page(),
            vec![
                ObjectIdentifier::new("obj1", "v1"),
                ObjectIdentifier::new("obj1", "v2"),
            ]
        );
    }

    #[test]
    fn page_keeps_provider_order() {
        let listing = VersionListing {
            versions: vec![
                ObjectVersion {
                    key: "zebra".into(),
                    version_id: "3".into(),
                    ..Default::default()
                },
                ObjectVersion {
                    key: "apple".into(),
                    version_id: "1".into(),
                    ..Default::default()
                },
            ],
            delete_markers: vec![DeleteMarker {
                key: "aardvark".into(),
                version_id: "9".into(),
                is_latest: true,
            }],
        };

        let keys: Vec<String> = listing.into_page().into_iter().map(|id| id.key).collect();

        assert_eq!(keys, ["zebra", "apple", "aardvark"]);
    }

    #[test]
    fn empty_listing_gives_empty_page() {
        let listing = VersionListing::default();

        assert!(listing.is_empty());
        assert!(listing.into_page().is_empty());
    }
}
