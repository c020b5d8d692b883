use anyhow::{Context, anyhow, bail};
use aws_sdk_s3 as s3;
use s3::operation::delete_objects::DeleteObjectsOutput;
use s3::operation::list_object_versions::ListObjectVersionsOutput;
use s3::types::{Delete, DeletedObject, DeleteMarkerEntry, Error as KeyError};
use tracing::{debug, warn};

use crate::helpers::StringExt;
use crate::store::{
    DeleteMarker, DeletionResult, MAX_DELETE_BATCH, NULL_VERSION_ID, ObjectIdentifier,
    ObjectStore, ObjectVersion, VersionListing,
};

/// How many failed keys end up in the error message.
const SHOWN_KEY_ERRORS: usize = 5;

/// [`ObjectStore`] on top of the S3 `ListObjectVersions` and `DeleteObjects` calls.
#[derive(Clone, Debug)]
pub struct S3Store {
    client: s3::Client,
}

impl S3Store {
    pub const fn new(client: s3::Client) -> Self {
        Self { client }
    }
}

fn version_id_or_null(version_id: Option<&str>) -> String {
    version_id.unwrap_or_default().or(NULL_VERSION_ID)
}

fn object_version(entry: &s3::types::ObjectVersion) -> Option<ObjectVersion> {
    Some(ObjectVersion {
        key: entry.key()?.to_owned(),
        version_id: version_id_or_null(entry.version_id()),
        is_latest: entry.is_latest().unwrap_or_default(),
        size: entry.size().unwrap_or_default(),
    })
}

fn delete_marker(entry: &DeleteMarkerEntry) -> Option<DeleteMarker> {
    Some(DeleteMarker {
        key: entry.key()?.to_owned(),
        version_id: version_id_or_null(entry.version_id()),
        is_latest: entry.is_latest().unwrap_or_default(),
    })
}

/// Entries without a key can't be addressed in a delete request, so they are skipped.
pub fn listing_from_output(output: &ListObjectVersionsOutput) -> VersionListing {
    VersionListing {
        versions: output.versions().iter().filter_map(object_version).collect(),
        delete_markers: output
            .delete_markers()
            .iter()
            .filter_map(delete_marker)
            .collect(),
    }
}

fn deletion_result(deleted: &DeletedObject) -> DeletionResult {
    DeletionResult {
        key: deleted.key().unwrap_or_default().to_owned(),
        version_id: deleted.version_id().unwrap_or_default().to_owned(),
        is_delete_marker: deleted.delete_marker().unwrap_or_default(),
        delete_marker_version_id: deleted.delete_marker_version_id().map(str::to_owned),
    }
}

pub fn deletions_from_output(output: &DeleteObjectsOutput) -> Vec<DeletionResult> {
    output.deleted().iter().map(deletion_result).collect()
}

/// Any per-key error fails the whole batch, otherwise the same keys come back on the next listing.
pub fn deletions_or_error(output: &DeleteObjectsOutput) -> anyhow::Result<Vec<DeletionResult>> {
    if let Some(summary) = summarize_key_errors(output.errors()) {
        warn!(
            failed = output.errors().len(),
            "DeleteObjects reported per-key errors"
        );
        return Err(anyhow!(summary));
    }

    Ok(deletions_from_output(output))
}

/// `DeleteObjects` answers 200 even when single keys fail; `None` when nothing failed.
pub fn summarize_key_errors(errors: &[KeyError]) -> Option<String> {
    if errors.is_empty() {
        return None;
    }

    let mut parts: Vec<String> = errors
        .iter()
        .take(SHOWN_KEY_ERRORS)
        .map(|err| {
            format!(
                "{}@{}: {} ({})",
                err.key().unwrap_or_default(),
                err.version_id().unwrap_or(NULL_VERSION_ID),
                err.code().unwrap_or("Unknown"),
                err.message().unwrap_or_default(),
            )
        })
        .collect();

    if errors.len() > SHOWN_KEY_ERRORS {
        parts.push(format!("and {} more", errors.len() - SHOWN_KEY_ERRORS));
    }

    Some(format!(
        "{} objects could not be deleted: {}",
        errors.len(),
        parts.join(", ")
    ))
}

fn to_sdk_identifier(id: &ObjectIdentifier) -> anyhow::Result<s3::types::ObjectIdentifier> {
    s3::types::ObjectIdentifier::builder()
        .key(&id.key)
        .version_id(&id.version_id)
        .build()
        .context("building ObjectIdentifier")
}

impl ObjectStore for S3Store {
    async fn list_versions_and_markers(
        &self,
        bucket: &str,
    ) -> anyhow::Result<VersionListing> {
        let max_keys = i32::try_from(MAX_DELETE_BATCH).unwrap_or(i32::MAX);

        let output = self
            .client
            .list_object_versions()
            .bucket(bucket)
            .max_keys(max_keys)
            .send()
            .await
            .with_context(|| format!("error listing object versions on bucket `{bucket}`"))?;

        let listing = listing_from_output(&output);
        debug!(
            versions = listing.versions.len(),
            delete_markers = listing.delete_markers.len(),
            truncated = output.is_truncated().unwrap_or_default(),
            "listed object versions"
        );

        Ok(listing)
    }

    async fn delete_batch(
        &self,
        bucket: &str,
        identifiers: &[ObjectIdentifier],
    ) -> anyhow::Result<Vec<DeletionResult>> {
        if identifiers.len() > MAX_DELETE_BATCH {
            bail!(
                "Refusing to delete {} objects in one request (max {MAX_DELETE_BATCH}).",
                identifiers.len()
            );
        }

        let objects = identifiers
            .iter()
            .map(to_sdk_identifier)
            .collect::<anyhow::Result<Vec<_>>>()?;

        let delete = Delete::builder()
            .set_objects(Some(objects))
            .quiet(false)
            .build()
            .context("building Delete")?;

        debug!(count = identifiers.len(), "sending DeleteObjects");

        let output = self
            .client
            .delete_objects()
            .bucket(bucket)
            .delete(delete)
            .send()
            .await
            .with_context(|| format!("error deleting objects from bucket `{bucket}`"))?;

        deletions_or_error(&output)
    }
}
