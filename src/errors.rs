use thiserror::Error;

/// Why emptying a bucket stopped. Both variants are terminal: objects removed
/// by earlier pages stay removed.
#[derive(Debug, Error)]
pub enum EraseError {
    #[error("failed to list object versions on bucket `{bucket}` (page {page})")]
    List {
        bucket: String,
        page: usize,
        #[source]
        source: anyhow::Error,
    },

    /// The provider may have removed part of the batch before failing.
    #[error("failed to delete {count} objects from bucket `{bucket}` (page {page})")]
    Delete {
        bucket: String,
        page: usize,
        count: usize,
        #[source]
        source: anyhow::Error,
    },
}

impl EraseError {
    pub fn bucket(&self) -> &str {
        match self {
            Self::List { bucket, .. } | Self::Delete { bucket, .. } => bucket,
        }
    }

    /// 1-based number of the list call the failure belongs to.
    pub const fn page(&self) -> usize {
        match self {
            Self::List { page, .. } | Self::Delete { page, .. } => *page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn messages_name_the_failing_stage() {
        let list = EraseError::List {
            bucket: "logs".into(),
            page: 1,
            source: anyhow!("AccessDenied"),
        };
        let delete = EraseError::Delete {
            bucket: "logs".into(),
            page: 4,
            count: 1000,
            source: anyhow!("SlowDown"),
        };

        assert_eq!(
            list.to_string(),
            "failed to list object versions on bucket `logs` (page 1)"
        );
        assert_eq!(
            delete.to_string(),
            "failed to delete 1000 objects from bucket `logs` (page 4)"
        );
        assert_eq!(delete.page(), 4);
        assert_eq!(delete.bucket(), "logs");
    }

    #[test]
    fn source_is_kept_in_the_chain() {
        let err: anyhow::Error = EraseError::List {
            bucket: "logs".into(),
            page: 2,
            source: anyhow!("AccessDenied"),
        }
        .into();

        assert_eq!(
            format!("{err:#}"),
            "failed to list object versions on bucket `logs` (page 2): AccessDenied"
        );
    }
}
