use anyhow::bail;
use owo_colors::OwoColorize;
use tabled::Tabled;
use tracing::debug;

use crate::cli::{EmptyBucketOptions, GlobalOptions, Process};
use crate::config::Config;
use crate::eraser::BucketEraser;
use crate::helpers::print_table;
use crate::s3_store::S3Store;
use crate::store::DeletionResult;

#[derive(Tabled, Debug, PartialEq, Eq)]
pub struct SummaryRow {
    kind: String,
    deleted: usize,
}

impl SummaryRow {
    pub fn new<S: Into<String>>(
        kind: S,
        deleted: usize,
    ) -> Self {
        Self {
            kind: kind.into(),
            deleted,
        }
    }

    pub fn bold(mut self) -> Self {
        self.kind = self.kind.bold().to_string();

        self
    }
}

pub fn summarize(deleted: &[DeletionResult]) -> Vec<SummaryRow> {
    let markers = deleted.iter().filter(|d| d.is_delete_marker).count();

    vec![
        SummaryRow::new("object versions", deleted.len() - markers),
        SummaryRow::new("delete markers", markers),
        SummaryRow::new("total", deleted.len()).bold(),
    ]
}

impl Process for EmptyBucketOptions {
    async fn process(
        self,
        globals: &GlobalOptions,
    ) -> anyhow::Result<i32> {
        if !self.yes {
            let target = self.bucket.as_deref().unwrap_or("the bucket");
            bail!("Refusing to empty {target} without `--yes`: this deletes every version of every object.")
        }

        let config = Config::guess().with_overrides(globals)?;
        debug!(%config, "loaded config");

        let bucket = config.bucket_or(self.bucket.as_ref())?;

        println!("Deleting contents of s3://{bucket}");

        let store = S3Store::new(config.s3_client().await);
        let eraser = BucketEraser::new(store);

        let (deleted, stats) = eraser.empty_bucket_with_stats(&bucket).await?;
        debug!(?stats, "done");

        println!("Total number of objects deleted: {}", deleted.len());
        print_table(&summarize(&deleted));

        if globals.verbose > 0 {
            for item in &deleted {
                println!("{}", serde_json::to_string(item)?);
            }
        }

        Ok(0)
    }
}
