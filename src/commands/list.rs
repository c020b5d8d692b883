use byte_unit::{Byte, UnitType};
use tabled::Tabled;

use crate::cli::{GlobalOptions, ListOptions, Process};
use crate::config::Config;
use crate::helpers::print_table;
use crate::s3_store::S3Store;
use crate::store::{ObjectStore, VersionListing};

#[derive(Tabled, Debug, PartialEq, Eq)]
pub struct ListingRow {
    key: String,
    version_id: String,
    kind: &'static str,
    latest: bool,
    size: String,
}

fn human_size(size: i64) -> String {
    let byte = Byte::from_i64(size)
        .unwrap_or_default()
        .get_appropriate_unit(UnitType::Decimal);

    format!("{byte:#.2}")
}

pub fn listing_rows(listing: VersionListing) -> Vec<ListingRow> {
    let versions = listing.versions.into_iter().map(|v| ListingRow {
        key: v.key,
        version_id: v.version_id,
        kind: "version",
        latest: v.is_latest,
        size: human_size(v.size),
    });

    let markers = listing.delete_markers.into_iter().map(|m| ListingRow {
        key: m.key,
        version_id: m.version_id,
        kind: "delete marker",
        latest: m.is_latest,
        size: String::new(),
    });

    versions.chain(markers).collect()
}

impl Process for ListOptions {
    async fn process(
        self,
        globals: &GlobalOptions,
    ) -> anyhow::Result<i32> {
        let config = Config::guess().with_overrides(globals)?;
        let bucket = config.bucket_or(self.bucket.as_ref())?;

        let store = S3Store::new(config.s3_client().await);
        let listing = store.list_versions_and_markers(&bucket).await?;

        if listing.is_empty() {
            println!("s3://{bucket} is empty.");
            return Ok(0);
        }

        println!(
            "s3://{bucket}: {} versions, {} delete markers",
            listing.versions.len(),
            listing.delete_markers.len()
        );
        print_table(&listing_rows(listing));

        Ok(0)
    }
}
