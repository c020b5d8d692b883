pub mod empty_bucket;
pub mod list;
