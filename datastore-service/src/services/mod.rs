pub mod database;
pub mod metrics;
pub mod storage;

pub use database::MongoDb;
pub use metrics::{get_metrics, init_metrics};
pub use storage::{BlobStore, LocalBlobStore, S3BlobStore};
