// Service exports
pub mod elasticsearch;

pub use elasticsearch::{Bucket, EsClient, EsError};
