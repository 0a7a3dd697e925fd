// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::Person;
pub use requests::{IndexPatternQuery, UidBatchRequest};
pub use responses::{
    ErrorResponse, GenderBucket, HealthResponse, SearchResult, ServiceDescriptor, StatsResponse,
};
