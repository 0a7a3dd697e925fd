//! Query translation and result shaping.
//!
//! `query` maps validated requests onto Elasticsearch query documents;
//! `normalize` maps raw hits back onto the fixed person record. Neither
//! module talks to the network.

pub mod normalize;
pub mod query;

pub use normalize::{normalize_hits, person_from_hit, HitError};
