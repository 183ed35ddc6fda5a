//! Song similarity ranking for sonority.
//!
//! Resolves a query song to a feature vector, scores every catalog row by
//! cosine similarity over a caller-chosen feature subset, and returns the
//! top-N rows with the query song's own rows excluded.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod config;
pub mod engine;
pub mod policy;
pub mod query;
pub mod ranking;
pub mod similarity;

pub use config::{Config, EngineConfig};
pub use engine::{
    get_recommendations, rank, rank_with, resolve_query_vector, resolve_query_vector_with,
    similarities, SimilarityEngine,
};
pub use policy::RepresentativePolicy;
pub use query::{Query, QueryVector};
pub use ranking::{RankedSong, RankingResult};
pub use similarity::cosine_similarity;
