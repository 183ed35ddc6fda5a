//! Core data model for sonority.
//!
//! This crate defines the audio-feature model, the in-memory song catalog,
//! the CSV catalog source, the SQLite catalog store, and the name search
//! helpers used to find a song before asking for recommendations.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod catalog;
pub mod error;
pub mod model;
pub mod schema;
pub mod search;
pub mod source;

pub use catalog::Catalog;
pub use error::{Error, Result};
pub use model::{Feature, FeatureValues, SongRecord};
