pub mod feature;
pub mod song;

pub use feature::Feature;
pub use song::{name_key, FeatureValues, SongRecord};
