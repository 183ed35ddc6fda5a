use serde::{Deserialize, Serialize};

use sonority_core::Feature;

/// Default number of recommendations.
pub const DEFAULT_TOP_N: usize = 10;

/// A request for songs similar to `song_name` released in `year`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    /// Matched case-insensitively against catalog names.
    pub song_name: String,
    pub year: i32,
    pub features: Vec<Feature>,
    pub top_n: usize,
}

impl Query {
    /// A query over every feature with the default result count.
    #[must_use]
    pub fn new(song_name: impl Into<String>, year: i32) -> Self {
        Self {
            song_name: song_name.into(),
            year,
            features: Feature::ALL.to_vec(),
            top_n: DEFAULT_TOP_N,
        }
    }

    #[must_use]
    pub fn with_features(mut self, features: impl Into<Vec<Feature>>) -> Self {
        self.features = features.into();
        self
    }

    #[must_use]
    pub const fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }
}

/// A query song resolved against the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryVector {
    /// The representative row's values, in feature-subset order.
    pub values: Vec<f64>,
    /// Position of the representative row.
    pub representative: usize,
    /// Positions of every row of the query song.
    pub matched_rows: Vec<usize>,
}

impl QueryVector {
    /// Number of catalog rows that belong to the query song (at least 1).
    #[must_use]
    pub fn match_count(&self) -> usize {
        self.matched_rows.len()
    }

    /// Whether the row at `position` is one of the query song's rows.
    #[must_use]
    pub fn is_query_row(&self, position: usize) -> bool {
        self.matched_rows.contains(&position)
    }
}
