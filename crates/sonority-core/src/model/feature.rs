use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// A numeric audio-feature column of the song catalog.
///
/// The first seven features are normalized to `[0, 1]`. The others are raw
/// values on their own scales (milliseconds, decibels, BPM, ...) and are never
/// rescaled: a similarity computed over a mix of both is dominated by the
/// unnormalized columns.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    Valence,
    Acousticness,
    Danceability,
    Energy,
    Instrumentalness,
    Liveness,
    Speechiness,
    DurationMs,
    Key,
    Loudness,
    Mode,
    Tempo,
    Popularity,
}

impl Feature {
    /// Every feature, in canonical column order.
    pub const ALL: [Self; 13] = [
        Self::Valence,
        Self::Acousticness,
        Self::Danceability,
        Self::Energy,
        Self::Instrumentalness,
        Self::Liveness,
        Self::Speechiness,
        Self::DurationMs,
        Self::Key,
        Self::Loudness,
        Self::Mode,
        Self::Tempo,
        Self::Popularity,
    ];

    /// Features stored in the `[0, 1]` range.
    pub const NORMALIZED: [Self; 7] = [
        Self::Valence,
        Self::Acousticness,
        Self::Danceability,
        Self::Energy,
        Self::Instrumentalness,
        Self::Liveness,
        Self::Speechiness,
    ];

    /// Features stored on their natural scale.
    pub const UNNORMALIZED: [Self; 5] = [
        Self::DurationMs,
        Self::Key,
        Self::Loudness,
        Self::Mode,
        Self::Tempo,
    ];

    /// The catalog column name for this feature.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Valence => "valence",
            Self::Acousticness => "acousticness",
            Self::Danceability => "danceability",
            Self::Energy => "energy",
            Self::Instrumentalness => "instrumentalness",
            Self::Liveness => "liveness",
            Self::Speechiness => "speechiness",
            Self::DurationMs => "duration_ms",
            Self::Key => "key",
            Self::Loudness => "loudness",
            Self::Mode => "mode",
            Self::Tempo => "tempo",
            Self::Popularity => "popularity",
        }
    }

    /// Whether the feature is stored in the `[0, 1]` range.
    #[must_use]
    pub const fn is_normalized(self) -> bool {
        matches!(
            self,
            Self::Valence
                | Self::Acousticness
                | Self::Danceability
                | Self::Energy
                | Self::Instrumentalness
                | Self::Liveness
                | Self::Speechiness
        )
    }

    /// Parse a comma-separated list of feature names.
    ///
    /// Blank entries are skipped and repeated features are kept only once, in
    /// order of first appearance.
    pub fn parse_list(list: &str) -> Result<Vec<Self>> {
        let mut features = Vec::new();
        for part in list.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let feature: Self = part.parse()?;
            if !features.contains(&feature) {
                features.push(feature);
            }
        }
        Ok(features)
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Feature {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|feature| feature.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                let valid: Vec<&str> = Self::ALL.iter().map(|f| f.as_str()).collect();
                Error::InvalidArgument(format!(
                    "unknown feature '{wanted}' (valid features: {})",
                    valid.join(", ")
                ))
            })
    }
}
