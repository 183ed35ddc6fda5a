use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use sonority_core::{Catalog, Error, Feature};

/// How to pick the representative row when a query song appears on several
/// catalog rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RepresentativePolicy {
    /// The first matching row in catalog order.
    #[default]
    First,
    /// The matching row with the highest popularity; ties go to the earliest
    /// row.
    MostPopular,
}

impl RepresentativePolicy {
    /// Choose one of `positions` (non-empty, in catalog order).
    #[must_use]
    pub fn select(self, catalog: &Catalog, positions: &[usize]) -> Option<usize> {
        match self {
            Self::First => positions.first().copied(),
            Self::MostPopular => {
                let mut best: Option<(usize, f64)> = None;
                for &position in positions {
                    let Some(song) = catalog.get(position) else {
                        continue;
                    };
                    let popularity = song.features.get(Feature::Popularity);
                    if best.map_or(true, |(_, top)| popularity > top) {
                        best = Some((position, popularity));
                    }
                }
                best.map(|(position, _)| position)
            }
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::First => "first",
            Self::MostPopular => "most-popular",
        }
    }
}

impl fmt::Display for RepresentativePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RepresentativePolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "first" => Ok(Self::First),
            "most-popular" | "most_popular" => Ok(Self::MostPopular),
            other => Err(Error::InvalidArgument(format!(
                "unknown representative policy '{other}' (expected first or most-popular)"
            ))),
        }
    }
}
