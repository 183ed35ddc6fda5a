use serde::Serialize;
use std::collections::HashSet;

use sonority_engine::RankingResult;

/// Most words a cloud will hold.
pub const MAX_WORDS: usize = 50;

/// A word in the cloud, weighted by similarity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordTerm {
    pub label: String,
    pub weight: f64,
}

/// Frequency map for a word cloud of recommended songs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordCloud {
    pub title: String,
    /// Heaviest first.
    pub terms: Vec<WordTerm>,
}

impl WordCloud {
    /// Build the cloud from a ranking. Each song is labelled `NAME (YEAR)`;
    /// when two entries share a label the first (higher) weight is kept.
    #[must_use]
    pub fn from_ranking(result: &RankingResult<'_>) -> Self {
        let mut seen = HashSet::new();
        let mut terms: Vec<WordTerm> = result
            .iter()
            .map(|entry| WordTerm {
                label: entry.song.label(),
                weight: entry.score,
            })
            .filter(|term| seen.insert(term.label.clone()))
            .collect();

        // Rankings are already sorted; this keeps the order if a caller hands
        // in hand-built entries.
        terms.sort_by(|a, b| b.weight.total_cmp(&a.weight));
        terms.truncate(MAX_WORDS);

        Self {
            title: crate::ranking_title(result),
            terms,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Weights rescaled to `[0, 1]` between the lightest and heaviest term,
    /// for picking font sizes. A cloud whose terms all weigh the same maps
    /// every term to `1.0`.
    #[must_use]
    pub fn relative_sizes(&self) -> Vec<(&str, f64)> {
        let max = self
            .terms
            .iter()
            .map(|t| t.weight)
            .fold(f64::NEG_INFINITY, f64::max);
        let min = self
            .terms
            .iter()
            .map(|t| t.weight)
            .fold(f64::INFINITY, f64::min);
        let span = max - min;

        self.terms
            .iter()
            .map(|t| {
                let size = if span > 0.0 {
                    (t.weight - min) / span
                } else {
                    1.0
                };
                (t.label.as_str(), size)
            })
            .collect()
    }
}
