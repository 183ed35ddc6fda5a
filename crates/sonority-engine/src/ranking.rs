use serde::Serialize;

use sonority_core::{Feature, SongRecord};

/// One recommended catalog row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RankedSong<'a> {
    /// Row position in the catalog.
    pub position: usize,
    pub song: &'a SongRecord,
    /// Cosine similarity to the query vector.
    pub score: f64,
}

/// The top-N rows most similar to a query song, best first.
///
/// Never contains a row of the query song itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingResult<'a> {
    /// The query song as stored on its representative row.
    pub query: &'a SongRecord,
    /// How many catalog rows the query song occupies.
    pub match_count: usize,
    pub features: Vec<Feature>,
    pub top_n: usize,
    pub entries: Vec<RankedSong<'a>>,
}

impl<'a> RankingResult<'a> {
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RankedSong<'a>> {
        self.entries.iter()
    }

    /// Names of the recommended songs, best first.
    #[must_use]
    pub fn names(&self) -> Vec<&'a str> {
        self.entries.iter().map(|e| e.song.name.as_str()).collect()
    }

    /// The `(name, artists, year, score)` tuples consumed by the presentation
    /// layer.
    #[must_use]
    pub fn tuples(&self) -> Vec<(&'a str, &'a str, i32, f64)> {
        self.entries
            .iter()
            .map(|e| {
                (
                    e.song.name.as_str(),
                    e.song.artists.as_str(),
                    e.song.year,
                    e.score,
                )
            })
            .collect()
    }
}

impl<'r, 'a> IntoIterator for &'r RankingResult<'a> {
    type Item = &'r RankedSong<'a>;
    type IntoIter = std::slice::Iter<'r, RankedSong<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
