//! Query resolution and similarity ranking.
//!
//! Ranking is deterministic: scores are aligned 1:1 with catalog rows, rows
//! are ordered by a stable descending sort (equal scores keep catalog order),
//! and parallel scoring produces exactly the same array as sequential scoring.

use rayon::prelude::*;
use std::cmp::Ordering;
use std::sync::Arc;

use sonority_core::{Catalog, Error, Feature, Result, SongRecord};

use crate::config::EngineConfig;
use crate::policy::RepresentativePolicy;
use crate::query::{Query, QueryVector};
use crate::ranking::{RankedSong, RankingResult};
use crate::similarity::cosine_similarity;

fn require_features(features: &[Feature]) -> Result<()> {
    if features.is_empty() {
        Err(Error::InvalidArgument(
            "feature subset must contain at least one feature".to_string(),
        ))
    } else {
        Ok(())
    }
}

/// Resolve a query song to its feature vector, using the first matching row
/// as the representative.
pub fn resolve_query_vector(
    catalog: &Catalog,
    song_name: &str,
    year: i32,
    features: &[Feature],
) -> Result<QueryVector> {
    resolve_query_vector_with(
        catalog,
        song_name,
        year,
        features,
        RepresentativePolicy::First,
    )
}

/// Resolve a query song to its feature vector.
///
/// Every row matching `song_name` (case-insensitively) and `year` is recorded
/// so ranking can exclude all of them; `policy` picks which one supplies the
/// vector.
///
/// # Errors
/// [`Error::NotFound`] when no row matches, [`Error::InvalidArgument`] when
/// `features` is empty.
pub fn resolve_query_vector_with(
    catalog: &Catalog,
    song_name: &str,
    year: i32,
    features: &[Feature],
    policy: RepresentativePolicy,
) -> Result<QueryVector> {
    require_features(features)?;

    let positions = catalog.positions_of(song_name, year);
    let Some((representative, song)) = policy
        .select(catalog, positions)
        .and_then(|position| catalog.get(position).map(|song| (position, song)))
    else {
        return Err(Error::NotFound {
            name: song_name.to_string(),
            year,
        });
    };

    if positions.len() > 1 {
        log::warn!(
            "Multiple ({}) rows for {} ({}); using row {} ({} policy) and excluding all of them",
            positions.len(),
            song.name,
            year,
            representative,
            policy
        );
    } else {
        log::debug!("Resolved {} ({}) to row {}", song.name, year, representative);
    }

    Ok(QueryVector {
        values: song.features.project(features),
        representative,
        matched_rows: positions.to_vec(),
    })
}

/// Cosine similarity of every catalog row's projection onto `features` with
/// `query`, aligned with catalog order.
#[must_use]
pub fn similarities(
    catalog: &Catalog,
    features: &[Feature],
    query: &[f64],
    parallel: bool,
) -> Vec<f64> {
    let score = |song: &SongRecord| cosine_similarity(&song.features.project(features), query);
    if parallel {
        catalog.songs().par_iter().map(score).collect()
    } else {
        catalog.iter().map(score).collect()
    }
}

/// Rank the catalog against a resolved query, sequentially.
pub fn rank<'a>(
    catalog: &'a Catalog,
    features: &[Feature],
    query: &QueryVector,
    top_n: usize,
) -> Result<RankingResult<'a>> {
    rank_with(catalog, features, query, top_n, false)
}

/// Rank the catalog against a resolved query.
///
/// Rows are sorted by similarity, best first, with ties kept in catalog
/// order. The query song's own rows are dropped and the first `top_n` of the
/// remaining rows are returned; fewer when the catalog runs out.
///
/// # Errors
/// [`Error::InvalidArgument`] when `features` is empty, `top_n` is zero, or
/// the query vector was resolved over a different number of features.
pub fn rank_with<'a>(
    catalog: &'a Catalog,
    features: &[Feature],
    query: &QueryVector,
    top_n: usize,
    parallel: bool,
) -> Result<RankingResult<'a>> {
    require_features(features)?;
    if top_n == 0 {
        return Err(Error::InvalidArgument(
            "number of recommendations must be positive".to_string(),
        ));
    }
    if query.values.len() != features.len() {
        return Err(Error::InvalidArgument(format!(
            "query vector has {} values but {} features were selected",
            query.values.len(),
            features.len()
        )));
    }
    let query_song = catalog.get(query.representative).ok_or_else(|| {
        Error::InvalidArgument(format!(
            "query row {} is outside the catalog ({} rows)",
            query.representative,
            catalog.len()
        ))
    })?;

    let scores = similarities(catalog, features, &query.values, parallel);

    let mut order: Vec<usize> = (0..scores.len()).collect();
    // Stable: equal scores keep catalog order.
    order.sort_by(|&a, &b| scores[b].partial_cmp(&scores[a]).unwrap_or(Ordering::Equal));

    let entries: Vec<RankedSong<'a>> = order
        .into_iter()
        .filter(|&position| !query.is_query_row(position))
        .take(top_n)
        .filter_map(|position| {
            catalog.get(position).map(|song| RankedSong {
                position,
                song,
                score: scores[position],
            })
        })
        .collect();

    log::debug!(
        "Ranked {} rows over {} features against {} ({}): {} results, {} query rows excluded",
        scores.len(),
        features.len(),
        query_song.name,
        query_song.year,
        entries.len(),
        query.match_count()
    );

    Ok(RankingResult {
        query: query_song,
        match_count: query.match_count(),
        features: features.to_vec(),
        top_n,
        entries,
    })
}

/// Resolve `song_name` / `year` and rank the catalog against it.
pub fn get_recommendations<'a>(
    catalog: &'a Catalog,
    song_name: &str,
    year: i32,
    features: &[Feature],
    top_n: usize,
) -> Result<RankingResult<'a>> {
    let query = resolve_query_vector(catalog, song_name, year, features)?;
    rank(catalog, features, &query, top_n)
}

/// A similarity engine bound to a loaded catalog.
#[derive(Debug, Clone)]
pub struct SimilarityEngine {
    catalog: Arc<Catalog>,
    config: EngineConfig,
}

impl SimilarityEngine {
    #[must_use]
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self::with_config(catalog, EngineConfig::default())
    }

    #[must_use]
    pub fn with_config(catalog: Arc<Catalog>, config: EngineConfig) -> Self {
        Self { catalog, config }
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Resolve a query song using the configured representative policy.
    pub fn resolve(&self, query: &Query) -> Result<QueryVector> {
        resolve_query_vector_with(
            &self.catalog,
            &query.song_name,
            query.year,
            &query.features,
            self.config.representative,
        )
    }

    /// Recommend songs similar to the query song.
    pub fn recommend(&self, query: &Query) -> Result<RankingResult<'_>> {
        let vector = self.resolve(query)?;
        rank_with(
            &self.catalog,
            &query.features,
            &vector,
            query.top_n,
            self.config.parallel,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sonority_core::FeatureValues;

    const DIMS: [Feature; 3] = [Feature::Valence, Feature::Energy, Feature::Danceability];

    fn song(name: &str, year: i32, values: [f64; 3]) -> SongRecord {
        let features = DIMS
            .iter()
            .zip(values)
            .fold(FeatureValues::default(), |acc, (&f, v)| acc.with(f, v));
        SongRecord::new(name, "['Someone']", year, features)
    }

    fn scenario_catalog() -> Catalog {
        Catalog::new(vec![
            song("SONG A", 2019, [1.0, 0.0, 0.0]),
            song("SONG B", 2019, [1.0, 0.0, 0.0]),
            song("SONG C", 2019, [0.0, 1.0, 0.0]),
        ])
    }

    #[test]
    fn test_scenario_orders_b_then_c() {
        let catalog = scenario_catalog();
        let result = get_recommendations(&catalog, "SONG A", 2019, &DIMS, 2).unwrap();

        assert_eq!(result.names(), vec!["SONG B", "SONG C"]);
        assert!((result.entries[0].score - 1.0).abs() < 1e-12);
        assert_eq!(result.entries[1].score, 0.0);
        assert_eq!(result.query.name, "SONG A");
        assert_eq!(result.match_count, 1);
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        let catalog = scenario_catalog();
        let vector = resolve_query_vector(&catalog, "song b", 2019, &DIMS).unwrap();
        assert_eq!(vector.representative, 1);
        assert_eq!(vector.values, vec![1.0, 0.0, 0.0]);
        assert_eq!(vector.match_count(), 1);
    }

    #[test]
    fn test_resolve_projects_in_subset_order() {
        let catalog = Catalog::new(vec![song("X", 2000, [0.1, 0.2, 0.3])]);
        let vector = resolve_query_vector(
            &catalog,
            "X",
            2000,
            &[Feature::Danceability, Feature::Valence],
        )
        .unwrap();
        assert_eq!(vector.values, vec![0.3, 0.1]);
    }

    #[test]
    fn test_resolve_not_found() {
        let catalog = scenario_catalog();
        let err = resolve_query_vector(&catalog, "SONG A", 2018, &DIMS).unwrap_err();
        assert!(matches!(err, Error::NotFound { year: 2018, .. }));

        let err = get_recommendations(&catalog, "SONG Z", 2019, &DIMS, 5).unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[test]
    fn test_empty_feature_subset_is_invalid() {
        let catalog = scenario_catalog();
        assert!(matches!(
            resolve_query_vector(&catalog, "SONG A", 2019, &[]),
            Err(Error::InvalidArgument(_))
        ));

        let vector = resolve_query_vector(&catalog, "SONG A", 2019, &DIMS).unwrap();
        assert!(matches!(
            rank(&catalog, &[], &vector, 2),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_zero_top_n_is_invalid() {
        let catalog = scenario_catalog();
        let vector = resolve_query_vector(&catalog, "SONG A", 2019, &DIMS).unwrap();
        assert!(matches!(
            rank(&catalog, &DIMS, &vector, 0),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_mismatched_vector_length_is_invalid() {
        let catalog = scenario_catalog();
        let vector = resolve_query_vector(&catalog, "SONG A", 2019, &DIMS).unwrap();
        assert!(matches!(
            rank(&catalog, &DIMS[..2], &vector, 2),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_duplicates_are_all_excluded() {
        let mut songs = vec![
            song("QUERY", 2019, [0.5, 0.5, 0.5]),
            song("OTHER 1", 2019, [0.4, 0.5, 0.6]),
            song("QUERY", 2019, [0.5, 0.5, 0.5]),
            song("OTHER 2", 2019, [0.9, 0.1, 0.0]),
            song("query", 2019, [0.5, 0.5, 0.5]),
        ];
        for i in 0..12 {
            let x = f64::from(i) / 12.0;
            songs.push(song(&format!("FILLER {i}"), 2020, [x, 1.0 - x, 0.3]));
        }
        let catalog = Catalog::new(songs);

        let vector = resolve_query_vector(&catalog, "QUERY", 2019, &DIMS).unwrap();
        assert_eq!(vector.match_count(), 3);
        assert_eq!(vector.representative, 0);

        let result = rank(&catalog, &DIMS, &vector, 10).unwrap();
        assert_eq!(result.len(), 10);
        assert!(result.iter().all(|e| !e.song.is("QUERY", 2019)));
        assert_eq!(result.match_count, 3);
    }

    #[test]
    fn test_query_rows_excluded_even_when_they_do_not_sort_first() {
        // The second QUERY row has different values, and SAME sits before
        // the first QUERY row with an identical vector.
        let catalog = Catalog::new(vec![
            song("SAME", 2019, [1.0, 1.0, 0.0]),
            song("QUERY", 2019, [1.0, 1.0, 0.0]),
            song("NEAR", 2019, [1.0, 0.9, 0.0]),
            song("QUERY", 2019, [0.0, 0.0, 1.0]),
        ]);
        let result = get_recommendations(&catalog, "QUERY", 2019, &DIMS, 5).unwrap();
        assert_eq!(result.names(), vec!["SAME", "NEAR"]);
    }

    #[test]
    fn test_small_catalog_returns_what_is_available() {
        let catalog = Catalog::new(vec![
            song("ONE", 2019, [1.0, 0.0, 0.0]),
            song("TWO", 2019, [0.0, 1.0, 0.0]),
        ]);
        let result = get_recommendations(&catalog, "ONE", 2019, &DIMS, 10).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result.names(), vec!["TWO"]);
    }

    #[test]
    fn test_zero_magnitude_rows_score_zero() {
        let catalog = Catalog::new(vec![
            song("QUERY", 2019, [0.2, 0.4, 0.6]),
            song("SILENT", 2019, [0.0, 0.0, 0.0]),
            song("LOUD", 2019, [0.2, 0.4, 0.5]),
        ]);
        let result = get_recommendations(&catalog, "QUERY", 2019, &DIMS, 5).unwrap();
        assert_eq!(result.names(), vec!["LOUD", "SILENT"]);
        assert_eq!(result.entries[1].score, 0.0);
        assert!(result.iter().all(|e| !e.score.is_nan()));
    }

    #[test]
    fn test_zero_magnitude_query_still_excludes_itself() {
        let catalog = Catalog::new(vec![
            song("A", 2019, [1.0, 0.0, 0.0]),
            song("QUERY", 2019, [0.0, 0.0, 0.0]),
            song("B", 2019, [0.0, 1.0, 0.0]),
        ]);
        let result = get_recommendations(&catalog, "QUERY", 2019, &DIMS, 5).unwrap();
        assert_eq!(result.names(), vec!["A", "B"]);
        assert!(result.iter().all(|e| e.score == 0.0));
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let catalog = Catalog::new(vec![
            song("QUERY", 2019, [1.0, 0.0, 0.0]),
            song("T1", 2019, [0.0, 1.0, 0.0]),
            song("BEST", 2019, [1.0, 0.1, 0.0]),
            song("T2", 2019, [0.0, 0.0, 1.0]),
            song("T3", 2019, [0.0, 2.0, 0.0]),
        ]);
        let result = get_recommendations(&catalog, "QUERY", 2019, &DIMS, 4).unwrap();
        assert_eq!(result.names(), vec!["BEST", "T1", "T2", "T3"]);
        let positions: Vec<usize> = result.iter().map(|e| e.position).collect();
        assert_eq!(positions, vec![2, 1, 3, 4]);
    }

    #[test]
    fn test_rank_is_idempotent() {
        let catalog = Catalog::new(
            (0..40)
                .map(|i| {
                    let x = f64::from(i % 7) / 7.0;
                    song(&format!("S{i}"), 2019, [x, 0.5, 1.0 - x])
                })
                .collect(),
        );
        let vector = resolve_query_vector(&catalog, "S3", 2019, &DIMS).unwrap();
        let first = rank(&catalog, &DIMS, &vector, 15).unwrap();
        let second = rank(&catalog, &DIMS, &vector, 15).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let catalog = Catalog::new(
            (0..500)
                .map(|i| {
                    let x = f64::from(i % 13) / 13.0;
                    let y = f64::from(i % 5) / 5.0;
                    song(&format!("S{i}"), 2019, [x, y, 0.25])
                })
                .collect(),
        );
        let vector = resolve_query_vector(&catalog, "S7", 2019, &DIMS).unwrap();

        let sequential = similarities(&catalog, &DIMS, &vector.values, false);
        let parallel = similarities(&catalog, &DIMS, &vector.values, true);
        assert_eq!(sequential, parallel);

        let a = rank_with(&catalog, &DIMS, &vector, 25, false).unwrap();
        let b = rank_with(&catalog, &DIMS, &vector, 25, true).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_engine_uses_configured_policy() {
        let mut quiet = FeatureValues::default().with(Feature::Valence, 1.0);
        quiet.popularity = 10.0;
        let mut popular = FeatureValues::default().with(Feature::Energy, 1.0);
        popular.popularity = 90.0;

        let catalog = Arc::new(Catalog::new(vec![
            SongRecord::new("DUP", "['X']", 2019, quiet),
            SongRecord::new("DUP", "['X']", 2019, popular),
            song("VALENT", 2019, [1.0, 0.0, 0.0]),
            song("ENERGETIC", 2019, [0.0, 1.0, 0.0]),
        ]));
        let query = Query::new("DUP", 2019).with_features(DIMS).with_top_n(1);

        let first = SimilarityEngine::new(Arc::clone(&catalog));
        assert_eq!(first.recommend(&query).unwrap().names(), vec!["VALENT"]);

        let most_popular = SimilarityEngine::with_config(
            catalog,
            EngineConfig {
                representative: RepresentativePolicy::MostPopular,
                parallel: true,
            },
        );
        let result = most_popular.recommend(&query).unwrap();
        assert_eq!(result.names(), vec!["ENERGETIC"]);
        assert_eq!(result.match_count, 2);
    }
}
