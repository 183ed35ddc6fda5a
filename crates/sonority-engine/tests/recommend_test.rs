//! End-to-end recommendation tests over catalogs loaded from CSV.

use std::sync::Arc;

use sonority_core::{source, Catalog, Error, Feature};
use sonority_engine::{
    get_recommendations, rank, resolve_query_vector, EngineConfig, Query,
    RepresentativePolicy, SimilarityEngine,
};

const HEADER: &str = "name,artists,year,valence,acousticness,danceability,energy,\
instrumentalness,liveness,speechiness,duration_ms,key,loudness,mode,tempo,popularity";

/// Build a CSV catalog where every song differs only in valence/energy.
fn catalog_csv(rows: &[(&str, i32, f64, f64)]) -> Catalog {
    let mut data = String::from(HEADER);
    data.push('\n');
    for (name, year, valence, energy) in rows {
        data.push_str(&format!(
            "{name},['Band'],{year},{valence},0.1,0.5,{energy},0.0,0.1,0.05,200000,5,-6.0,1,120.0,50\n"
        ));
    }
    source::load_csv_reader(data.as_bytes()).expect("Failed to parse test catalog")
}

fn normalized() -> Vec<Feature> {
    Feature::NORMALIZED.to_vec()
}

#[test]
fn test_query_song_listed_three_times_is_fully_excluded() {
    let names: Vec<String> = (0..20).map(|i| format!("OTHER {i}")).collect();
    let mut rows = vec![
        ("TARGET", 2019, 0.6, 0.6),
        ("TARGET", 2019, 0.6, 0.6),
        ("TARGET", 2019, 0.6, 0.6),
    ];
    for (i, name) in names.iter().enumerate() {
        let x = f64::from(u32::try_from(i).unwrap()) / 20.0;
        rows.push((name.as_str(), 2019, x, 1.0 - x));
    }
    let catalog = catalog_csv(&rows);
    let features = normalized();

    let vector = resolve_query_vector(&catalog, "target", 2019, &features).unwrap();
    assert_eq!(vector.match_count(), 3);

    let result = rank(&catalog, &features, &vector, 10).unwrap();
    assert_eq!(result.len(), 10);
    assert!(result.iter().all(|e| e.song.name != "TARGET"));

    let scores: Vec<f64> = result.iter().map(|e| e.score).collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn test_missing_song_has_no_partial_output() {
    let catalog = catalog_csv(&[("A", 2019, 0.1, 0.2), ("B", 2019, 0.3, 0.4)]);
    let result = get_recommendations(&catalog, "C", 2019, &normalized(), 10);
    match result {
        Err(Error::NotFound { name, year }) => {
            assert_eq!(name, "C");
            assert_eq!(year, 2019);
        }
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn test_two_row_catalog_returns_single_entry() {
    let catalog = catalog_csv(&[("A", 2019, 0.1, 0.2), ("B", 2019, 0.3, 0.4)]);
    let result = get_recommendations(&catalog, "A", 2019, &normalized(), 10).unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result.entries[0].song.name, "B");
}

#[test]
fn test_unnormalized_features_are_not_rescaled() {
    // Tempo dominates once it is part of the subset.
    let catalog = catalog_csv(&[
        ("Q", 2019, 0.9, 0.1),
        ("SAME MOOD", 2019, 0.9, 0.1),
        ("OTHER MOOD", 2019, 0.1, 0.9),
    ]);
    let with_tempo = [Feature::Valence, Feature::Energy, Feature::Tempo];
    let result = get_recommendations(&catalog, "Q", 2019, &with_tempo, 2).unwrap();
    assert!(result.entries[1].score > 0.99);

    let mood_only = [Feature::Valence, Feature::Energy];
    let result = get_recommendations(&catalog, "Q", 2019, &mood_only, 2).unwrap();
    assert!(result.entries[1].score < 0.5);
}

#[test]
fn test_engine_result_serializes_for_presentation() {
    let catalog = Arc::new(catalog_csv(&[
        ("A", 2019, 0.1, 0.2),
        ("B", 2019, 0.3, 0.4),
        ("C", 2020, 0.5, 0.5),
    ]));
    let engine = SimilarityEngine::with_config(
        catalog,
        EngineConfig {
            representative: RepresentativePolicy::First,
            parallel: true,
        },
    );
    let query = Query::new("a", 2019).with_features(normalized()).with_top_n(2);
    let result = engine.recommend(&query).unwrap();

    let tuples = result.tuples();
    assert_eq!(tuples.len(), 2);
    assert_eq!(tuples[0].1, "['Band']");

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["query"]["name"], "A");
    assert_eq!(json["entries"].as_array().unwrap().len(), 2);
    assert_eq!(json["features"][0], "valence");
}
