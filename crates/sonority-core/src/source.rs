//! Catalog loading from the tabular CSV source.
//!
//! The CSV must have a header row containing `name`, `artists`, `year` and
//! one column per [`Feature`]. Other columns (ids, release dates, ...) are
//! ignored.

use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::model::{Feature, FeatureValues, SongRecord};

/// Non-feature columns every catalog must have.
pub const IDENTITY_COLUMNS: [&str; 3] = ["name", "artists", "year"];

/// All columns a catalog source must provide.
pub fn required_columns() -> impl Iterator<Item = &'static str> {
    IDENTITY_COLUMNS
        .into_iter()
        .chain(Feature::ALL.into_iter().map(Feature::as_str))
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    name: String,
    artists: String,
    year: i32,
    valence: f64,
    acousticness: f64,
    danceability: f64,
    energy: f64,
    instrumentalness: f64,
    liveness: f64,
    speechiness: f64,
    duration_ms: f64,
    key: f64,
    loudness: f64,
    mode: f64,
    tempo: f64,
    popularity: f64,
}

impl From<CsvRow> for SongRecord {
    fn from(row: CsvRow) -> Self {
        let features = FeatureValues {
            valence: row.valence,
            acousticness: row.acousticness,
            danceability: row.danceability,
            energy: row.energy,
            instrumentalness: row.instrumentalness,
            liveness: row.liveness,
            speechiness: row.speechiness,
            duration_ms: row.duration_ms,
            key: row.key,
            loudness: row.loudness,
            mode: row.mode,
            tempo: row.tempo,
            popularity: row.popularity,
        };
        Self::new(row.name, row.artists, row.year, features)
    }
}

/// Load a catalog from a CSV file.
pub fn load_csv(path: impl AsRef<Path>) -> Result<Catalog> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let catalog = load_csv_reader(file)?;
    log::info!("Loaded {} songs from {}", catalog.len(), path.display());
    Ok(catalog)
}

/// Load a catalog from any CSV reader.
///
/// Fails with [`Error::Schema`] before reading any row when required columns
/// are missing.
pub fn load_csv_reader<R: Read>(reader: R) -> Result<Catalog> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    check_columns(&headers)?;

    let songs = reader
        .deserialize::<CsvRow>()
        .map(|row| row.map(SongRecord::from))
        .collect::<std::result::Result<Vec<_>, csv::Error>>()?;

    let catalog = Catalog::new(songs);
    if catalog.duplicated_songs() > 0 {
        log::debug!(
            "Catalog has {} songs listed on more than one row",
            catalog.duplicated_songs()
        );
    }
    Ok(catalog)
}

fn check_columns(headers: &csv::StringRecord) -> Result<()> {
    let missing: Vec<String> = required_columns()
        .filter(|column| !headers.iter().any(|h| h == *column))
        .map(String::from)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(Error::Schema { missing })
    }
}
