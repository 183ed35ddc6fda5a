use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension};
use std::path::Path;

use crate::catalog::Catalog;
use crate::error::Result;
use crate::model::{FeatureValues, SongRecord};

use super::migrations::MIGRATIONS;

const SONG_COLUMNS: &str = "position, name, artists, year, valence, acousticness, danceability,
    energy, instrumentalness, liveness, speechiness, duration_ms, \"key\", loudness, mode,
    tempo, popularity";

/// A recorded catalog import.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogImport {
    /// Where the rows came from (usually a CSV path).
    pub source: String,
    pub song_count: usize,
    pub imported_at: DateTime<Utc>,
}

/// A database connection holding the imported song catalog.
#[derive(Debug)]
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) a database at the given path and apply migrations.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.apply_migrations()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.apply_migrations()?;
        Ok(db)
    }

    fn apply_migrations(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS schema_migrations (
                version INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                applied_at TEXT NOT NULL DEFAULT (datetime('now'))
            )",
            [],
        )?;

        let mut stmt = self
            .conn
            .prepare("SELECT version FROM schema_migrations ORDER BY version")?;
        let applied: Vec<u32> = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        for migration in MIGRATIONS {
            if !applied.contains(&migration.version) {
                log::info!(
                    "Applying migration {} ({})",
                    migration.version,
                    migration.name
                );
                self.conn.execute_batch(migration.sql)?;
                self.conn.execute(
                    "INSERT INTO schema_migrations (version, name) VALUES (?1, ?2)",
                    rusqlite::params![migration.version, migration.name],
                )?;
            }
        }

        Ok(())
    }
}

// Catalog storage
impl Database {
    /// Replace the stored catalog with `catalog`, preserving row order.
    ///
    /// Runs in a single transaction: on failure the previous catalog is kept.
    /// Returns the number of rows written.
    pub fn replace_catalog(&self, catalog: &Catalog, source: &str) -> Result<usize> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM songs", [])?;

        {
            let mut stmt = tx.prepare(&format!(
                "INSERT INTO songs ({SONG_COLUMNS})
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17)"
            ))?;
            for (position, song) in catalog.iter().enumerate() {
                let f = &song.features;
                stmt.execute(rusqlite::params![
                    i64::try_from(position).unwrap_or(i64::MAX),
                    song.name,
                    song.artists,
                    song.year,
                    f.valence,
                    f.acousticness,
                    f.danceability,
                    f.energy,
                    f.instrumentalness,
                    f.liveness,
                    f.speechiness,
                    f.duration_ms,
                    f.key,
                    f.loudness,
                    f.mode,
                    f.tempo,
                    f.popularity,
                ])?;
            }
        }

        tx.execute(
            "INSERT INTO catalog_imports (source, song_count, imported_at) VALUES (?1, ?2, ?3)",
            rusqlite::params![
                source,
                i64::try_from(catalog.len()).unwrap_or(i64::MAX),
                Utc::now().to_rfc3339(),
            ],
        )?;
        tx.commit()?;

        log::info!("Stored {} songs from {}", catalog.len(), source);
        Ok(catalog.len())
    }

    /// Load the stored catalog in its original row order.
    pub fn load_catalog(&self) -> Result<Catalog> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {SONG_COLUMNS} FROM songs ORDER BY position"
        ))?;

        let songs = stmt
            .query_map([], |row| Self::row_to_song(row))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(Catalog::new(songs))
    }

    /// Number of stored catalog rows.
    pub fn count_songs(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM songs", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or(0))
    }

    /// The most recent catalog import, if any.
    pub fn last_import(&self) -> Result<Option<CatalogImport>> {
        let import = self
            .conn
            .query_row(
                "SELECT source, song_count, imported_at
                 FROM catalog_imports
                 ORDER BY id DESC
                 LIMIT 1",
                [],
                |row| {
                    let source: String = row.get(0)?;
                    let song_count: i64 = row.get(1)?;
                    let imported_at: String = row.get(2)?;
                    let imported_at = DateTime::parse_from_rfc3339(&imported_at)
                        .map_err(|e| {
                            rusqlite::Error::FromSqlConversionFailure(
                                2,
                                rusqlite::types::Type::Text,
                                Box::new(e),
                            )
                        })?
                        .with_timezone(&Utc);
                    Ok(CatalogImport {
                        source,
                        song_count: usize::try_from(song_count).unwrap_or(0),
                        imported_at,
                    })
                },
            )
            .optional()?;
        Ok(import)
    }

    fn row_to_song(row: &rusqlite::Row) -> rusqlite::Result<SongRecord> {
        let features = FeatureValues {
            valence: row.get(4)?,
            acousticness: row.get(5)?,
            danceability: row.get(6)?,
            energy: row.get(7)?,
            instrumentalness: row.get(8)?,
            liveness: row.get(9)?,
            speechiness: row.get(10)?,
            duration_ms: row.get(11)?,
            key: row.get(12)?,
            loudness: row.get(13)?,
            mode: row.get(14)?,
            tempo: row.get(15)?,
            popularity: row.get(16)?,
        };
        Ok(SongRecord::new(
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get(3)?,
            features,
        ))
    }
}
