/// A schema migration.
#[derive(Debug)]
pub struct Migration {
    pub version: u32,
    pub name: &'static str,
    pub sql: &'static str,
}

const MIGRATION_001: &str = r#"
-- Schema version tracking
CREATE TABLE IF NOT EXISTS schema_migrations (
    version INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    applied_at TEXT NOT NULL DEFAULT (datetime('now'))
);

-- Catalog rows, one per source row. (name, year) is deliberately not unique.
CREATE TABLE IF NOT EXISTS songs (
    position INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    artists TEXT NOT NULL,
    year INTEGER NOT NULL,
    valence REAL NOT NULL,
    acousticness REAL NOT NULL,
    danceability REAL NOT NULL,
    energy REAL NOT NULL,
    instrumentalness REAL NOT NULL,
    liveness REAL NOT NULL,
    speechiness REAL NOT NULL,
    duration_ms REAL NOT NULL,
    "key" REAL NOT NULL,
    loudness REAL NOT NULL,
    mode REAL NOT NULL,
    tempo REAL NOT NULL,
    popularity REAL NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_songs_name_year ON songs(name, year);
"#;

const MIGRATION_002: &str = r#"
-- History of catalog imports
CREATE TABLE IF NOT EXISTS catalog_imports (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    source TEXT NOT NULL,
    song_count INTEGER NOT NULL,
    imported_at TEXT NOT NULL
);
"#;

/// All migrations in order.
pub const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "songs",
        sql: MIGRATION_001,
    },
    Migration {
        version: 2,
        name: "catalog_imports",
        sql: MIGRATION_002,
    },
];
