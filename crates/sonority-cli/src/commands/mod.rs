pub mod config;
pub mod explore;
pub mod features;
pub mod import;
pub mod recommend;
pub mod search;
pub mod status;

use anyhow::{Context, Result};
use std::path::Path;

use sonority_core::schema::Database;
use sonority_core::{source, Catalog};
use sonority_engine::Config;

/// Load the catalog from the CSV override if one is configured, otherwise
/// from the database.
pub fn load_catalog(config: &Config) -> Result<Catalog> {
    let catalog = if let Some(csv_path) = &config.catalog_path {
        source::load_csv(csv_path)
            .with_context(|| format!("Failed to load catalog from {}", csv_path.display()))?
    } else {
        let db = open_database(&config.database_path)?;
        db.load_catalog().context("Failed to read catalog from database")?
    };

    if catalog.is_empty() {
        anyhow::bail!(
            "The catalog is empty.\n\n\
             Run 'sonority import <songs.csv>' first, or pass --catalog <songs.csv>."
        );
    }

    log::debug!("Catalog holds {} rows", catalog.len());
    Ok(catalog)
}

/// Open the database, creating its directory if needed.
pub fn open_database(db_path: &Path) -> Result<Database> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create database directory")?;
    }
    Database::open(db_path)
        .with_context(|| format!("Failed to open database {}", db_path.display()))
}

/// Shorten `text` to at most `width` characters, marking the cut.
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut short: String = text.chars().take(width.saturating_sub(1)).collect();
    short.push('…');
    short
}

/// Number of cells a bar filling `fraction` of `width` occupies.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn bar_cells(fraction: f64, width: usize) -> usize {
    let cells = (fraction.clamp(0.0, 1.0) * width as f64).round() as usize;
    cells.min(width)
}
