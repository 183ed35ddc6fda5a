use anyhow::{Context, Result};
use std::path::Path;

use sonority_core::source;
use sonority_engine::Config;

use super::open_database;

/// Validate a CSV catalog and store it, replacing the previous one.
pub fn run_import(csv_path: &Path, config: &Config) -> Result<()> {
    println!("📥 Importing {}", csv_path.display());

    let catalog = source::load_csv(csv_path)
        .with_context(|| format!("Failed to import {}", csv_path.display()))?;

    let db = open_database(&config.database_path)?;
    let stored = db
        .replace_catalog(&catalog, &csv_path.display().to_string())
        .context("Failed to store catalog")?;

    println!("\n✓ Stored {stored} songs");
    println!("  Distinct songs: {}", catalog.distinct_songs());
    let duplicated = catalog.duplicated_songs();
    if duplicated > 0 {
        println!("  Listed more than once: {duplicated}");
    }
    println!("  Database: {}", config.database_path.display());

    Ok(())
}
