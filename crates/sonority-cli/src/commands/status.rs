use anyhow::Result;

use sonority_core::schema::Database;
use sonority_engine::Config;

pub fn show_status(config: &Config) -> Result<()> {
    let db_path = &config.database_path;

    println!("\n📊 Sonority Status\n");
    println!("  Database: {}", db_path.display());

    if let Some(csv_path) = &config.catalog_path {
        println!("  Catalog CSV: {} (used instead of the database)", csv_path.display());
    }

    if !db_path.exists() {
        println!("  Songs: none imported yet");
        println!("\n  Run `sonority import <songs.csv>` to load a catalog");
        return Ok(());
    }

    let db = Database::open(db_path)?;
    println!("  Songs: {}", db.count_songs()?);

    match db.last_import()? {
        Some(import) => {
            println!("  Last import: {}", import.source);
            println!(
                "    {} songs at {}",
                import.song_count,
                import.imported_at.format("%Y-%m-%d %H:%M:%S UTC")
            );
        }
        None => println!("\n  Run `sonority import <songs.csv>` to load a catalog"),
    }

    println!(
        "  Ranking: representative row = {}, parallel = {}",
        config.engine.representative, config.engine.parallel
    );

    Ok(())
}
