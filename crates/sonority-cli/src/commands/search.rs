use anyhow::Result;

use sonority_core::search;
use sonority_engine::Config;

use super::load_catalog;

/// Print every release named `name`, or close names when there is none.
pub fn run_search(name: &str, limit: usize, config: &Config) -> Result<()> {
    let catalog = load_catalog(config)?;
    let matches = search::search_all(&catalog, name);

    if matches.is_empty() {
        let suggestions = search::suggest(&catalog, name, limit);
        if suggestions.is_empty() {
            println!("No song named \"{name}\" in the catalog.");
        } else {
            println!("No song named \"{name}\". Did you mean:\n");
            for suggestion in suggestions {
                println!("  {suggestion}");
            }
        }
        return Ok(());
    }

    for song in &matches {
        println!("{} by {} ({})", song.name, song.artist_display(), song.year);
    }
    if matches.len() > 1 {
        println!("\nPass the year with --year to pick a release.");
    }

    Ok(())
}
