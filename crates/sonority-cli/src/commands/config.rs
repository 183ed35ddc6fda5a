use anyhow::Result;
use sonority_engine::{config, Config};

/// Show the current effective configuration.
pub fn show_config() -> Result<()> {
    let config = Config::load()?;

    println!("Current Configuration");
    println!("=====================\n");

    println!("Config file: {}", config::config_file_path().display());

    let exists = config::config_file_path().exists();
    println!("File exists: {}\n", if exists { "yes" } else { "no (using defaults)" });

    let features: Vec<&str> = config.default_features.iter().map(|f| f.as_str()).collect();

    println!("Settings:");
    println!("  database_path: {}", config.database_path.display());
    println!(
        "  catalog_path: {}",
        config
            .catalog_path
            .as_ref()
            .map_or_else(|| "<not set>".to_string(), |p| p.display().to_string())
    );
    println!("  default_top_n: {}", config.default_top_n);
    println!("  default_features: {}", features.join(", "));
    println!("  engine.representative: {}", config.engine.representative);
    println!("  engine.parallel: {}", config.engine.parallel);
    println!("  logging: {:?}", config.logging);

    println!("\nPriority: CLI args > ENV vars (SONORITY_*) > Config file > Defaults");

    Ok(())
}

/// Show the config file path.
#[allow(clippy::unnecessary_wraps)]
pub fn show_path() -> Result<()> {
    println!("{}", config::config_file_path().display());
    Ok(())
}

/// Show example configuration.
#[allow(clippy::unnecessary_wraps)]
pub fn show_example() -> Result<()> {
    print!("{}", config::example_config());
    Ok(())
}

/// Initialize config file with defaults.
pub fn init_config() -> Result<()> {
    let created = config::ensure_config_file()?;
    let config_path = config::config_file_path();

    if created {
        println!("✓ Created config file: {}", config_path.display());
        println!("\nEdit this file to configure sonority.");
    } else {
        println!("Config file already exists: {}", config_path.display());
    }

    Ok(())
}
