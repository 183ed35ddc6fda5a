use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use sonority_engine::Config;

mod commands;
mod tui;

use commands::recommend::{OutputFormat, RecommendArgs};

#[derive(Debug, Parser)]
#[command(name = "sonority", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the database (default: ~/.local/share/sonority/sonority.db)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Read the catalog from this CSV file instead of the database
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Import a song catalog from CSV
    ///
    /// The file must have a header row naming at least these columns:
    /// name, artists, year, and the audio features valence, acousticness,
    /// danceability, energy, instrumentalness, liveness, speechiness,
    /// duration_ms, key, loudness, mode, tempo, popularity. Other columns are
    /// ignored.
    ///
    /// Rows are stored in file order, duplicates included. Importing again
    /// replaces the stored catalog.
    Import {
        /// Path to the CSV file
        path: PathBuf,
    },
    /// Look a song up by name
    ///
    /// Prints every release with that exact name (case-insensitive). When
    /// nothing matches, lists names containing the text instead.
    Search {
        /// Song name
        name: String,

        /// Most suggestions to show when nothing matches exactly
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Recommend songs similar to a song
    ///
    /// Ranks every song in the catalog by cosine similarity of the selected
    /// audio features and prints the closest matches, followed by a
    /// comparison of the query song with its top five matches over the
    /// normalized features.
    ///
    /// Raw-scale features (duration_ms, key, loudness, mode, tempo,
    /// popularity) are compared unscaled, so they dominate the score when
    /// selected.
    Recommend {
        #[command(flatten)]
        args: RecommendArgs,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Browse recommendations interactively
    Explore {
        #[command(flatten)]
        args: RecommendArgs,
    },
    /// List the audio features that can be compared
    Features,
    /// Show catalog status
    Status,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, clap::Subcommand)]
enum ConfigAction {
    /// Show the effective configuration
    Show,
    /// Print the config file path
    Path,
    /// Create the config file with defaults
    Init,
    /// Print an example config file
    Example,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    // Config management must work even when the config file is broken.
    if let Commands::Config { action } = &cli.command {
        return match action {
            ConfigAction::Show => commands::config::show_config(),
            ConfigAction::Path => commands::config::show_path(),
            ConfigAction::Init => commands::config::init_config(),
            ConfigAction::Example => commands::config::show_example(),
        };
    }

    let mut config = match cli.db {
        Some(db_path) => Config::load_with_db_path(db_path)?,
        None => Config::load()?,
    };
    if cli.catalog.is_some() {
        config.catalog_path = cli.catalog;
    }

    init_logging(&config, cli.verbose);
    log::debug!("Database: {}", config.database_path.display());

    match cli.command {
        Commands::Import { path } => commands::import::run_import(&path, &config),
        Commands::Search { name, limit } => commands::search::run_search(&name, limit, &config),
        Commands::Recommend { args, format } => {
            commands::recommend::run_recommend(&args, format, &config)
        }
        Commands::Explore { args } => commands::explore::run_explore(&args, &config),
        Commands::Features => commands::features::list_features(),
        Commands::Status => commands::status::show_status(&config),
        Commands::Config { .. } => Ok(()),
    }
}

fn init_logging(config: &Config, verbose: bool) {
    if let Err(e) = twyg::setup(config.logging.clone()) {
        eprintln!("Warning: failed to set up logging: {e:?}");
    }
    if verbose {
        log::set_max_level(log::LevelFilter::Debug);
    }
}
