use anyhow::Result;
use serde::Serialize;
use std::sync::Arc;

use sonority_core::Feature;
use sonority_engine::config::MAX_TOP_N;
use sonority_engine::{Config, Query, RankingResult, SimilarityEngine};
use sonority_viz::{comparison_names, BarChart, RadarChart, RADAR_COMPARISONS};

use super::{bar_cells, load_catalog, truncate};

const BAR_WIDTH: usize = 30;
const LABEL_WIDTH: usize = 40;
const TRACE_WIDTH: usize = 14;

/// Arguments shared by `recommend` and `explore`.
#[derive(Debug, Clone, clap::Args)]
pub struct RecommendArgs {
    /// Song name, as printed by `sonority search`
    pub name: String,

    /// Release year of the song
    #[arg(long)]
    pub year: i32,

    /// Comma-separated features to compare (see `sonority features`)
    #[arg(long)]
    pub features: Option<String>,

    /// Number of songs to recommend (1 to 50)
    #[arg(long, value_parser = parse_top_n)]
    pub top_n: Option<usize>,
}

impl RecommendArgs {
    /// Build the query, falling back to configured defaults.
    pub fn query(&self, config: &Config) -> Result<Query> {
        let features = match &self.features {
            Some(list) => Feature::parse_list(list)?,
            None => config.default_features.clone(),
        };
        Ok(Query::new(self.name.as_str(), self.year)
            .with_features(features)
            .with_top_n(self.top_n.unwrap_or(config.default_top_n)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

fn parse_top_n(value: &str) -> Result<usize, String> {
    let top_n: usize = value
        .parse()
        .map_err(|_| format!("`{value}` is not a whole number"))?;
    if (1..=MAX_TOP_N).contains(&top_n) {
        Ok(top_n)
    } else {
        Err(format!("must be between 1 and {MAX_TOP_N}"))
    }
}

/// Everything `recommend` prints, for JSON output.
#[derive(Debug, Serialize)]
struct Report<'a> {
    ranking: &'a RankingResult<'a>,
    bar_chart: &'a BarChart,
    radar_chart: &'a RadarChart,
}

/// Engine bound to the configured catalog.
pub fn engine_for(config: &Config) -> Result<SimilarityEngine> {
    let catalog = load_catalog(config)?;
    Ok(SimilarityEngine::with_config(Arc::new(catalog), config.engine))
}

/// Radar chart comparing the query song with its closest matches.
pub fn radar_for(engine: &SimilarityEngine, result: &RankingResult<'_>) -> RadarChart {
    let names = comparison_names(result, RADAR_COMPARISONS);
    RadarChart::normalized(engine.catalog(), &names)
}

pub fn run_recommend(args: &RecommendArgs, format: OutputFormat, config: &Config) -> Result<()> {
    let query = args.query(config)?;
    let engine = engine_for(config)?;
    let result = engine.recommend(&query)?;

    let bar_chart = BarChart::from_ranking(&result);
    let radar_chart = radar_for(&engine, &result);

    match format {
        OutputFormat::Text => {
            print_bars(&bar_chart);
            print_radar(&radar_chart);
        }
        OutputFormat::Json => {
            let report = Report {
                ranking: &result,
                bar_chart: &bar_chart,
                radar_chart: &radar_chart,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

fn print_bars(chart: &BarChart) {
    println!("\n🎵 {}\n", chart.title);

    if chart.bars.is_empty() {
        println!("  No other songs in the catalog.");
        return;
    }

    for (rank, bar) in chart.bars.iter().enumerate() {
        let cells = bar_cells(chart.fraction(bar.value), BAR_WIDTH);
        println!(
            "  {:>2}. {:<label$} {:<bar$} {:.4}",
            rank + 1,
            truncate(&bar.label, LABEL_WIDTH),
            "█".repeat(cells),
            bar.value,
            label = LABEL_WIDTH,
            bar = BAR_WIDTH,
        );
        println!("      {}", bar.artists);
    }
}

fn print_radar(chart: &RadarChart) {
    if chart.traces.is_empty() {
        return;
    }

    println!("\nNormalized features\n");
    print!("  {:<18}", "");
    for trace in &chart.traces {
        print!(" {:>width$}", truncate(&trace.name, TRACE_WIDTH), width = TRACE_WIDTH);
    }
    println!();

    for (axis, feature) in chart.open_axes().iter().enumerate() {
        print!("  {:<18}", feature.as_str());
        for trace in &chart.traces {
            print!(" {:>width$.3}", trace.values[axis], width = TRACE_WIDTH);
        }
        println!();
    }
}
