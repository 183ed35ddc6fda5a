use anyhow::Result;

use sonority_engine::Config;
use sonority_viz::{BarChart, WordCloud};

use super::recommend::{engine_for, radar_for, RecommendArgs};
use crate::tui::{self, App};

/// Rank once, then browse the result in the terminal UI.
pub fn run_explore(args: &RecommendArgs, config: &Config) -> Result<()> {
    let query = args.query(config)?;
    let engine = engine_for(config)?;
    let result = engine.recommend(&query)?;

    let app = App::new(
        WordCloud::from_ranking(&result),
        BarChart::from_ranking(&result),
        radar_for(&engine, &result),
    );
    tui::run_tui(app)
}
