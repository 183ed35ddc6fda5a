//! Chart data for sonority recommendations.
//!
//! Turns a [`RankingResult`](sonority_engine::RankingResult) into the data
//! behind the three recommendation views: a word cloud weighted by
//! similarity, a horizontal bar chart, and a radar chart comparing the query
//! song with its closest matches. Nothing here draws; front ends render the
//! data however they like.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod bar;
pub mod radar;
pub mod wordcloud;

pub use bar::{Bar, BarChart};
pub use radar::{comparison_names, RadarChart, RadarTrace, RADAR_COMPARISONS};
pub use wordcloud::{WordCloud, WordTerm, MAX_WORDS};

/// Chart title shared by the word cloud and the bar chart.
#[must_use]
pub fn ranking_title(result: &sonority_engine::RankingResult<'_>) -> String {
    format!(
        "{} most similar songs to: {}",
        result.top_n,
        result.query.label()
    )
}
