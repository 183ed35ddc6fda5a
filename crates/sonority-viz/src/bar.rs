use serde::Serialize;

use sonority_engine::RankingResult;

/// One bar: a recommended song and its similarity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub label: String,
    pub artists: String,
    pub value: f64,
}

/// Horizontal bar chart of a ranking, best match on top.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChart {
    pub title: String,
    pub bars: Vec<Bar>,
    /// Value axis `(start, end)`. Starts just below the weakest bar so small
    /// differences between close matches stay visible.
    pub axis: (f64, f64),
}

impl BarChart {
    #[must_use]
    pub fn from_ranking(result: &RankingResult<'_>) -> Self {
        let bars: Vec<Bar> = result
            .iter()
            .map(|entry| Bar {
                label: entry.song.label(),
                artists: entry.song.artist_display(),
                value: entry.score,
            })
            .collect();

        Self {
            title: crate::ranking_title(result),
            axis: axis_for(&bars),
            bars,
        }
    }

    /// Position of `value` along the axis, in `[0, 1]`.
    #[must_use]
    pub fn fraction(&self, value: f64) -> f64 {
        let (start, end) = self.axis;
        let span = end - start;
        if span > 0.0 {
            ((value - start) / span).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }
}

fn axis_for(bars: &[Bar]) -> (f64, f64) {
    if bars.is_empty() {
        return (0.0, 1.0);
    }
    let min = bars.iter().map(|b| b.value).fold(f64::INFINITY, f64::min);
    let max = bars.iter().map(|b| b.value).fold(f64::NEG_INFINITY, f64::max);
    (min * 0.95, max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sonority_core::{Catalog, Feature, FeatureValues, SongRecord};
    use sonority_engine::get_recommendations;

    fn song(name: &str, valence: f64, energy: f64) -> SongRecord {
        SongRecord::new(
            name,
            "['Artist', 'Guest']",
            2020,
            FeatureValues::default()
                .with(Feature::Valence, valence)
                .with(Feature::Energy, energy),
        )
    }

    #[test]
    fn test_bar_chart_from_ranking() {
        let catalog = Catalog::new(vec![
            song("QUERY", 0.8, 0.6),
            song("NEAR", 0.8, 0.5),
            song("MID", 0.5, 0.8),
        ]);
        let features = [Feature::Valence, Feature::Energy];
        let result = get_recommendations(&catalog, "QUERY", 2020, &features, 10).unwrap();
        let chart = BarChart::from_ranking(&result);

        assert_eq!(chart.bars.len(), 2);
        assert_eq!(chart.bars[0].label, "NEAR (2020)");
        assert_eq!(chart.bars[0].artists, "Artist, Guest");
        assert!(chart.bars[0].value > chart.bars[1].value);

        let (start, end) = chart.axis;
        assert!((start - chart.bars[1].value * 0.95).abs() < 1e-12);
        assert_eq!(end, chart.bars[0].value);
        assert_eq!(chart.fraction(end), 1.0);
        assert!(chart.fraction(chart.bars[1].value) > 0.0);
    }

    #[test]
    fn test_axis_for_empty_chart() {
        assert_eq!(axis_for(&[]), (0.0, 1.0));
    }

    #[test]
    fn test_fraction_on_flat_axis() {
        let chart = BarChart {
            title: String::new(),
            bars: Vec::new(),
            axis: (0.5, 0.5),
        };
        assert_eq!(chart.fraction(0.5), 1.0);
    }
}
