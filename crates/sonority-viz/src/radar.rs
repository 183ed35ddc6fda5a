use serde::Serialize;

use sonority_core::{Catalog, Feature};
use sonority_engine::RankingResult;

/// How many recommended songs the radar chart compares with the query.
pub const RADAR_COMPARISONS: usize = 5;

/// One polygon on the radar chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarTrace {
    pub name: String,
    /// Mean value per axis, with the first value repeated at the end to close
    /// the polygon.
    pub values: Vec<f64>,
}

/// Radar chart comparing songs over normalized features.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadarChart {
    /// Axis features, first axis repeated at the end.
    pub axes: Vec<Feature>,
    pub range: (f64, f64),
    pub traces: Vec<RadarTrace>,
}

/// The names to compare: the query song followed by up to `limit` of the
/// best recommendations.
#[must_use]
pub fn comparison_names(result: &RankingResult<'_>, limit: usize) -> Vec<String> {
    std::iter::once(result.query.name.clone())
        .chain(result.iter().take(limit).map(|e| e.song.name.clone()))
        .collect()
}

impl RadarChart {
    /// One trace per name: the mean of each feature over every catalog row
    /// with that name (any year). Names without rows are skipped.
    #[must_use]
    pub fn build(catalog: &Catalog, features: &[Feature], names: &[String]) -> Self {
        let traces = names
            .iter()
            .filter_map(|name| {
                let rows = catalog.positions_named(name);
                if rows.is_empty() {
                    return None;
                }
                #[allow(clippy::cast_precision_loss)]
                let count = rows.len() as f64;
                let mut values: Vec<f64> = features
                    .iter()
                    .map(|&feature| {
                        rows.iter()
                            .filter_map(|&p| catalog.get(p))
                            .map(|song| song.features.get(feature))
                            .sum::<f64>()
                            / count
                    })
                    .collect();
                close_polygon(&mut values);
                Some(RadarTrace {
                    name: name.clone(),
                    values,
                })
            })
            .collect();

        let mut axes = features.to_vec();
        close_polygon(&mut axes);

        Self {
            axes,
            range: (0.0, 1.0),
            traces,
        }
    }

    /// Radar chart over the normalized features.
    #[must_use]
    pub fn normalized(catalog: &Catalog, names: &[String]) -> Self {
        Self::build(catalog, &Feature::NORMALIZED, names)
    }

    /// Axes without the closing repeat.
    #[must_use]
    pub fn open_axes(&self) -> &[Feature] {
        let len = self.axes.len().saturating_sub(1);
        &self.axes[..len]
    }
}

fn close_polygon<T: Copy>(values: &mut Vec<T>) {
    if let Some(&first) = values.first() {
        values.push(first);
    }
}
