use serde::{Deserialize, Serialize};

use crate::model::feature::Feature;

/// The numeric audio features of one song.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FeatureValues {
    pub valence: f64,
    pub acousticness: f64,
    pub danceability: f64,
    pub energy: f64,
    pub instrumentalness: f64,
    pub liveness: f64,
    pub speechiness: f64,
    pub duration_ms: f64,
    pub key: f64,
    pub loudness: f64,
    pub mode: f64,
    pub tempo: f64,
    pub popularity: f64,
}

impl FeatureValues {
    /// Value of a single feature.
    #[must_use]
    pub const fn get(&self, feature: Feature) -> f64 {
        match feature {
            Feature::Valence => self.valence,
            Feature::Acousticness => self.acousticness,
            Feature::Danceability => self.danceability,
            Feature::Energy => self.energy,
            Feature::Instrumentalness => self.instrumentalness,
            Feature::Liveness => self.liveness,
            Feature::Speechiness => self.speechiness,
            Feature::DurationMs => self.duration_ms,
            Feature::Key => self.key,
            Feature::Loudness => self.loudness,
            Feature::Mode => self.mode,
            Feature::Tempo => self.tempo,
            Feature::Popularity => self.popularity,
        }
    }

    pub fn set(&mut self, feature: Feature, value: f64) {
        let slot = match feature {
            Feature::Valence => &mut self.valence,
            Feature::Acousticness => &mut self.acousticness,
            Feature::Danceability => &mut self.danceability,
            Feature::Energy => &mut self.energy,
            Feature::Instrumentalness => &mut self.instrumentalness,
            Feature::Liveness => &mut self.liveness,
            Feature::Speechiness => &mut self.speechiness,
            Feature::DurationMs => &mut self.duration_ms,
            Feature::Key => &mut self.key,
            Feature::Loudness => &mut self.loudness,
            Feature::Mode => &mut self.mode,
            Feature::Tempo => &mut self.tempo,
            Feature::Popularity => &mut self.popularity,
        };
        *slot = value;
    }

    #[must_use]
    pub fn with(mut self, feature: Feature, value: f64) -> Self {
        self.set(feature, value);
        self
    }

    /// Project the values onto `features`, in the order given.
    #[must_use]
    pub fn project(&self, features: &[Feature]) -> Vec<f64> {
        features.iter().map(|&f| self.get(f)).collect()
    }
}

/// One row of the song catalog.
///
/// `(name, year)` is not unique: the same song can appear on several rows
/// (different releases, re-uploads), and callers must deal with that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SongRecord {
    pub name: String,

    /// Artist credit as stored in the catalog, usually a Python-style list
    /// such as `['Artist A', 'Artist B']`.
    pub artists: String,

    pub year: i32,

    pub features: FeatureValues,
}

impl SongRecord {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        artists: impl Into<String>,
        year: i32,
        features: FeatureValues,
    ) -> Self {
        Self {
            name: name.into(),
            artists: artists.into(),
            year,
            features,
        }
    }

    /// Display label used by the charts: `NAME (YEAR)`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.year)
    }

    /// Whether this record is the song `name` released in `year`.
    ///
    /// Names compare case-insensitively, years exactly.
    #[must_use]
    pub fn is(&self, name: &str, year: i32) -> bool {
        self.year == year && name_key(&self.name) == name_key(name)
    }

    /// Split the artist credit into individual names.
    ///
    /// Understands the quoted list form (`['A', "B, Jr."]`) and falls back to
    /// the raw credit when it is not a list.
    #[must_use]
    pub fn artist_list(&self) -> Vec<String> {
        let credit = self.artists.trim();
        let Some(inner) = credit
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
        else {
            return if credit.is_empty() {
                Vec::new()
            } else {
                vec![credit.to_string()]
            };
        };

        let mut names = Vec::new();
        let mut current = String::new();
        let mut quote: Option<char> = None;
        for c in inner.chars() {
            match quote {
                Some(q) if c == q => {
                    names.push(std::mem::take(&mut current));
                    quote = None;
                }
                Some(_) => current.push(c),
                None if c == '\'' || c == '"' => quote = Some(c),
                None => {}
            }
        }

        if names.is_empty() && !inner.trim().is_empty() {
            // Unquoted list
            return inner
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        }
        names
    }

    /// Artist names joined for display.
    #[must_use]
    pub fn artist_display(&self) -> String {
        self.artist_list().join(", ")
    }
}

/// Normalized lookup key for a song name.
#[must_use]
pub fn name_key(name: &str) -> String {
    name.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn song(artists: &str) -> SongRecord {
        SongRecord::new("Your Hand In Mine", artists, 2003, FeatureValues::default())
    }

    #[test]
    fn test_feature_values_get_set() {
        let values = FeatureValues::default()
            .with(Feature::Tempo, 120.5)
            .with(Feature::Valence, 0.25);
        assert_eq!(values.get(Feature::Tempo), 120.5);
        assert_eq!(values.get(Feature::Valence), 0.25);
        assert_eq!(values.get(Feature::Energy), 0.0);
    }

    #[test]
    fn test_project_follows_requested_order() {
        let values = FeatureValues::default()
            .with(Feature::Energy, 0.8)
            .with(Feature::Loudness, -6.0);
        assert_eq!(
            values.project(&[Feature::Loudness, Feature::Energy, Feature::Key]),
            vec![-6.0, 0.8, 0.0]
        );
        assert!(values.project(&[]).is_empty());
    }

    #[test]
    fn test_is_matches_case_insensitively() {
        let record = song("['Explosions in the Sky']");
        assert!(record.is("YOUR HAND IN MINE", 2003));
        assert!(record.is("your hand in mine", 2003));
        assert!(!record.is("YOUR HAND IN MINE", 2004));
        assert!(!record.is("YOUR HAND", 2003));
    }

    #[test]
    fn test_label() {
        assert_eq!(song("x").label(), "Your Hand In Mine (2003)");
    }

    #[test]
    fn test_artist_list_quoted() {
        let record = song("['Tyler, The Creator', \"A$AP Rocky\"]");
        assert_eq!(
            record.artist_list(),
            vec!["Tyler, The Creator".to_string(), "A$AP Rocky".to_string()]
        );
        assert_eq!(record.artist_display(), "Tyler, The Creator, A$AP Rocky");
    }

    #[test]
    fn test_artist_list_plain_and_unquoted() {
        assert_eq!(song("Mogwai").artist_list(), vec!["Mogwai".to_string()]);
        assert_eq!(
            song("[Mogwai, Low]").artist_list(),
            vec!["Mogwai".to_string(), "Low".to_string()]
        );
        assert!(song("  ").artist_list().is_empty());
        assert!(song("[]").artist_list().is_empty());
    }

    #[test]
    fn test_name_key() {
        assert_eq!(name_key("  Señorita "), "SEÑORITA");
    }
}
