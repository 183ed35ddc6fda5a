//! The in-memory song catalog.

use std::collections::HashMap;

use crate::model::{name_key, SongRecord};

/// An ordered, read-only collection of songs.
///
/// Row positions are stable for the lifetime of the catalog and are what the
/// rest of the system uses to refer to a specific row, since `(name, year)`
/// may repeat.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    songs: Vec<SongRecord>,
    /// (upper-cased name, year) to row positions, in catalog order.
    by_song: HashMap<(String, i32), Vec<usize>>,
    /// Upper-cased name to row positions, in catalog order.
    by_name: HashMap<String, Vec<usize>>,
}

impl Catalog {
    #[must_use]
    pub fn new(songs: Vec<SongRecord>) -> Self {
        let mut by_song: HashMap<(String, i32), Vec<usize>> = HashMap::new();
        let mut by_name: HashMap<String, Vec<usize>> = HashMap::new();
        for (position, song) in songs.iter().enumerate() {
            let key = name_key(&song.name);
            by_song
                .entry((key.clone(), song.year))
                .or_default()
                .push(position);
            by_name.entry(key).or_default().push(position);
        }
        Self {
            songs,
            by_song,
            by_name,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.songs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    #[must_use]
    pub fn songs(&self) -> &[SongRecord] {
        &self.songs
    }

    #[must_use]
    pub fn get(&self, position: usize) -> Option<&SongRecord> {
        self.songs.get(position)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SongRecord> {
        self.songs.iter()
    }

    /// Positions of every row for the song `name` released in `year`, in
    /// catalog order. Names compare case-insensitively.
    #[must_use]
    pub fn positions_of(&self, name: &str, year: i32) -> &[usize] {
        self.by_song
            .get(&(name_key(name), year))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Positions of every row named `name`, any year, in catalog order.
    #[must_use]
    pub fn positions_named(&self, name: &str) -> &[usize] {
        self.by_name
            .get(&name_key(name))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of distinct `(name, year)` songs.
    #[must_use]
    pub fn distinct_songs(&self) -> usize {
        self.by_song.len()
    }

    /// Number of `(name, year)` songs that appear on more than one row.
    #[must_use]
    pub fn duplicated_songs(&self) -> usize {
        self.by_song.values().filter(|rows| rows.len() > 1).count()
    }
}

impl FromIterator<SongRecord> for Catalog {
    fn from_iter<I: IntoIterator<Item = SongRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a SongRecord;
    type IntoIter = std::slice::Iter<'a, SongRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.songs.iter()
    }
}
