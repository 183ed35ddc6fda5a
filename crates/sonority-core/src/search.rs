//! Name search over the catalog.
//!
//! Used to check a song exists, and to discover its exact spelling and year,
//! before asking for recommendations.

use std::collections::HashSet;

use crate::catalog::Catalog;
use crate::model::{name_key, SongRecord};

/// The first record (in catalog order) named `name`, compared
/// case-insensitively.
#[must_use]
pub fn search_song<'a>(catalog: &'a Catalog, name: &str) -> Option<&'a SongRecord> {
    catalog
        .positions_named(name)
        .first()
        .and_then(|&position| catalog.get(position))
}

/// Every record named `name`, in catalog order.
#[must_use]
pub fn search_all<'a>(catalog: &'a Catalog, name: &str) -> Vec<&'a SongRecord> {
    catalog
        .positions_named(name)
        .iter()
        .filter_map(|&position| catalog.get(position))
        .collect()
}

/// Up to `limit` distinct song names containing `fragment`, case-insensitively,
/// in catalog order.
#[must_use]
pub fn suggest<'a>(catalog: &'a Catalog, fragment: &str, limit: usize) -> Vec<&'a str> {
    let needle = name_key(fragment);
    if needle.is_empty() {
        return Vec::new();
    }

    let mut seen = HashSet::new();
    catalog
        .iter()
        .filter(|song| name_key(&song.name).contains(&needle))
        .filter(|song| seen.insert(name_key(&song.name)))
        .map(|song| song.name.as_str())
        .take(limit)
        .collect()
}
