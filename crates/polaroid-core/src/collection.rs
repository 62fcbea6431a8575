//! Helpers over a whole photo collection: year timeline, filtering, merging
//! freshly uploaded records, human-readable sizes.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::photo::Photo;

/// Number of photos taken in one year.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearSummary {
    pub year: i32,
    pub photo_count: usize,
}

/// Per-year counts, newest year first.
pub fn year_summaries(photos: &[Photo]) -> Vec<YearSummary> {
    let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
    for photo in photos {
        *counts.entry(photo.year).or_default() += 1;
    }
    counts
        .into_iter()
        .rev()
        .map(|(year, photo_count)| YearSummary { year, photo_count })
        .collect()
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortKey {
    #[default]
    UploadedAt,
    TakenAt,
    Filename,
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UploadedAt => write!(f, "Uploaded"),
            Self::TakenAt => write!(f, "Taken"),
            Self::Filename => write!(f, "Filename"),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Selection and ordering of a collection.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PhotoFilter {
    pub year: Option<i32>,
    pub favorite: Option<bool>,
    pub has_caption: Option<bool>,
    #[serde(default)]
    pub sort_by: SortKey,
    #[serde(default)]
    pub order: SortOrder,
}

impl PhotoFilter {
    pub fn matches(&self, photo: &Photo) -> bool {
        self.year.map_or(true, |y| photo.year == y)
            && self.favorite.map_or(true, |f| photo.is_favorite() == f)
            && self
                .has_caption
                .map_or(true, |c| photo.caption_text().is_some() == c)
    }

    /// Matching photos in the requested order. Ties keep collection order.
    pub fn apply<'a>(&self, photos: &'a [Photo]) -> Vec<&'a Photo> {
        let mut selected: Vec<&Photo> = photos.iter().filter(|p| self.matches(p)).collect();
        selected.sort_by(|a, b| {
            let ord = match self.sort_by {
                SortKey::UploadedAt => a.uploaded_at.cmp(&b.uploaded_at),
                // Photos without a capture time sort before those with one.
                SortKey::TakenAt => a.taken_at.cmp(&b.taken_at),
                SortKey::Filename => a.filename.cmp(&b.filename),
            };
            match self.order {
                SortOrder::Asc => ord,
                SortOrder::Desc => ord.reverse(),
            }
        });
        selected
    }
}

/// Append uploaded records whose ids are not already in `collection`.
///
/// Returns how many were added.
pub fn merge_uploaded(collection: &mut Vec<Photo>, uploaded: Vec<Photo>) -> usize {
    let mut known: HashSet<String> = collection.iter().map(|p| p.id.clone()).collect();
    let before = collection.len();
    for photo in uploaded {
        if known.insert(photo.id.clone()) {
            collection.push(photo);
        } else {
            debug!(photo_id = photo.id.as_str(), "Skipping uploaded photo with a known id");
        }
    }
    collection.len() - before
}

const SIZE_UNITS: [&str; 9] = ["Bytes", "KB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];

/// Human-readable size in powers of 1024, trailing zeros dropped: `10 MB`, `1.5 KB`.
pub fn format_file_size(bytes: u64, decimals: usize) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let mut unit = 0;
    let mut value = bytes as f64;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let mut text = format!("{value:.decimals$}");
    if text.contains('.') {
        text = text.trim_end_matches('0').trim_end_matches('.').to_string();
    }
    format!("{text} {}", SIZE_UNITS[unit])
}
