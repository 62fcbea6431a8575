use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{PolaroidError, Result};

/// A single photo on the wall.
///
/// `id` is opaque and must be unique within any collection handed to the
/// layout, viewer or upload components.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub id: String,
    #[serde(default)]
    pub filename: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    pub year: i32,
    /// Saved top-left corner on the collage, `None` until placed by hand.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    /// Tilt in degrees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation_angle: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_favorite: Option<bool>,
    pub uploaded_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taken_at: Option<DateTime<Utc>>,
    /// Size in bytes.
    #[serde(default)]
    pub file_size: u64,
    #[serde(default)]
    pub dimensions: Dimensions,
}

impl Photo {
    pub fn new(id: impl Into<String>, url: impl Into<String>, year: i32) -> Self {
        Self {
            id: id.into(),
            filename: String::new(),
            url: url.into(),
            caption: None,
            year,
            position: None,
            rotation_angle: None,
            is_favorite: None,
            uploaded_at: Utc::now(),
            taken_at: None,
            file_size: 0,
            dimensions: Dimensions::default(),
        }
    }

    pub fn is_favorite(&self) -> bool {
        self.is_favorite.unwrap_or(false)
    }

    /// Caption with surrounding whitespace removed, `None` when blank.
    pub fn caption_text(&self) -> Option<&str> {
        self.caption
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }
}

/// Top-left corner in container units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Parse a JSON array of photo records, rejecting duplicate ids.
pub fn parse_photos(json: &str) -> Result<Vec<Photo>> {
    let photos: Vec<Photo> = serde_json::from_str(json)?;
    ensure_unique_ids(&photos)?;
    Ok(photos)
}

/// Read photo records from a JSON file.
pub fn load_photos(path: &Path) -> Result<Vec<Photo>> {
    let contents = std::fs::read_to_string(path)?;
    parse_photos(&contents)
}

/// Write photo records to a JSON file, pretty-printed.
pub fn save_photos(path: &Path, photos: &[Photo]) -> Result<()> {
    let json = serde_json::to_string_pretty(photos)?;
    std::fs::write(path, json)?;
    Ok(())
}

pub fn ensure_unique_ids(photos: &[Photo]) -> Result<()> {
    let mut seen = std::collections::HashSet::with_capacity(photos.len());
    for photo in photos {
        if !seen.insert(photo.id.as_str()) {
            return Err(PolaroidError::DuplicateId(photo.id.clone()));
        }
    }
    Ok(())
}
