#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use polaroid_core::photo::{Photo, Position};

/// Photo with a deterministic upload time one day apart per index.
pub fn photo(id: &str, year: i32, index: u32) -> Photo {
    let mut p = Photo::new(id, format!("https://example.test/{id}.jpg"), year);
    p.filename = format!("{id}.jpg");
    p.uploaded_at = Utc
        .with_ymd_and_hms(2024, 1, 1 + index, 12, 0, 0)
        .single()
        .expect("valid date");
    p
}

/// `count` photos named `p0`, `p1`, ... without saved positions.
pub fn photos(count: usize) -> Vec<Photo> {
    (0..count)
        .map(|i| photo(&format!("p{i}"), 2024, i as u32 % 28))
        .collect()
}

pub fn placed(id: &str, x: f64, y: f64) -> Photo {
    let mut p = photo(id, 2024, 0);
    p.position = Some(Position { x, y });
    p
}
