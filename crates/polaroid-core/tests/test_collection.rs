mod common;

use chrono::{TimeZone, Utc};
use polaroid_core::collection::{
    format_file_size, merge_uploaded, year_summaries, PhotoFilter, SortKey, SortOrder,
    YearSummary,
};

use common::{photo, photos};

fn ids(list: &[&polaroid_core::photo::Photo]) -> Vec<String> {
    list.iter().map(|p| p.id.clone()).collect()
}

// ---------------------------------------------------------------------------
// Year timeline
// ---------------------------------------------------------------------------

#[test]
fn test_year_summaries_newest_first() {
    let list = vec![
        photo("a", 2021, 0),
        photo("b", 2024, 1),
        photo("c", 2021, 2),
        photo("d", 2023, 3),
        photo("e", 2024, 4),
        photo("f", 2024, 5),
    ];
    let years = year_summaries(&list);
    assert_eq!(
        years,
        vec![
            YearSummary { year: 2024, photo_count: 3 },
            YearSummary { year: 2023, photo_count: 1 },
            YearSummary { year: 2021, photo_count: 2 },
        ]
    );
}

#[test]
fn test_year_summaries_empty() {
    assert!(year_summaries(&[]).is_empty());
}

#[test]
fn test_year_summary_json_is_camel_case() {
    let json = serde_json::to_string(&YearSummary { year: 2022, photo_count: 4 }).unwrap();
    assert_eq!(json, r#"{"year":2022,"photoCount":4}"#);
}

// ---------------------------------------------------------------------------
// Filtering and sorting
// ---------------------------------------------------------------------------

#[test]
fn test_default_filter_newest_upload_first() {
    let list = photos(4);
    let out = PhotoFilter::default().apply(&list);
    assert_eq!(ids(&out), vec!["p3", "p2", "p1", "p0"]);
}

#[test]
fn test_filter_by_year_and_favorite() {
    let mut list = vec![photo("a", 2023, 0), photo("b", 2024, 1), photo("c", 2024, 2)];
    list[2].is_favorite = Some(true);

    let by_year = PhotoFilter {
        year: Some(2024),
        ..PhotoFilter::default()
    };
    assert_eq!(ids(&by_year.apply(&list)), vec!["c", "b"]);

    let favorites = PhotoFilter {
        favorite: Some(true),
        ..PhotoFilter::default()
    };
    assert_eq!(ids(&favorites.apply(&list)), vec!["c"]);

    let not_favorite = PhotoFilter {
        favorite: Some(false),
        order: SortOrder::Asc,
        ..PhotoFilter::default()
    };
    assert_eq!(ids(&not_favorite.apply(&list)), vec!["a", "b"]);
}

#[test]
fn test_filter_blank_caption_counts_as_none() {
    let mut list = photos(3);
    list[0].caption = Some("Sunset".into());
    list[1].caption = Some("   ".into());
    let captioned = PhotoFilter {
        has_caption: Some(true),
        ..PhotoFilter::default()
    };
    assert_eq!(ids(&captioned.apply(&list)), vec!["p0"]);
}

#[test]
fn test_sort_by_filename() {
    let mut list = photos(3);
    list[0].filename = "zebra.jpg".into();
    list[1].filename = "apple.jpg".into();
    list[2].filename = "mango.jpg".into();
    let filter = PhotoFilter {
        sort_by: SortKey::Filename,
        order: SortOrder::Asc,
        ..PhotoFilter::default()
    };
    assert_eq!(ids(&filter.apply(&list)), vec!["p1", "p2", "p0"]);
}

#[test]
fn test_sort_by_taken_at_missing_first_ascending() {
    let mut list = photos(3);
    list[0].taken_at = Some(Utc.with_ymd_and_hms(2020, 6, 1, 0, 0, 0).unwrap());
    list[2].taken_at = Some(Utc.with_ymd_and_hms(2019, 6, 1, 0, 0, 0).unwrap());
    let filter = PhotoFilter {
        sort_by: SortKey::TakenAt,
        order: SortOrder::Asc,
        ..PhotoFilter::default()
    };
    assert_eq!(ids(&filter.apply(&list)), vec!["p1", "p2", "p0"]);
}

#[test]
fn test_sort_key_display() {
    assert_eq!(format!("{}", SortKey::UploadedAt), "Uploaded");
    assert_eq!(format!("{}", SortKey::Filename), "Filename");
}

// ---------------------------------------------------------------------------
// Merging uploads
// ---------------------------------------------------------------------------

#[test]
fn test_merge_uploaded_skips_known_ids() {
    let mut collection = photos(2);
    let uploaded = vec![photo("p1", 2024, 5), photo("new", 2024, 6), photo("new", 2024, 7)];
    let added = merge_uploaded(&mut collection, uploaded);
    assert_eq!(added, 1);
    assert_eq!(collection.len(), 3);
    assert_eq!(collection[2].id, "new");
}

// ---------------------------------------------------------------------------
// File sizes
// ---------------------------------------------------------------------------

#[test]
fn test_format_file_size() {
    assert_eq!(format_file_size(0, 2), "0 Bytes");
    assert_eq!(format_file_size(500, 2), "500 Bytes");
    assert_eq!(format_file_size(1536, 2), "1.5 KB");
    assert_eq!(format_file_size(10 * 1024 * 1024, 2), "10 MB");
    assert_eq!(format_file_size(1_234_567, 2), "1.18 MB");
    assert_eq!(format_file_size(1024 * 1024 * 1024, 2), "1 GB");
}

#[test]
fn test_format_file_size_zero_decimals() {
    assert_eq!(format_file_size(1536, 0), "2 KB");
}
