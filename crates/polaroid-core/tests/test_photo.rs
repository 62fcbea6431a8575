mod common;

use polaroid_core::error::PolaroidError;
use polaroid_core::photo::{load_photos, parse_photos, save_photos, Dimensions, Position};

const RECORDS: &str = r#"[
  {
    "id": "a",
    "filename": "lake.jpg",
    "url": "https://example.test/lake.jpg",
    "caption": "Lake",
    "year": 2023,
    "position": { "x": 10, "y": 20.5 },
    "rotationAngle": -3.5,
    "isFavorite": true,
    "uploadedAt": "2024-05-01T10:00:00Z",
    "fileSize": 2048,
    "dimensions": { "width": 800, "height": 600 }
  },
  {
    "id": "b",
    "url": "https://example.test/b.jpg",
    "year": 2024,
    "uploadedAt": "2024-05-02T10:00:00Z"
  }
]"#;

// ---------------------------------------------------------------------------
// JSON records
// ---------------------------------------------------------------------------

#[test]
fn test_parse_camel_case_records() {
    let photos = parse_photos(RECORDS).unwrap();
    assert_eq!(photos.len(), 2);

    let a = &photos[0];
    assert_eq!(a.filename, "lake.jpg");
    assert_eq!(a.position, Some(Position { x: 10.0, y: 20.5 }));
    assert_eq!(a.rotation_angle, Some(-3.5));
    assert!(a.is_favorite());
    assert_eq!(a.file_size, 2048);
    assert_eq!(a.dimensions, Dimensions { width: 800, height: 600 });

    let b = &photos[1];
    assert_eq!(b.filename, "");
    assert!(b.position.is_none());
    assert!(!b.is_favorite());
    assert_eq!(b.dimensions, Dimensions::default());
}

#[test]
fn test_duplicate_ids_rejected() {
    let json = r#"[
      {"id": "x", "url": "u1", "year": 2024, "uploadedAt": "2024-01-01T00:00:00Z"},
      {"id": "x", "url": "u2", "year": 2024, "uploadedAt": "2024-01-02T00:00:00Z"}
    ]"#;
    match parse_photos(json) {
        Err(PolaroidError::DuplicateId(id)) => assert_eq!(id, "x"),
        other => panic!("expected duplicate id error, got {other:?}"),
    }
}

#[test]
fn test_malformed_records_rejected() {
    let err = parse_photos(r#"[{"id": "a"}]"#).unwrap_err();
    assert!(matches!(err, PolaroidError::InvalidRecords(_)));
}

#[test]
fn test_unset_fields_not_serialized() {
    let photo = common::photo("p", 2024, 0);
    let json = serde_json::to_string(&photo).unwrap();
    assert!(json.contains("\"uploadedAt\""));
    assert!(!json.contains("caption"));
    assert!(!json.contains("position"));
    assert!(!json.contains("rotationAngle"));
}

#[test]
fn test_caption_text_trims_blank() {
    let mut photo = common::photo("p", 2024, 0);
    assert_eq!(photo.caption_text(), None);
    photo.caption = Some("  \t".into());
    assert_eq!(photo.caption_text(), None);
    photo.caption = Some("  Hi ".into());
    assert_eq!(photo.caption_text(), Some("Hi"));
}

// ---------------------------------------------------------------------------
// Files
// ---------------------------------------------------------------------------

#[test]
fn test_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("photos.json");
    let photos = parse_photos(RECORDS).unwrap();
    save_photos(&path, &photos).unwrap();
    let loaded = load_photos(&path).unwrap();
    assert_eq!(loaded, photos);
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_photos(&dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, PolaroidError::Io(_)));
}
