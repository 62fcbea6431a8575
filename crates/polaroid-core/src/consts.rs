/// Distance kept between a freshly placed photo and the container edge.
pub const LAYOUT_PADDING: f64 = 20.0;

/// Default collage container size.
pub const DEFAULT_CONTAINER_WIDTH: f64 = 1200.0;
pub const DEFAULT_CONTAINER_HEIGHT: f64 = 800.0;

/// Default polaroid footprint: 192x240 card plus 24 px of frame.
pub const DEFAULT_ELEMENT_WIDTH: f64 = 216.0;
pub const DEFAULT_ELEMENT_HEIGHT: f64 = 264.0;

/// Seeded tilt range is [-MAX, MAX] degrees at one decimal place.
pub const MAX_DISPLAY_ROTATION_DEG: f64 = 5.0;

/// Tilt range assigned to freshly uploaded photos.
pub const MAX_UPLOAD_ROTATION_DEG: f64 = 15.0;

/// Modulus applied to the seed hash before scaling to tenths of a degree.
pub const ROTATION_HASH_MODULUS: i64 = 101;

/// Multiplicative step for a single zoom in/out.
pub const ZOOM_STEP: f64 = 1.2;

pub const MIN_ZOOM: f64 = 0.5;
pub const MAX_ZOOM: f64 = 5.0;

/// Default number of files a single upload session accepts.
pub const DEFAULT_MAX_FILES: usize = 20;

/// Default per-file size limit: 10 MiB.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// MIME types accepted by default.
pub const DEFAULT_ACCEPTED_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/webp"];

/// Simulated transfer: interval between progress ticks.
pub const DEFAULT_TICK_MS: u64 = 200;

/// Simulated transfer: pause between reaching the ceiling and resolving.
pub const DEFAULT_SETTLE_MS: u64 = 500;

/// Simulated transfer: upper bound (exclusive) of a single progress increment.
pub const DEFAULT_MAX_INCREMENT: f64 = 30.0;

/// Simulated transfer: probability that a file resolves successfully.
pub const DEFAULT_SUCCESS_RATE: f64 = 0.9;

/// Progress never reported above this value until the outcome is known.
pub const PROGRESS_CEILING: f64 = 95.0;

/// Progress of a completed file.
pub const PROGRESS_COMPLETE: f64 = 100.0;

/// Prefix of generated upload ids.
pub const UPLOAD_ID_PREFIX: &str = "id";

/// Scheme used for locally created preview URLs.
pub const PREVIEW_URL_SCHEME: &str = "blob:polaroid";
