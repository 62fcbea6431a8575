//! Per-photo tilt for the polaroid look.
//!
//! A tilt is either stored on the photo or derived from a seed, so the same
//! photo leans the same way on every render and in every session.

use rand::Rng;

use crate::consts::{MAX_DISPLAY_ROTATION_DEG, MAX_UPLOAD_ROTATION_DEG, ROTATION_HASH_MODULUS};
use crate::photo::Photo;

/// Seed for a deterministic tilt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RotationSeed {
    Text(String),
    Number(i64),
}

impl From<&str> for RotationSeed {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for RotationSeed {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for RotationSeed {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

/// Fold a string into a 32-bit signed hash: `hash = ((hash << 5) - hash) + unit`
/// over its UTF-16 code units, wrapping on overflow.
pub fn hash_seed(seed: &str) -> i32 {
    seed.encode_utf16().fold(0i32, |hash, unit| {
        hash.wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit))
    })
}

/// Deterministic tilt in [-5.0, 5.0] degrees, one decimal place.
pub fn seeded_rotation(seed: &RotationSeed) -> f64 {
    let hash = match seed {
        RotationSeed::Text(s) => i64::from(hash_seed(s)),
        RotationSeed::Number(n) => *n,
    };
    // Non-negative remainder keeps negative hashes inside the range.
    let tenths = hash.rem_euclid(ROTATION_HASH_MODULUS) - ROTATION_HASH_MODULUS / 2;
    tenths as f64 / 10.0
}

/// Uniform tilt in [-5.0, 5.0] degrees, one decimal place.
pub fn random_rotation<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let max_tenths = (MAX_DISPLAY_ROTATION_DEG * 10.0) as i64;
    rng.gen_range(-max_tenths..=max_tenths) as f64 / 10.0
}

/// Tilt for `seed` when given, otherwise a random one.
pub fn rotation_for<R: Rng + ?Sized>(seed: Option<&RotationSeed>, rng: &mut R) -> f64 {
    match seed {
        Some(seed) => seeded_rotation(seed),
        None => random_rotation(rng),
    }
}

/// Tilt assigned to a freshly uploaded photo, in [-15, 15] degrees.
pub fn upload_rotation<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen_range(-MAX_UPLOAD_ROTATION_DEG..=MAX_UPLOAD_ROTATION_DEG)
}

/// Tilt to draw for `photo`: the stored angle, else one seeded by its id.
pub fn display_rotation(photo: &Photo) -> f64 {
    photo
        .rotation_angle
        .unwrap_or_else(|| seeded_rotation(&RotationSeed::from(photo.id.as_str())))
}

/// CSS-style rendering, e.g. `-2.5deg`.
pub fn rotation_css(degrees: f64) -> String {
    format!("{degrees:.1}deg")
}
