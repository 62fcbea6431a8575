mod common;

use approx::assert_relative_eq;
use polaroid_core::rotation::{
    display_rotation, hash_seed, random_rotation, rotation_css, rotation_for, seeded_rotation,
    upload_rotation, RotationSeed,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

// ---------------------------------------------------------------------------
// Hash
// ---------------------------------------------------------------------------

#[test]
fn test_hash_matches_string_hash_code() {
    assert_eq!(hash_seed(""), 0);
    assert_eq!(hash_seed("a"), 97);
    assert_eq!(hash_seed("abc"), 96_354);
    assert_eq!(hash_seed("hello"), 99_162_322);
}

#[test]
fn test_hash_wraps_to_i32() {
    assert_eq!(hash_seed("polygenelubricants"), i32::MIN);
}

// ---------------------------------------------------------------------------
// Seeded rotation
// ---------------------------------------------------------------------------

#[test]
fn test_seeded_rotation_known_values() {
    assert_relative_eq!(seeded_rotation(&"abc".into()), -5.0);
    assert_relative_eq!(seeded_rotation(&"a".into()), 4.7);
    assert_relative_eq!(seeded_rotation(&"hello".into()), -3.3);
    assert_relative_eq!(seeded_rotation(&"photo-1".into()), 4.9);
    assert_relative_eq!(seeded_rotation(&"polygenelubricants".into()), 1.7);
}

#[test]
fn test_numeric_seed_used_directly() {
    assert_relative_eq!(seeded_rotation(&RotationSeed::Number(42)), -0.8);
    assert_relative_eq!(seeded_rotation(&RotationSeed::Number(-1)), 5.0);
}

#[test]
fn test_seeded_rotation_is_deterministic() {
    for seed in ["p0", "IMG_2041.jpg", "ünïcødé", "🙂 emoji"] {
        let a = rotation_css(seeded_rotation(&seed.into()));
        let b = rotation_css(seeded_rotation(&seed.into()));
        assert_eq!(a, b, "seed {seed}");
    }
}

#[test]
fn test_seeded_rotation_in_range() {
    for i in 0..2_000 {
        let text = format!("photo-{i}-{}", i * 7919);
        let r = seeded_rotation(&text.into());
        assert!((-5.0..=5.0).contains(&r), "got {r}");
        let n = seeded_rotation(&RotationSeed::Number(i64::from(i) * -104_729));
        assert!((-5.0..=5.0).contains(&n), "got {n}");
    }
}

// ---------------------------------------------------------------------------
// Random rotation
// ---------------------------------------------------------------------------

#[test]
fn test_random_rotation_one_decimal_in_range() {
    let mut rng = StdRng::seed_from_u64(17);
    for _ in 0..500 {
        let r = random_rotation(&mut rng);
        assert!((-5.0..=5.0).contains(&r));
        let tenths = r * 10.0;
        assert_relative_eq!(tenths, tenths.round(), epsilon = 1e-9);
    }
}

#[test]
fn test_rotation_for_prefers_seed() {
    let mut rng = StdRng::seed_from_u64(0);
    let seed = RotationSeed::from("abc");
    assert_relative_eq!(rotation_for(Some(&seed), &mut rng), -5.0);
    let r = rotation_for(None, &mut rng);
    assert!((-5.0..=5.0).contains(&r));
}

#[test]
fn test_upload_rotation_range() {
    let mut rng = StdRng::seed_from_u64(4);
    for _ in 0..500 {
        let r = upload_rotation(&mut rng);
        assert!((-15.0..=15.0).contains(&r));
    }
}

#[test]
fn test_display_rotation_uses_stored_angle() {
    let mut photo = common::photo("abc", 2024, 0);
    assert_relative_eq!(display_rotation(&photo), -5.0);
    photo.rotation_angle = Some(12.5);
    assert_relative_eq!(display_rotation(&photo), 12.5);
}

#[test]
fn test_rotation_css_format() {
    assert_eq!(rotation_css(-2.5), "-2.5deg");
    assert_eq!(rotation_css(4.0), "4.0deg");
}
