use chrono::Utc;
use rand::Rng;

const BASE36_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Length of the random suffix of a generated id.
const RANDOM_SUFFIX_LEN: usize = 8;

/// Generate an id of the form `{prefix}_{millis in base 36}_{8 random base-36 chars}`.
///
/// The timestamp keeps ids roughly ordered by creation; the suffix makes
/// collisions within the same millisecond unlikely.
pub fn generate_id<R: Rng + ?Sized>(prefix: &str, rng: &mut R) -> String {
    let millis = Utc::now().timestamp_millis().max(0) as u64;
    let suffix: String = (0..RANDOM_SUFFIX_LEN)
        .map(|_| BASE36_DIGITS[rng.gen_range(0..BASE36_DIGITS.len())] as char)
        .collect();
    format!("{prefix}_{}_{suffix}", to_base36(millis))
}

fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36_DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    String::from_utf8_lossy(&digits).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_to_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(1_295), "zz");
    }

    #[test]
    fn test_generate_id_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let id = generate_id("id", &mut rng);
        let parts: Vec<&str> = id.split('_').collect();
        assert_eq!(parts.len(), 3, "got: {id}");
        assert_eq!(parts[0], "id");
        assert_eq!(parts[2].len(), RANDOM_SUFFIX_LEN);
        assert!(parts[2].bytes().all(|b| BASE36_DIGITS.contains(&b)));
    }

    #[test]
    fn test_generate_id_distinct() {
        let mut rng = StdRng::seed_from_u64(1);
        let a = generate_id("id", &mut rng);
        let b = generate_id("id", &mut rng);
        assert_ne!(a, b);
    }
}
