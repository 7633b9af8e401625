//! Opaque identifier generation.
//!
//! Ids have the form `<prefix>_<unix-millis>_<suffix>` where the suffix is
//! [`SUFFIX_LEN`] random lowercase base36 characters.

use rand::Rng;

/// Prefix for model descriptor ids.
pub const MODEL_PREFIX: &str = "model";
/// Prefix for text work items.
pub const TEXT_PREFIX: &str = "text";
/// Prefix for image work items.
pub const IMAGE_PREFIX: &str = "image";

/// Number of random characters appended to every id.
pub const SUFFIX_LEN: usize = 7;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generate a fresh id with the given prefix.
pub fn new_id(prefix: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let mut rng = rand::rng();
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| BASE36[rng.random_range(0..BASE36.len())] as char)
        .collect();
    format!("{prefix}_{millis}_{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_has_prefix_timestamp_and_suffix() {
        let id = new_id(MODEL_PREFIX);
        let parts: Vec<&str> = id.split('_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "model");
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), SUFFIX_LEN);
        assert!(parts[2]
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn ids_are_not_reused() {
        let a = new_id(TEXT_PREFIX);
        let b = new_id(TEXT_PREFIX);
        assert_ne!(a, b);
    }
}
