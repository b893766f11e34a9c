//! Message ID generation.

use rand::Rng;

/// Characters used for gateway message IDs.
pub const MESSAGE_ID_ALPHABET: &str = "abcdef0123456789";
pub const MESSAGE_ID_MIN_LENGTH: usize = 15;
pub const MESSAGE_ID_MAX_LENGTH: usize = 25;

/// Generates a random correlation ID using the thread-local CSPRNG.
///
/// The length is uniform in `[max(min_length, 1), max_length]` and every
/// character is drawn uniformly from `alphabet`, with replacement.
pub fn generate(min_length: usize, max_length: usize, alphabet: &str) -> String {
    generate_with(&mut rand::rng(), min_length, max_length, alphabet)
}

/// Same as [`generate`] with a caller-supplied entropy source.
pub fn generate_with<R: Rng + ?Sized>(
    rng: &mut R,
    min_length: usize,
    max_length: usize,
    alphabet: &str,
) -> String {
    let chars: Vec<char> = alphabet.chars().collect();
    if chars.is_empty() {
        return String::new();
    }

    let min = min_length.max(1);
    let max = max_length.max(min);
    let length = rng.random_range(min..=max);

    (0..length)
        .map(|_| chars[rng.random_range(0..chars.len())])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    #[test]
    fn test_lengths_and_alphabet() {
        for _ in 0..10_000 {
            let id = generate(15, 25, MESSAGE_ID_ALPHABET);
            assert!((15..=25).contains(&id.len()), "bad length: {}", id.len());
            assert!(id.chars().all(|c| MESSAGE_ID_ALPHABET.contains(c)));
        }
    }

    #[test]
    fn test_all_lengths_reachable() {
        let mut rng = StdRng::seed_from_u64(7);
        let lengths: HashSet<usize> = (0..2_000)
            .map(|_| generate_with(&mut rng, 15, 25, MESSAGE_ID_ALPHABET).len())
            .collect();
        assert_eq!(lengths.len(), 11);
    }

    #[test]
    fn test_zero_minimum_still_produces_a_character() {
        for _ in 0..100 {
            let id = generate(0, 1, "x");
            assert_eq!(id, "x");
        }
    }

    #[test]
    fn test_inverted_bounds_use_minimum() {
        let id = generate(10, 5, "ab");
        assert_eq!(id.len(), 10);
    }

    #[test]
    fn test_empty_alphabet() {
        assert_eq!(generate(15, 25, ""), "");
    }

    #[test]
    fn test_ids_do_not_repeat() {
        let ids: HashSet<String> = (0..1_000)
            .map(|_| generate(15, 25, MESSAGE_ID_ALPHABET))
            .collect();
        assert_eq!(ids.len(), 1_000);
    }
}
