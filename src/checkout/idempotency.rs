//! Idempotency-key generation for processor calls.
//!
//! Keys are a random component followed by the current Unix-millisecond
//! timestamp, both rendered in base 36. Collisions would require the same
//! random draw within the same millisecond.

use chrono::Utc;

const BASE36_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generate a fresh idempotency key, sent as `X-Idempotency-Key` on
/// preference creation.
pub fn idempotency_key() -> String {
    let random_part = to_base36(rand::random::<u64>());
    let ts = Utc::now().timestamp_millis() as u64;
    format!("{}{}", random_part, to_base36(ts))
}

fn to_base36(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while n > 0 {
        digits.push(BASE36_DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    digits.reverse();
    // Digits come from a fixed ASCII table
    String::from_utf8(digits).expect("base36 digits are ASCII")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base36_known_values() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(36 * 36), "100");
        assert_eq!(to_base36(1_000_000), "lfls");
    }

    #[test]
    fn key_uses_base36_charset_only() {
        let key = idempotency_key();
        assert!(!key.is_empty());
        assert!(key.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit()));
    }

    #[test]
    fn keys_are_distinct_across_calls() {
        let keys: Vec<String> = (0..100).map(|_| idempotency_key()).collect();
        let mut unique = keys.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), keys.len());
    }
}
