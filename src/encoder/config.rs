//! Process-wide tunables read once from the environment.
//!
//! They only change how work is scheduled, never the encoded symbol.

use std::sync::OnceLock;

fn parse_env_usize(name: &str, default: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(default)
}

fn parse_env_bool_u8(name: &str, default: bool) -> bool {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u8>().ok())
        .map(|v| v != 0)
        .unwrap_or(default)
}

static PARALLEL_MASKS: OnceLock<bool> = OnceLock::new();

/// Score mask candidates on the rayon pool (`QR_PARALLEL_MASKS`, default on)
pub(crate) fn parallel_masks() -> bool {
    *PARALLEL_MASKS.get_or_init(|| parse_env_bool_u8("QR_PARALLEL_MASKS", true))
}

static PARALLEL_MIN_VERSION: OnceLock<u8> = OnceLock::new();

/// Smallest version scored in parallel (`QR_PARALLEL_MIN_VERSION`, default 5)
pub(crate) fn parallel_min_version() -> u8 {
    *PARALLEL_MIN_VERSION
        .get_or_init(|| parse_env_usize("QR_PARALLEL_MIN_VERSION", 5).clamp(1, 40) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_variables_use_defaults() {
        assert_eq!(parse_env_usize("QR_TEST_UNSET_USIZE_TUNABLE", 7), 7);
        assert!(parse_env_bool_u8("QR_TEST_UNSET_BOOL_TUNABLE", true));
        assert!(!parse_env_bool_u8("QR_TEST_UNSET_BOOL_TUNABLE", false));
    }

    #[test]
    fn test_tunables_are_in_range() {
        assert!((1..=40).contains(&parallel_min_version()));
        // Stable across calls
        assert_eq!(parallel_masks(), parallel_masks());
    }
}
