//! Test utilities for property-based testing
//!
//! This module provides generators and helpers for proptest.

#[cfg(test)]
pub mod generators {
    use proptest::prelude::*;

    /// Generate an application identity (a single path segment)
    pub fn app_id() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9_-]{0,30}"
    }

    /// Generate a release tag as found in manifests (version or git ref)
    pub fn release_tag() -> impl Strategy<Value = String> {
        prop_oneof![
            (0u32..20, 0u32..50, 0u32..100)
                .prop_map(|(major, minor, patch)| format!("v{major}.{minor}.{patch}")),
            "[a-z][a-z0-9-]{0,15}",
        ]
    }

    /// Generate a SHA-512 digest (128 hex characters)
    pub fn sha512_hash() -> impl Strategy<Value = String> {
        "[0-9a-f]{128}"
    }
}

#[cfg(test)]
mod tests {
    use super::generators::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn test_app_id_generator(id in app_id()) {
            prop_assert!(!id.is_empty());
            prop_assert!(!id.contains('/'));
        }

        #[test]
        fn test_release_tag_generator(tag in release_tag()) {
            prop_assert!(!tag.is_empty());
            prop_assert!(tag != "." && tag != "..");
        }

        #[test]
        fn test_sha512_hash_generator(hash in sha512_hash()) {
            prop_assert_eq!(hash.len(), 128);
            prop_assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
        }
    }
}
