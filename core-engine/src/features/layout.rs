//! Feature Layout - Centralized Feature Schema
//!
//! The ordered list of feature names is the single source of truth shared by
//! extraction, training exports, and inference. A trained model is only valid
//! against the exact layout it was trained on, so:
//!
//! 1. Adding a feature requires a `FEATURE_VERSION` bump (append-only).
//! 2. Reordering or renaming is a version bump.
//! 3. Column order must never change silently.
//!
//! Polarity policy ("suspicion flags"): every network-trust feature is `1`
//! when trust could NOT be established. `dns_record = 1` means the host did
//! not resolve, `ssl_certificate = 1` means no verified peer certificate was
//! obtained, `ssl_final_state = 1` means the URL does not use the https
//! scheme. `having_sub_domain` is a subdomain-label count with a leading
//! `www` excluded. All other indicators are 0/1 flags except `url_length`.

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

/// Current feature layout version. Bump on any layout change.
pub const FEATURE_VERSION: u8 = 1;

/// Feature names in the exact order they appear in the vector.
pub const FEATURE_LAYOUT: &[&str] = &[
    // === Lexical (0-8) ===
    "having_ip",             // 0: dotted-quad pattern anywhere in the URL
    "url_length",            // 1: character count of the normalized URL
    "shortening_service",    // 2: known URL-shortener domain present
    "having_at_symbol",      // 3: literal '@' anywhere in the URL
    "double_slash_redirect", // 4: '//' after the scheme separator
    "prefix_suffix",         // 5: hyphen in the registered domain
    "having_sub_domain",     // 6: subdomain label count (leading www excluded)
    "https_token",           // 7: 'https' inside the hostname
    "port",                  // 8: explicit non-standard port

    // === Scheme (9) ===
    "ssl_final_state",       // 9: 1 when the scheme is not https

    // === Network probes (10-11) ===
    "dns_record",            // 10: 1 when the host did not resolve
    "ssl_certificate",       // 11: 1 when no verified certificate was obtained
];

/// Total number of features. Must match `FEATURE_LAYOUT.len()`.
pub const FEATURE_COUNT: usize = 12;

/// CRC32 hash over version + ordered names, used to detect layout
/// mismatches between an extraction run and a loaded model.
pub fn compute_layout_hash() -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(&[FEATURE_VERSION]);
    for name in FEATURE_LAYOUT {
        hasher.update(name.as_bytes());
        hasher.update(&[0]);
    }
    hasher.finalize()
}

/// Layout hash (inputs are const, so this is stable for a build).
pub fn layout_hash() -> u32 {
    compute_layout_hash()
}

/// Complete layout information, exposed as queryable metadata so consumers
/// can align columns without hardcoding names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutInfo {
    pub version: u8,
    pub hash: u32,
    pub feature_count: usize,
    pub feature_names: Vec<String>,
}

impl LayoutInfo {
    pub fn current() -> Self {
        Self {
            version: FEATURE_VERSION,
            hash: layout_hash(),
            feature_count: FEATURE_COUNT,
            feature_names: FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Default for LayoutInfo {
    fn default() -> Self {
        Self::current()
    }
}

/// Error when a feature layout does not match the current one.
#[derive(Debug, Clone)]
pub struct LayoutMismatchError {
    pub expected_version: u8,
    pub expected_hash: u32,
    pub actual_version: u8,
    pub actual_hash: u32,
}

impl std::fmt::Display for LayoutMismatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Feature layout mismatch: expected v{} (hash: {:08x}), got v{} (hash: {:08x})",
            self.expected_version, self.expected_hash, self.actual_version, self.actual_hash
        )
    }
}

impl std::error::Error for LayoutMismatchError {}

/// Validate that incoming data matches the current layout.
pub fn validate_layout(incoming_version: u8, incoming_hash: u32) -> Result<(), LayoutMismatchError> {
    let current_hash = layout_hash();

    if incoming_version != FEATURE_VERSION || incoming_hash != current_hash {
        return Err(LayoutMismatchError {
            expected_version: FEATURE_VERSION,
            expected_hash: current_hash,
            actual_version: incoming_version,
            actual_hash: incoming_hash,
        });
    }

    Ok(())
}

/// Get feature index by name (O(n), the layout is small).
pub fn feature_index(name: &str) -> Option<usize> {
    FEATURE_LAYOUT.iter().position(|&n| n == name)
}

/// Get feature name by index.
pub fn feature_name(index: usize) -> Option<&'static str> {
    FEATURE_LAYOUT.get(index).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_count() {
        assert_eq!(FEATURE_COUNT, 12);
        assert_eq!(FEATURE_LAYOUT.len(), FEATURE_COUNT);
    }

    #[test]
    fn test_schema_order() {
        // The trained-model contract: this exact order, nothing else.
        assert_eq!(
            FEATURE_LAYOUT,
            &[
                "having_ip",
                "url_length",
                "shortening_service",
                "having_at_symbol",
                "double_slash_redirect",
                "prefix_suffix",
                "having_sub_domain",
                "https_token",
                "port",
                "ssl_final_state",
                "dns_record",
                "ssl_certificate",
            ]
        );
    }

    #[test]
    fn test_layout_hash_consistency() {
        assert_eq!(compute_layout_hash(), compute_layout_hash());
        assert_ne!(layout_hash(), 0);
    }

    #[test]
    fn test_validate_layout() {
        assert!(validate_layout(FEATURE_VERSION, layout_hash()).is_ok());
        assert!(validate_layout(FEATURE_VERSION + 1, layout_hash()).is_err());
        assert!(validate_layout(FEATURE_VERSION, layout_hash().wrapping_add(1)).is_err());
    }

    #[test]
    fn test_feature_index_lookup() {
        assert_eq!(feature_index("having_ip"), Some(0));
        assert_eq!(feature_index("ssl_final_state"), Some(9));
        assert_eq!(feature_index("ssl_certificate"), Some(11));
        assert_eq!(feature_index("nonexistent"), None);

        assert_eq!(feature_name(0), Some("having_ip"));
        assert_eq!(feature_name(11), Some("ssl_certificate"));
        assert_eq!(feature_name(100), None);
    }

    #[test]
    fn test_layout_info() {
        let info = LayoutInfo::current();
        assert_eq!(info.version, FEATURE_VERSION);
        assert_eq!(info.feature_count, FEATURE_COUNT);
        assert_eq!(info.feature_names.len(), FEATURE_COUNT);
    }
}
