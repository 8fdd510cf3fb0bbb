//! Test fixtures and constants for fpekit-core tests.
//!
//! This module provides common key material and keyset constructors used
//! across strategy, chunking, keyset, and property-based tests. Keys are
//! fixed so every ciphertext assertion is reproducible.

#![allow(dead_code)] // not every integration test binary uses every fixture

use fpekit_core::{Alphabet, FfxMode, FpeKeyset, KeyEntry};

// ============================================================================
// Key Material
// ============================================================================

/// Primary test key (32 bytes for AES-256 scheduling inside FF3-1)
pub const TEST_KEY: &[u8; 32] = &[
    0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e,
    0x0f, 0x10, 0x11, 0x12, 0x13, 0x14, 0x15, 0x16, 0x17, 0x18, 0x19, 0x1a, 0x1b, 0x1c, 0x1d,
    0x1e, 0x1f,
];

/// A second, unrelated key for rotation and wrong-key tests
pub const ROTATED_KEY: &[u8; 32] = &[
    0xf0, 0xe1, 0xd2, 0xc3, 0xb4, 0xa5, 0x96, 0x87, 0x78, 0x69, 0x5a, 0x4b, 0x3c, 0x2d, 0x1e,
    0x0f, 0xff, 0xee, 0xdd, 0xcc, 0xbb, 0xaa, 0x99, 0x88, 0x77, 0x66, 0x55, 0x44, 0x33, 0x22,
    0x11, 0x00,
];

/// Standard 7-byte FF3-1 tweak used across tests
pub const TEST_TWEAK: &[u8] = &[0xD8, 0xE7, 0x92, 0x0A, 0xFA, 0x33, 0x0A];

/// A second tweak, for tweak-separation assertions
pub const OTHER_TWEAK: &[u8] = &[0x9A, 0x76, 0x8A, 0x92, 0xF6, 0x0E, 0x12];

// ============================================================================
// Keyset Constructors
// ============================================================================

/// Single-key alphanumeric keyset under [`TEST_KEY`]
pub fn alphanumeric_keyset() -> FpeKeyset {
    FpeKeyset::from_entries(vec![KeyEntry::primary(
        TEST_KEY.to_vec(),
        Alphabet::alphanumeric(),
        FfxMode::Ff31,
    )])
    .expect("test keyset construction should succeed")
}

/// Single-key digits keyset under [`TEST_KEY`]
pub fn digits_keyset() -> FpeKeyset {
    FpeKeyset::from_entries(vec![KeyEntry::primary(
        TEST_KEY.to_vec(),
        Alphabet::digits(),
        FfxMode::Ff31,
    )])
    .expect("test keyset construction should succeed")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_constants() {
        assert_eq!(TEST_KEY.len(), 32);
        assert_eq!(ROTATED_KEY.len(), 32);
        assert_ne!(TEST_KEY, ROTATED_KEY);
        assert_eq!(TEST_TWEAK.len(), 7);
        assert_eq!(OTHER_TWEAK.len(), 7);
        assert_ne!(TEST_TWEAK, OTHER_TWEAK);
    }
}
