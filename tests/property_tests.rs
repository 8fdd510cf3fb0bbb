//! Property-Based Tests with proptest
//!
//! Deterministic property-based testing of the FPE invariants that must hold
//! for arbitrary inputs, with automatic shrinking to minimal failing cases.
//!
//! **Test Organization**:
//! - `format_properties`: alphabet and length preservation
//! - `strategy_properties`: per-strategy invariants over arbitrary printable text
//! - `determinism_properties`: equal inputs give equal outputs

mod common;

use proptest::prelude::*;

use common::fixtures::*;
use fpekit_core::{Fpe, FpeParams, UnknownCharacterStrategy};

fn params(strategy: UnknownCharacterStrategy) -> FpeParams {
    FpeParams::default()
        .with_strategy(strategy)
        .with_tweak(TEST_TWEAK.to_vec())
}

/// Format preservation over clean alphanumeric input
mod format_properties {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: encrypt() → decrypt() returns the original text
        #[test]
        fn prop_roundtrip_preserves_text(text in "[0-9A-Za-z]{0,80}") {
            let keyset = alphanumeric_keyset();
            let p = params(UnknownCharacterStrategy::Fail);

            let ciphertext = keyset.encrypt(text.as_bytes(), &p)
                .expect("clean input must encrypt");
            let plaintext = keyset.decrypt(&ciphertext, &p)
                .expect("own ciphertext must decrypt");

            prop_assert_eq!(plaintext, text.as_bytes());
        }

        /// Property: ciphertext has the same length and alphabet as the input
        #[test]
        fn prop_ciphertext_keeps_format(text in "[0-9A-Za-z]{0,80}") {
            let keyset = alphanumeric_keyset();
            let ciphertext = keyset
                .encrypt(text.as_bytes(), &params(UnknownCharacterStrategy::Fail))
                .expect("clean input must encrypt");

            prop_assert_eq!(ciphertext.len(), text.len());
            prop_assert!(ciphertext.iter().all(|&b| (b as char).is_ascii_alphanumeric()));
        }
    }
}

/// Strategy invariants over arbitrary printable ASCII
mod strategy_properties {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: SKIP preserves length and leaves every out-of-alphabet
        /// character untouched at its original position, and round-trips
        #[test]
        fn prop_skip_preserves_positions(text in "[ -~]{0,80}") {
            let keyset = alphanumeric_keyset();
            let p = params(UnknownCharacterStrategy::Skip);

            let ciphertext = keyset.encrypt(text.as_bytes(), &p)
                .expect("SKIP accepts any printable input");
            prop_assert_eq!(ciphertext.len(), text.len());

            for (i, b) in text.bytes().enumerate() {
                if !(b as char).is_ascii_alphanumeric() {
                    prop_assert_eq!(ciphertext[i], b, "unknown byte moved at index {}", i);
                }
            }

            let plaintext = keyset.decrypt(&ciphertext, &p)
                .expect("SKIP ciphertext must decrypt");
            prop_assert_eq!(plaintext, text.as_bytes());
        }

        /// Property: DELETE output is alphabet-only and decrypts to the
        /// input with unknown characters stripped
        #[test]
        fn prop_delete_strips_and_roundtrips(text in "[ -~]{0,80}") {
            let keyset = alphanumeric_keyset();
            let p = params(UnknownCharacterStrategy::Delete);

            let stripped: String = text.chars().filter(char::is_ascii_alphanumeric).collect();

            let ciphertext = keyset.encrypt(text.as_bytes(), &p)
                .expect("DELETE accepts any printable input");
            prop_assert_eq!(ciphertext.len(), stripped.len());
            prop_assert!(ciphertext.iter().all(|&b| (b as char).is_ascii_alphanumeric()));

            let plaintext = keyset.decrypt(&ciphertext, &p)
                .expect("DELETE ciphertext must decrypt");
            prop_assert_eq!(plaintext, stripped.as_bytes());
        }

        /// Property: REDACT decrypts to the redacted form of the input
        #[test]
        fn prop_redact_roundtrips_to_redacted_form(text in "[ -~]{0,80}") {
            let keyset = alphanumeric_keyset();
            let p = params(UnknownCharacterStrategy::Redact);

            // 'X' is the derived redaction character for the alphanumeric alphabet
            let redacted: String = text
                .chars()
                .map(|c| if c.is_ascii_alphanumeric() { c } else { 'X' })
                .collect();

            let ciphertext = keyset.encrypt(text.as_bytes(), &p)
                .expect("REDACT accepts any printable input");
            prop_assert_eq!(ciphertext.len(), text.len());

            let plaintext = keyset.decrypt(&ciphertext, &p)
                .expect("REDACT ciphertext must decrypt");
            prop_assert_eq!(plaintext, redacted.as_bytes());
        }
    }
}

/// Determinism invariants
mod determinism_properties {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: encryption is deterministic for a fixed key and tweak
        #[test]
        fn prop_encryption_deterministic(text in "[ -~]{0,80}") {
            let keyset = alphanumeric_keyset();
            let p = params(UnknownCharacterStrategy::Skip);

            let first = keyset.encrypt(text.as_bytes(), &p)
                .expect("first encryption should succeed");
            let second = keyset.encrypt(text.as_bytes(), &p)
                .expect("second encryption should succeed");

            prop_assert_eq!(first, second);
        }

        /// Property: SKIP and FAIL agree on clean input
        #[test]
        fn prop_strategies_agree_on_clean_input(text in "[0-9A-Za-z]{0,80}") {
            let keyset = alphanumeric_keyset();

            let via_fail = keyset
                .encrypt(text.as_bytes(), &params(UnknownCharacterStrategy::Fail))
                .expect("clean input must encrypt");
            let via_skip = keyset
                .encrypt(text.as_bytes(), &params(UnknownCharacterStrategy::Skip))
                .expect("clean input must encrypt");

            prop_assert_eq!(via_fail, via_skip);
        }
    }
}
