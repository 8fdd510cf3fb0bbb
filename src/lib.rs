//! # fpekit-core
//!
//! Format-Preserving Encryption for constrained text fields: alphabets,
//! chunking, unknown-character strategies, multi-key rotation.
//!
//! This crate encrypts text so that the ciphertext keeps the plaintext's
//! format: same alphabet, same length class. A 16-digit card number encrypts
//! to 16 digits; an alphanumeric account id encrypts to an alphanumeric
//! string of the same length. Format-validating consumers keep working on
//! encrypted data unmodified.
//!
//! ## Layers
//!
//! | Layer | Description |
//! |:------|:------------|
//! | [`Ff3Cipher`] | FF3-1 Feistel cipher over one alphabet chunk (NIST SP 800-38G rev. 1) |
//! | [`FpeCipher`] | Whole-text layer: unknown-character strategies + chunking |
//! | [`FpeKeyset`] | Multi-key layer: primary-key encrypt, trial decrypt for rotation |
//!
//! ## Quick Start
//!
//! ```rust
//! use fpekit_core::{
//!     Alphabet, FfxMode, Fpe, FpeKeyset, FpeParams, KeyEntry, UnknownCharacterStrategy,
//! };
//!
//! let keyset = FpeKeyset::from_entries(vec![KeyEntry::primary(
//!     vec![0x2B; 32], // Use secure key material in production!
//!     Alphabet::alphanumeric(),
//!     FfxMode::Ff31,
//! )])
//! .unwrap();
//!
//! // SKIP leaves the '-' unencrypted at its original position
//! let params = FpeParams::default().with_strategy(UnknownCharacterStrategy::Skip);
//!
//! let ciphertext = keyset.encrypt(b"user-4711", &params).unwrap();
//! assert_eq!(ciphertext.len(), b"user-4711".len());
//! assert_eq!(ciphertext[4], b'-');
//!
//! let plaintext = keyset.decrypt(&ciphertext, &params).unwrap();
//! assert_eq!(plaintext, b"user-4711");
//! ```
//!
//! ## Security Properties
//!
//! - **FF3-1**: AES-based Feistel permutation with 56-bit tweaks
//! - **Determinism**: equal plaintext, key and tweak give equal ciphertext;
//!   use tweaks to separate domains
//! - **No authentication**: a wrong key or tweak yields garbage, not an
//!   error; pair with an integrity layer where tampering matters
//! - **Memory safety**: `zeroize` on drop for all raw key material

// Metrics and observability
pub mod metrics;
pub use metrics::OperationMetrics;

// Alphabets: the character domain every layer is bound to
pub mod alphabet;
pub use alphabet::{Alphabet, AlphabetError};

// FF3-1 chunk cipher primitive
pub mod ff3;
pub use ff3::Ff3Cipher;

// Whole-text FPE: strategies, chunking, keysets
pub mod fpe;
pub use fpe::{
    ChunkCipher, CipherError, FfxMode, Fpe, FpeCipher, FpeError, FpeKeyset, FpeKeysetBuilder,
    FpeParams, KeyEntry, UnknownCharacterStrategy, MAX_CHUNK_SIZE, MIN_CHUNK_SIZE, NULL_TWEAK,
};
