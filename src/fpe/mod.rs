//! Format-Preserving Encryption Module
//!
//! Makes a narrow per-chunk Feistel primitive usable on arbitrary real-world
//! text by layering three concerns on top of it:
//!
//! - **Unknown-character strategies**: FAIL/SKIP/REDACT/DELETE policies for
//!   input characters outside the cipher's alphabet
//! - **Chunking**: splitting text beyond the primitive's length limit into
//!   independently ciphered segments and reassembling them losslessly
//! - **Multi-key dispatch**: encrypt with the primary key, decrypt by trial
//!   over all rotated keys, with no key identifier in the ciphertext
//!
//! Ciphertext format purity is the point: output is drawn from the same
//! alphabet and length class as the input, so format-validating consumers
//! keep working unmodified.

pub mod cipher;
pub mod keyset;
pub mod strategy;

// Re-exports for convenience
pub use cipher::{ChunkCipher, CipherError, FpeCipher, MAX_CHUNK_SIZE, MIN_CHUNK_SIZE, NULL_TWEAK};
pub use keyset::{FfxMode, FpeKeyset, FpeKeysetBuilder, KeyEntry};

use crate::alphabet::AlphabetError;
use thiserror::Error;

/// How encryption and decryption handle characters outside the alphabet.
///
/// The underlying FPE primitive only accepts characters from its bound
/// alphabet; anything else must be reconciled before the cipher runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownCharacterStrategy {
    /// Fail the whole operation before any cipher call.
    #[default]
    Fail,
    /// Leave non-alphabet characters unencrypted, nested into the ciphertext
    /// at their original positions.
    Skip,
    /// Replace non-alphabet characters with a redaction character before
    /// processing. Decryption will not restore the original characters.
    Redact,
    /// Remove non-alphabet characters before processing. Plaintext and
    /// ciphertext lengths may differ, and decryption will not restore the
    /// removed characters.
    Delete,
}

/// Per-call options for [`Fpe::encrypt`] and [`Fpe::decrypt`].
///
/// Decryption should be given the same params that produced the ciphertext;
/// a mismatched tweak yields garbage output rather than an error, because the
/// cipher is an unauthenticated permutation.
#[derive(Debug, Clone, Default)]
pub struct FpeParams {
    /// Unknown-character policy. Defaults to [`UnknownCharacterStrategy::Fail`].
    pub strategy: UnknownCharacterStrategy,
    /// Additional cipher input. Empty (the default) resolves to the fixed
    /// null tweak; both sides of an encrypt/decrypt pair resolve identically.
    pub tweak: Vec<u8>,
    /// Override for the REDACT substitution character. `None` falls back to
    /// the alphabet's derived default.
    pub redaction_char: Option<char>,
}

impl FpeParams {
    /// Set the unknown-character strategy.
    pub fn with_strategy(mut self, strategy: UnknownCharacterStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set an explicit tweak.
    pub fn with_tweak(mut self, tweak: Vec<u8>) -> Self {
        self.tweak = tweak;
        self
    }

    /// Set an explicit REDACT substitution character.
    pub fn with_redaction_char(mut self, redaction_char: char) -> Self {
        self.redaction_char = Some(redaction_char);
        self
    }
}

/// Errors surfaced by whole-text FPE operations
#[derive(Error, Debug)]
pub enum FpeError {
    /// FAIL strategy found an out-of-alphabet character in the input.
    #[error("input contains character not in the alphabet: {0:?}")]
    InvalidCharacter(char),

    /// Input bytes are not valid UTF-8.
    #[error("input is not valid UTF-8")]
    InvalidUtf8,

    /// Encryption requested on a keyset with no primary key.
    #[error("keyset has no primary key")]
    NoPrimaryKey,

    /// Keyset construction violated an invariant.
    #[error("invalid keyset: {0}")]
    InvalidKeyset(String),

    /// No key in the set could decrypt the ciphertext.
    #[error("no key in the keyset could decrypt the ciphertext")]
    DecryptionExhausted,

    #[error(transparent)]
    Alphabet(#[from] AlphabetError),

    #[error(transparent)]
    Cipher(#[from] CipherError),
}

/// Interface for Format-Preserving Encryption.
///
/// Implemented by single-key [`FpeCipher`] and by the multi-key
/// [`FpeKeyset`]. Both operations are deterministic for a given key, tweak
/// and strategy; all state is immutable, so implementations are safe to call
/// concurrently.
pub trait Fpe {
    /// Deterministically encrypt plaintext, preserving its format.
    fn encrypt(&self, plaintext: &[u8], params: &FpeParams) -> Result<Vec<u8>, FpeError>;

    /// Deterministically decrypt ciphertext produced by [`Fpe::encrypt`].
    fn decrypt(&self, ciphertext: &[u8], params: &FpeParams) -> Result<Vec<u8>, FpeError>;
}
