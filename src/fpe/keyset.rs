//! Multi-key FPE: encrypt with the primary key, decrypt by trial over all keys.
//!
//! Format preservation forbids embedding a key identifier in the ciphertext,
//! so rotated-key decryption has to trial every key in the set. Decrypt cost
//! is therefore O(number of keys) in the worst case; keysets are expected to
//! stay small.
//!
//! A keyset is built once from persisted key material and is immutable for
//! its lifetime. Key rotation replaces the whole set, never mutates it.

use crate::alphabet::Alphabet;
use crate::ff3::Ff3Cipher;
use crate::fpe::cipher::FpeCipher;
use crate::fpe::{Fpe, FpeError, FpeParams};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// FFX cipher mode identifier.
///
/// Closed set: adding a mode means adding a chunk cipher implementation and
/// a match arm wherever modes are dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfxMode {
    /// FF3-1 (NIST SP 800-38G rev. 1)
    Ff31,
}

impl FfxMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FfxMode::Ff31 => "ff3-1",
        }
    }
}

/// One key's worth of persisted material: raw bytes, bound alphabet, cipher
/// mode and the primary flag.
///
/// # Security
/// Key bytes are securely erased from memory on drop via `ZeroizeOnDrop`.
/// Clone is intentionally not derived to prevent key proliferation in memory.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct KeyEntry {
    key: Vec<u8>,
    #[zeroize(skip)]
    alphabet: Alphabet,
    #[zeroize(skip)]
    mode: FfxMode,
    #[zeroize(skip)]
    primary: bool,
}

impl KeyEntry {
    pub fn new(key: Vec<u8>, alphabet: Alphabet, mode: FfxMode, primary: bool) -> Self {
        Self {
            key,
            alphabet,
            mode,
            primary,
        }
    }

    /// Entry for the key new ciphertext is produced under.
    pub fn primary(key: Vec<u8>, alphabet: Alphabet, mode: FfxMode) -> Self {
        Self::new(key, alphabet, mode, true)
    }

    /// Entry for a rotated key that is decryption-eligible only.
    pub fn raw(key: Vec<u8>, alphabet: Alphabet, mode: FfxMode) -> Self {
        Self::new(key, alphabet, mode, false)
    }
}

/// An ordered set of keyed FPE ciphers with at most one primary.
///
/// Encryption always uses the primary; decryption trials every cipher in the
/// order the keys were added and returns the first success. Immutable after
/// construction and safe to share across threads.
pub struct FpeKeyset {
    ciphers: Vec<FpeCipher>,
    primary_index: Option<usize>,
}

impl FpeKeyset {
    /// Build a keyset from persisted key entries.
    ///
    /// Key bytes are consumed and zeroized once each cipher's key schedule
    /// has been built. Fails if more than one entry is marked primary, or if
    /// any entry's key or alphabet is unusable for its mode.
    pub fn from_entries(entries: Vec<KeyEntry>) -> Result<Self, FpeError> {
        let mut ciphers = Vec::with_capacity(entries.len());
        let mut primary_index = None;
        for (index, entry) in entries.iter().enumerate() {
            if entry.primary {
                if primary_index.is_some() {
                    return Err(FpeError::InvalidKeyset(
                        "more than one key is marked primary".to_string(),
                    ));
                }
                primary_index = Some(index);
            }
            let chunk_cipher = match entry.mode {
                FfxMode::Ff31 => Ff3Cipher::new(&entry.key, entry.alphabet.clone())?,
            };
            ciphers.push(FpeCipher::new(Box::new(chunk_cipher)));
        }
        Ok(Self {
            ciphers,
            primary_index,
        })
    }

    /// Builder for keysets over pre-built ciphers (custom [`crate::ChunkCipher`]
    /// implementations included).
    pub fn builder() -> FpeKeysetBuilder {
        FpeKeysetBuilder::new()
    }

    /// Number of keys in the set.
    pub fn len(&self) -> usize {
        self.ciphers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ciphers.is_empty()
    }

    /// Whether the set can encrypt.
    pub fn has_primary(&self) -> bool {
        self.primary_index.is_some()
    }
}

impl Fpe for FpeKeyset {
    /// Encrypt with the primary key only.
    fn encrypt(&self, plaintext: &[u8], params: &FpeParams) -> Result<Vec<u8>, FpeError> {
        let index = self.primary_index.ok_or(FpeError::NoPrimaryKey)?;
        self.ciphers[index].encrypt(plaintext, params)
    }

    /// Trial-decrypt with every key in insertion order.
    ///
    /// Per-key failures are expected control flow, not errors; only full
    /// exhaustion surfaces to the caller.
    fn decrypt(&self, ciphertext: &[u8], params: &FpeParams) -> Result<Vec<u8>, FpeError> {
        for cipher in &self.ciphers {
            if let Ok(plaintext) = cipher.decrypt(ciphertext, params) {
                return Ok(plaintext);
            }
        }
        Err(FpeError::DecryptionExhausted)
    }
}

/// Incremental [`FpeKeyset`] construction from pre-built ciphers.
pub struct FpeKeysetBuilder {
    ciphers: Vec<FpeCipher>,
    primary_index: Option<usize>,
}

impl FpeKeysetBuilder {
    pub fn new() -> Self {
        Self {
            ciphers: Vec::new(),
            primary_index: None,
        }
    }

    /// Add the primary cipher. Fails if one is already set.
    pub fn primary(mut self, cipher: FpeCipher) -> Result<Self, FpeError> {
        if self.primary_index.is_some() {
            return Err(FpeError::InvalidKeyset(
                "more than one key is marked primary".to_string(),
            ));
        }
        self.primary_index = Some(self.ciphers.len());
        self.ciphers.push(cipher);
        Ok(self)
    }

    /// Add a decryption-only cipher.
    pub fn raw(mut self, cipher: FpeCipher) -> Self {
        self.ciphers.push(cipher);
        self
    }

    pub fn build(self) -> FpeKeyset {
        FpeKeyset {
            ciphers: self.ciphers,
            primary_index: self.primary_index,
        }
    }
}

impl Default for FpeKeysetBuilder {
    fn default() -> Self {
        Self::new()
    }
}
