//! Chunked FPE orchestration around a per-chunk cipher primitive.
//!
//! The chunk cipher only accepts segments whose length lies within its
//! documented bounds. [`FpeCipher`] makes that primitive usable on whole
//! texts: it runs the unknown-character strategy, partitions the processed
//! text into [`MAX_CHUNK_SIZE`]-character segments, ciphers each segment
//! independently, and reassembles the output in order.
//!
//! # Known weakness
//!
//! A trailing segment shorter than [`MIN_CHUNK_SIZE`] characters is passed
//! through unencrypted instead of failing: the primitive cannot safely
//! transform it. The final few characters of sufficiently long plaintext may
//! therefore remain in plaintext form. Chunk boundaries are purely
//! length-based and both directions use the same boundary arithmetic, so
//! segment lengths always line up between encrypt and decrypt.

use crate::alphabet::Alphabet;
use crate::fpe::strategy::{self, CharacterSkipper};
use crate::fpe::{Fpe, FpeError, FpeParams, UnknownCharacterStrategy};
use crate::metrics::OperationMetrics;
use std::sync::{Arc, Mutex};
use std::time::Instant;
use thiserror::Error;

/// Minimum segment length the chunk cipher can transform. Shorter segments
/// pass through unencrypted.
pub const MIN_CHUNK_SIZE: usize = 4;

/// Maximum segment length handed to the chunk cipher in one call.
pub const MAX_CHUNK_SIZE: usize = 30;

/// Fixed tweak substituted when [`FpeParams::tweak`] is empty. This is the
/// 56-bit FF3-1 zero tweak; encrypt and decrypt resolve an empty tweak to the
/// same constant, so default-tweak ciphertext always round-trips.
pub const NULL_TWEAK: [u8; 7] = [0u8; 7];

/// Errors raised by a chunk cipher primitive
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CipherError {
    #[error("alphabet radix {0} outside supported range 2..=64")]
    UnsupportedRadix(usize),

    #[error("invalid key length: expected 16, 24 or 32 bytes, got {0}")]
    InvalidKeyLength(usize),

    #[error("invalid tweak length: expected 7 or 8 bytes, got {0}")]
    InvalidTweakLength(usize),

    #[error("chunk length {len} outside cipher bounds {min}..={max}")]
    LengthOutOfRange {
        len: usize,
        min: usize,
        max: usize,
    },

    #[error("symbol not in the cipher alphabet: {0:?}")]
    UnknownSymbol(char),
}

/// A per-chunk FPE primitive bound to one key and one alphabet.
///
/// Both operations take text built entirely from the bound alphabet, with a
/// length inside the primitive's documented bounds, and return text of the
/// same length from the same alphabet. Implementations are deterministic and
/// must be safely callable from multiple threads.
pub trait ChunkCipher {
    /// The alphabet this cipher is bound to.
    fn alphabet(&self) -> &Alphabet;

    /// Encrypt one segment under the given tweak.
    fn encrypt_chunk(&self, text: &str, tweak: &[u8]) -> Result<String, CipherError>;

    /// Decrypt one segment under the given tweak.
    fn decrypt_chunk(&self, text: &str, tweak: &[u8]) -> Result<String, CipherError>;
}

/// Whole-text FPE over a single keyed chunk cipher.
///
/// Stateless across calls: the cipher, alphabet and chunk arithmetic are
/// fixed at construction, so concurrent encrypt/decrypt calls are safe. The
/// only interior mutability is the last-operation metrics snapshot, which
/// never influences results.
pub struct FpeCipher {
    cipher: Box<dyn ChunkCipher + Send + Sync>,
    alphabet: Alphabet,
    /// Last operation metrics (interior mutability for observability)
    last_metrics: Arc<Mutex<OperationMetrics>>,
}

impl FpeCipher {
    /// Wrap a keyed chunk cipher into a whole-text FPE primitive.
    pub fn new(cipher: Box<dyn ChunkCipher + Send + Sync>) -> Self {
        let alphabet = cipher.alphabet().clone();
        Self {
            cipher,
            alphabet,
            last_metrics: Arc::new(Mutex::new(OperationMetrics::new())),
        }
    }

    /// The alphabet of the underlying chunk cipher.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Metrics from the most recent encrypt or decrypt call.
    pub fn last_metrics(&self) -> OperationMetrics {
        self.last_metrics
            .lock()
            .map(|metrics| metrics.clone())
            .unwrap_or_else(|_| OperationMetrics::new())
    }

    /// Cipher the processed text segment by segment.
    ///
    /// Boundaries are character counts over the post-strategy text. Any
    /// segment failure aborts the whole call; no partial output escapes.
    fn transform_chunks(
        &self,
        chars: &[char],
        tweak: &[u8],
        decrypt: bool,
    ) -> Result<(String, u32, u32), FpeError> {
        let mut out = String::with_capacity(chars.len());
        let mut ciphered = 0u32;
        let mut passed_through = 0u32;
        for chunk in chars.chunks(MAX_CHUNK_SIZE) {
            if chunk.len() < MIN_CHUNK_SIZE {
                out.extend(chunk.iter());
                passed_through += 1;
            } else {
                let segment: String = chunk.iter().collect();
                let transformed = if decrypt {
                    self.cipher.decrypt_chunk(&segment, tweak)?
                } else {
                    self.cipher.encrypt_chunk(&segment, tweak)?
                };
                out.push_str(&transformed);
                ciphered += 1;
            }
        }
        Ok((out, ciphered, passed_through))
    }

    fn record_metrics(&self, strategy_micros: u64, cipher_micros: u64, ciphered: u32, passed: u32) {
        if let Ok(mut metrics) = self.last_metrics.lock() {
            *metrics = OperationMetrics::new()
                .with_strategy(strategy_micros)
                .with_cipher(cipher_micros, ciphered, passed);
        }
    }
}

impl Fpe for FpeCipher {
    fn encrypt(&self, plaintext: &[u8], params: &FpeParams) -> Result<Vec<u8>, FpeError> {
        let text = std::str::from_utf8(plaintext).map_err(|_| FpeError::InvalidUtf8)?;

        let strategy_start = Instant::now();
        let mut skipper = None;
        let processed = match params.strategy {
            UnknownCharacterStrategy::Fail => {
                if let Some(c) = strategy::find_unknown_char(text, &self.alphabet) {
                    return Err(FpeError::InvalidCharacter(c));
                }
                text.to_owned()
            }
            UnknownCharacterStrategy::Skip => {
                let s = CharacterSkipper::new(text, &self.alphabet);
                let processed = s.processed_text().to_owned();
                skipper = Some(s);
                processed
            }
            UnknownCharacterStrategy::Delete => strategy::remove_unknown_chars(text, &self.alphabet),
            UnknownCharacterStrategy::Redact => {
                let redaction_char = match params.redaction_char {
                    Some(c) => c,
                    None => self.alphabet.redaction_char()?,
                };
                strategy::redact_unknown_chars(text, &self.alphabet, redaction_char)
            }
        };
        let strategy_micros = strategy_start.elapsed().as_micros() as u64;

        let tweak: &[u8] = if params.tweak.is_empty() {
            &NULL_TWEAK
        } else {
            &params.tweak
        };

        let chars: Vec<char> = processed.chars().collect();
        let cipher_start = Instant::now();
        let (mut ciphertext, ciphered, passed) = self.transform_chunks(&chars, tweak, false)?;
        let cipher_micros = cipher_start.elapsed().as_micros() as u64;

        if let Some(skipper) = &skipper {
            if skipper.has_skipped() {
                ciphertext = skipper.inject_into(&ciphertext);
            }
        }

        self.record_metrics(strategy_micros, cipher_micros, ciphered, passed);
        Ok(ciphertext.into_bytes())
    }

    fn decrypt(&self, ciphertext: &[u8], params: &FpeParams) -> Result<Vec<u8>, FpeError> {
        let text = std::str::from_utf8(ciphertext).map_err(|_| FpeError::InvalidUtf8)?;

        // Only SKIP is index-symmetric; FAIL/REDACT/DELETE already did their
        // work on the encrypt side and need no special handling here.
        let strategy_start = Instant::now();
        let mut skipper = None;
        let processed = match params.strategy {
            UnknownCharacterStrategy::Skip => {
                let s = CharacterSkipper::new(text, &self.alphabet);
                let processed = s.processed_text().to_owned();
                skipper = Some(s);
                processed
            }
            _ => text.to_owned(),
        };
        let strategy_micros = strategy_start.elapsed().as_micros() as u64;

        let tweak: &[u8] = if params.tweak.is_empty() {
            &NULL_TWEAK
        } else {
            &params.tweak
        };

        let chars: Vec<char> = processed.chars().collect();
        let cipher_start = Instant::now();
        let (mut plaintext, ciphered, passed) = self.transform_chunks(&chars, tweak, true)?;
        let cipher_micros = cipher_start.elapsed().as_micros() as u64;

        if let Some(skipper) = &skipper {
            if skipper.has_skipped() {
                plaintext = skipper.inject_into(&plaintext);
            }
        }

        self.record_metrics(strategy_micros, cipher_micros, ciphered, passed);
        Ok(plaintext.into_bytes())
    }
}
